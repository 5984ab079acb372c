//! Decoded view of one archived message

use std::sync::LazyLock;

use mailparse::{MailHeaderMap, ParsedMail, SingleInfo};
use regex::Regex;
use tracing::debug;

use crate::mbox::RawMessage;

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

/// One message decoded far enough for scanning.
///
/// Header text arrives RFC 2047-decoded from `mailparse`. Bytes that
/// fail charset decoding are replaced rather than refused, so a broken
/// part never takes down the whole scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredMessage {
    /// Decoded subject line.
    pub subject: String,

    /// Decoded From header.
    pub from: String,

    /// To, Cc and Bcc addresses formatted as "display-name address".
    pub recipients: String,

    /// Plain text assembled from every text part. HTML parts are
    /// stripped of markup before joining.
    pub body: String,

    /// Date header values in resolution order: top level first, then
    /// nested parts.
    pub date_headers: Vec<String>,

    /// The mbox `From ` separator line this message arrived under.
    pub envelope: String,
}

impl StoredMessage {
    /// Decode a raw archive message.
    ///
    /// `None` when the bytes cannot be parsed as a message at all;
    /// that is logged and the message is skipped, never fatal.
    #[must_use]
    pub fn parse(raw: &RawMessage) -> Option<Self> {
        let parsed = match mailparse::parse_mail(&raw.data) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!("Skipping unparseable message: {err}");
                return None;
            }
        };

        let subject = parsed.headers.get_first_value("Subject").unwrap_or_default();
        let from = parsed.headers.get_first_value("From").unwrap_or_default();
        let recipients = format_recipients(&parsed.headers);

        let mut date_headers = Vec::new();
        if let Some(date) = parsed.headers.get_first_value("Date") {
            date_headers.push(date);
        }
        collect_part_dates(&parsed, &mut date_headers);

        let mut texts = Vec::new();
        collect_text(&parsed, &mut texts);

        Some(Self {
            subject,
            from,
            recipients,
            body: texts.join("\n"),
            date_headers,
            envelope: raw.envelope.clone(),
        })
    }
}

fn format_recipients(headers: &[mailparse::MailHeader]) -> String {
    let mut parts = Vec::new();
    for name in ["To", "Cc", "Bcc"] {
        let Some(value) = headers.get_first_value(name) else {
            continue;
        };
        match mailparse::addrparse(&value) {
            Ok(list) => {
                for addr in list.iter() {
                    match addr {
                        mailparse::MailAddr::Single(info) => parts.push(format_single(info)),
                        mailparse::MailAddr::Group(group) => {
                            parts.extend(group.addrs.iter().map(format_single));
                        }
                    }
                }
            }
            // keep the raw header text so substring matching still works
            Err(_) => parts.push(value),
        }
    }
    parts.join(" ")
}

fn format_single(info: &SingleInfo) -> String {
    info.display_name.as_ref().map_or_else(
        || info.addr.clone(),
        |display| format!("{display} {}", info.addr),
    )
}

fn collect_part_dates(part: &ParsedMail, out: &mut Vec<String>) {
    for sub in &part.subparts {
        if let Some(date) = sub.headers.get_first_value("Date") {
            out.push(date);
        }
        collect_part_dates(sub, out);
    }
}

fn collect_text(part: &ParsedMail, out: &mut Vec<String>) {
    if part.subparts.is_empty() {
        let ctype = part.ctype.mimetype.to_lowercase();
        if ctype == "text/plain" || ctype == "text/html" {
            let text = part.get_body().unwrap_or_else(|_| {
                String::from_utf8_lossy(&part.get_body_raw().unwrap_or_default()).into_owned()
            });
            out.push(if ctype == "text/html" {
                strip_html(&text)
            } else {
                text
            });
        }
    } else {
        for sub in &part.subparts {
            collect_text(sub, out);
        }
    }
}

/// Drop markup from an HTML part, keeping its text content.
fn strip_html(html: &str) -> String {
    let text = STYLE_BLOCK.replace_all(html, " ");
    let text = SCRIPT_BLOCK.replace_all(&text, " ");
    let text = TAG.replace_all(&text, " ");
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
