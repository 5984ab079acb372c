//! Heuristic company and employee name extraction
//!
//! Both extractors are marker-anchored scanners: find the marker word,
//! then consume upper-case tokens until a stop condition. The stop
//! rules live in small explicit steps (truncate, tokenize, accept)
//! rather than one monolithic regex, so each can be tested alone.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize;

/// Character class of an acceptable name token: upper-case letters,
/// digits and a restricted punctuation set.
static UPPER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9&'’./-]+$").unwrap());

/// Token that opens with a day/month/year date.
static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+/\d+/\d+").unwrap());

fn is_upper_token(token: &str) -> bool {
    UPPER_TOKEN.is_match(token)
}

fn is_digit_run(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn letter_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_uppercase).count()
}

/// Rules for locating a company name in a subject line.
#[derive(Debug, Clone)]
pub struct CompanyRules {
    /// Marker anchoring the name, tolerant of spaced-out letters.
    pub marker: Regex,

    /// Patterns that truncate the tail after the marker; the earliest
    /// match wins.
    pub cut_points: Vec<Regex>,

    /// Minimum number of letters for a plausible name.
    pub min_letters: usize,
}

impl Default for CompanyRules {
    fn default() -> Self {
        Self {
            marker: Regex::new(r"(?i)D\s*I\s*T\s*T\s*A\b").unwrap(),
            cut_points: vec![
                Regex::new(r"->").unwrap(),
                Regex::new(r"—").unwrap(),
                Regex::new(r"–").unwrap(),
                Regex::new(r"\(").unwrap(),
                Regex::new(r"\[").unwrap(),
                Regex::new(r"(?i)\bdipendente\b").unwrap(),
                Regex::new(r"(?i)\bDAL\b").unwrap(),
            ],
            min_letters: 2,
        }
    }
}

/// Extracts a company name from a subject line.
#[derive(Debug, Clone, Default)]
pub struct CompanyExtractor {
    rules: CompanyRules,
}

impl CompanyExtractor {
    #[must_use]
    pub const fn new(rules: CompanyRules) -> Self {
        Self { rules }
    }

    /// Extract the company name, or `None` when the subject has no
    /// usable one.
    ///
    /// The **last** marker occurrence anchors the name: forwarded and
    /// replied subjects repeat the marker, and the rightmost one sits
    /// next to the name. Trailing digit runs (postal codes) are
    /// consumed but not kept.
    #[must_use]
    pub fn extract(&self, subject: &str) -> Option<String> {
        let subject = normalize(subject);
        let marker_end = self.rules.marker.find_iter(&subject).last()?.end();
        let mut tail = &subject[marker_end..];

        if let Some(cut) = self
            .rules
            .cut_points
            .iter()
            .filter_map(|p| p.find(tail))
            .map(|m| m.start())
            .min()
        {
            tail = &tail[..cut];
        }

        let mut tokens: Vec<&str> = Vec::new();
        for raw in tail.split_whitespace() {
            let token = raw.trim_matches(|c| matches!(c, ',' | ';' | ':'));
            if token.is_empty() {
                continue;
            }
            if DATE_TOKEN.is_match(token) {
                break;
            }
            if is_upper_token(token) || is_digit_run(token) {
                tokens.push(token);
            } else {
                break;
            }
        }
        while tokens.last().copied().is_some_and(is_digit_run) {
            tokens.pop();
        }

        let name = tokens.join(" ");
        (letter_count(&name) >= self.rules.min_letters).then_some(name)
    }
}

/// Rules for locating employee names in message text.
#[derive(Debug, Clone)]
pub struct EmployeeRules {
    /// Marker word preceding a name.
    pub marker: Regex,

    /// How far past the marker to look, in bytes. Bounded so a marker
    /// never captures tokens from unrelated content further on.
    pub window: usize,

    /// Minimum number of letters for a plausible name.
    pub min_letters: usize,
}

impl Default for EmployeeRules {
    fn default() -> Self {
        Self {
            marker: Regex::new(r"(?i)\bdipendente\b").unwrap(),
            window: 600,
            min_letters: 2,
        }
    }
}

/// Extracts the set of employee names mentioned in message text.
#[derive(Debug, Clone, Default)]
pub struct EmployeeExtractor {
    rules: EmployeeRules,
}

impl EmployeeExtractor {
    #[must_use]
    pub const fn new(rules: EmployeeRules) -> Self {
        Self { rules }
    }

    /// Collect every employee name following a marker occurrence.
    ///
    /// Duplicate names from repeated markers collapse into the set.
    /// A message with no match yields an empty set; the sentinel
    /// substitution happens at aggregation, not here.
    #[must_use]
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for marker in self.rules.marker.find_iter(text) {
            let start = marker.end();
            let end = snap_to_char_boundary(text, (start + self.rules.window).min(text.len()));
            let window = normalize(&text[start..end]);
            if let Some(name) = consume_name_tokens(&window)
                && letter_count(&name) >= self.rules.min_letters
            {
                names.insert(name);
            }
        }
        names
    }
}

/// Greedily take upper-case tokens until a date-like token or a token
/// outside the class ends the run.
fn consume_name_tokens(window: &str) -> Option<String> {
    let mut taken: Vec<&str> = Vec::new();
    for raw in window.split_whitespace() {
        let token = raw.trim_matches(|c| matches!(c, ',' | '.' | ';' | ':' | '>'));
        if token.is_empty() || DATE_TOKEN.is_match(token) || !is_upper_token(token) {
            break;
        }
        taken.push(token);
    }
    (!taken.is_empty()).then(|| taken.join(" "))
}

/// Snap a byte index to the nearest valid UTF-8 char boundary (backwards)
const fn snap_to_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) && i > 0 {
        i -= 1;
    }
    i
}
