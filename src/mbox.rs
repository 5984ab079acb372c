//! Minimal mbox container access
//!
//! An mbox archive is a single file of messages, each introduced by a
//! `From ` separator line. The reader loads the archive once, splits
//! it on those separators and hands the raw bytes of each message to
//! `mailparse`. The separator line itself is kept: it carries the
//! fallback timestamp used when a message has no usable Date header.

use std::fs;
use std::path::Path;

use crate::error::{Result, ScanError};

/// One message as stored in the archive, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// The `From ` separator line introducing the message.
    pub envelope: String,

    /// Raw RFC 5322 bytes: headers and body.
    pub data: Vec<u8>,
}

/// Read every message in the archive.
///
/// The file is opened, read and released within this call. Fails fast
/// when the file is missing, unreadable or does not look like an mbox
/// container. An empty file is an empty archive.
pub fn read_archive(path: &Path) -> Result<Vec<RawMessage>> {
    let bytes = fs::read(path).map_err(|source| ScanError::Archive {
        path: path.to_path_buf(),
        source,
    })?;
    split_messages(&bytes, path)
}

fn split_messages(bytes: &[u8], path: &Path) -> Result<Vec<RawMessage>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    if !bytes.starts_with(b"From ") {
        return Err(ScanError::Format(format!(
            "{} does not start with an mbox `From ` separator",
            path.display()
        )));
    }

    let mut starts = vec![0usize];
    for (i, window) in bytes.windows(6).enumerate() {
        if window == b"\nFrom ".as_slice() {
            starts.push(i + 1);
        }
    }

    let mut messages = Vec::with_capacity(starts.len());
    for (idx, &start) in starts.iter().enumerate() {
        let end = starts.get(idx + 1).copied().unwrap_or(bytes.len());
        let segment = &bytes[start..end];
        let line_end = segment
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(segment.len());
        let envelope = String::from_utf8_lossy(&segment[..line_end])
            .trim_end()
            .to_string();
        let data = segment.get(line_end + 1..).unwrap_or_default().to_vec();
        messages.push(RawMessage { envelope, data });
    }
    Ok(messages)
}
