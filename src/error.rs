//! Error types for archive scanning

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan before any aggregation happens.
///
/// Everything below the archive level (undecodable parts, malformed
/// dates, extraction misses) is recovered locally and never surfaces
/// here.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The archive file could not be opened or read
    #[error("failed to read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a recognizable mbox container
    #[error("not an mbox archive: {0}")]
    Format(String),
}

/// Result type for scanning operations
pub type Result<T> = std::result::Result<T, ScanError>;
