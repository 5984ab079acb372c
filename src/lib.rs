// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Employment-event statistics from mbox archives
//!
//! Scans a local mbox export for messages about employment paperwork
//! (hires, extensions, changes, resignations, dismissals) and folds
//! them into per-company, per-employee counters.
//!
//! # Features
//!
//! - Marker-anchored company and employee name extraction
//! - Ordered, substitutable operation pattern tables
//! - Inclusive date-range and sender filtering
//! - Single-employee analysis with flat counters
//! - Mergeable reports for sharded scans
//!
//! # Example
//!
//! ```no_run
//! use mbox_stats::{ScanOptions, aggregate};
//!
//! let report = aggregate("export.mbox", &ScanOptions::default()).unwrap();
//! for (company, stats) in &report.companies {
//!     println!("{company}: {} messages", stats.total_messages);
//! }
//! ```

mod aggregate;
mod classify;
mod dates;
mod error;
mod extract;
mod mbox;
mod message;
mod normalize;
mod scan;

pub use aggregate::{
    AggregateReport, Aggregator, CompanyStats, EmployeeStats, EmployeeSummary, MessageCountPolicy,
    UNKNOWN_COMPANY, UNKNOWN_EMPLOYEE,
};
pub use classify::{Classifier, OperationKind, OperationPattern, ResignationPolicy};
pub use dates::{DateRange, resolve_timestamp};
pub use error::{Result, ScanError};
pub use extract::{CompanyExtractor, CompanyRules, EmployeeExtractor, EmployeeRules};
pub use mbox::{RawMessage, read_archive};
pub use message::StoredMessage;
pub use normalize::normalize;
pub use scan::{ExtractionResult, ScanOptions, Scanner, aggregate, analyse_single_employee};
