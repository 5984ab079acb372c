//! The scanning pipeline: archive → per-message extraction → report

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::aggregate::{AggregateReport, Aggregator, EmployeeSummary, MessageCountPolicy};
use crate::classify::{Classifier, OperationKind, ResignationPolicy};
use crate::dates::{DateRange, resolve_timestamp};
use crate::error::Result;
use crate::extract::{CompanyExtractor, EmployeeExtractor};
use crate::mbox::read_archive;
use crate::message::StoredMessage;
use crate::normalize::normalize;

/// Options recognized by the scanning pipeline.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Inclusive lower bound on the send date.
    pub start_date: Option<NaiveDate>,

    /// Inclusive upper bound on the send date (its whole day counts).
    pub end_date: Option<NaiveDate>,

    /// Only consider messages whose From header contains this
    /// substring, case-insensitively.
    pub sender_filter: Option<String>,

    /// Single-employee mode: match the target name case-sensitively.
    pub case_sensitive: bool,

    /// How company message totals advance for multi-employee messages.
    pub count_policy: MessageCountPolicy,

    /// How overlapping resignation phrases are reported.
    pub resignation_policy: ResignationPolicy,
}

/// Everything extracted from one message.
///
/// Built fresh per message, folded into the aggregate, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Company named in the subject, when one was found.
    pub company: Option<String>,

    /// Distinct employee names found in subject and body.
    pub employees: BTreeSet<String>,

    /// Operations detected in the combined text.
    pub operations: BTreeSet<OperationKind>,

    /// Resolved send timestamp, when one was found.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Wires the normalizer, extractors and classifier into one pass.
#[derive(Debug, Clone)]
pub struct Scanner {
    companies: CompanyExtractor,
    employees: EmployeeExtractor,
    classifier: Classifier,
    range: DateRange,
    sender_filter: Option<String>,
}

impl Scanner {
    #[must_use]
    pub fn new(options: &ScanOptions) -> Self {
        Self {
            companies: CompanyExtractor::default(),
            employees: EmployeeExtractor::default(),
            classifier: Classifier::with_policy(options.resignation_policy),
            range: DateRange::from_dates(options.start_date, options.end_date),
            sender_filter: options.sender_filter.clone(),
        }
    }

    /// Whether the message passes the sender and date filters.
    ///
    /// A message with no resolvable timestamp is admitted only when no
    /// date bound was requested.
    #[must_use]
    pub fn admits(&self, message: &StoredMessage) -> bool {
        if let Some(filter) = &self.sender_filter
            && !message
                .from
                .to_lowercase()
                .contains(&filter.to_lowercase())
        {
            return false;
        }
        if self.range.is_bounded() {
            resolve_timestamp(message).is_some_and(|ts| self.range.contains(ts))
        } else {
            true
        }
    }

    /// Run extraction over one admitted message.
    #[must_use]
    pub fn scan_message(&self, message: &StoredMessage) -> ExtractionResult {
        let subject = normalize(&message.subject);
        let body = normalize(&message.body);
        let combined = format!("{subject} {body}");
        ExtractionResult {
            company: self.companies.extract(&subject),
            employees: self.employees.extract(&combined),
            operations: self.classifier.classify(&combined),
            timestamp: resolve_timestamp(message),
        }
    }
}

/// Scan the archive and build the full company → employee report.
pub fn aggregate(path: impl AsRef<Path>, options: &ScanOptions) -> Result<AggregateReport> {
    let scanner = Scanner::new(options);
    let mut aggregator = Aggregator::new(options.count_policy);
    for raw in read_archive(path.as_ref())? {
        let Some(message) = StoredMessage::parse(&raw) else {
            continue;
        };
        if !scanner.admits(&message) {
            continue;
        }
        let extraction = scanner.scan_message(&message);
        debug!(
            "Scanned message: {} -> {:?}",
            message.subject, extraction.company
        );
        aggregator.fold(
            extraction.company.as_deref(),
            &extraction.employees,
            &extraction.operations,
        );
    }
    Ok(aggregator.finish())
}

/// Count operations in messages that mention one target employee.
///
/// The name is matched as a substring of the subject, the formatted
/// To/Cc/Bcc recipients and the body, case-sensitively or not per
/// [`ScanOptions::case_sensitive`].
pub fn analyse_single_employee(
    path: impl AsRef<Path>,
    employee: &str,
    options: &ScanOptions,
) -> Result<EmployeeSummary> {
    let scanner = Scanner::new(options);
    let mut summary = EmployeeSummary::default();
    for raw in read_archive(path.as_ref())? {
        let Some(message) = StoredMessage::parse(&raw) else {
            continue;
        };
        if !scanner.admits(&message) {
            continue;
        }
        if !mentions_employee(&message, employee, options.case_sensitive) {
            continue;
        }
        let subject = normalize(&message.subject);
        let body = normalize(&message.body);
        let operations = scanner.classifier.classify(&format!("{subject} {body}"));
        summary.record(&operations);
    }
    Ok(summary)
}

fn mentions_employee(message: &StoredMessage, employee: &str, case_sensitive: bool) -> bool {
    let haystacks = [
        message.subject.as_str(),
        message.recipients.as_str(),
        message.body.as_str(),
    ];
    if case_sensitive {
        haystacks.iter().any(|h| h.contains(employee))
    } else {
        let needle = employee.to_lowercase();
        haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
    }
}
