//! Folding per-message extractions into the cumulative report

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::classify::OperationKind;

/// Key used when a subject yields no company name.
pub const UNKNOWN_COMPANY: &str = "UNKNOWN_COMPANY";

/// Key used when a message yields no employee name.
pub const UNKNOWN_EMPLOYEE: &str = "UNKNOWN_EMPLOYEE";

/// How the per-company message total advances when one message names
/// several employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCountPolicy {
    /// One message adds 1 to its company, however many employees it
    /// names.
    #[default]
    PerMessage,

    /// One message adds 1 per attributed employee.
    PerEmployee,
}

/// Counters for one employee under one company.
///
/// `counts` always holds an entry for every [`OperationKind`], so
/// consumers never look up a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStats {
    pub total_messages: u64,
    pub counts: BTreeMap<OperationKind, u64>,
}

impl Default for EmployeeStats {
    fn default() -> Self {
        Self {
            total_messages: 0,
            counts: zeroed_counts(),
        }
    }
}

/// Counters for one company, with the per-employee breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyStats {
    pub total_messages: u64,
    pub employees: BTreeMap<String, EmployeeStats>,
}

/// The cumulative company → employee → counters mapping.
///
/// Keyed with ordered maps so iteration (and any rendering built on
/// it) is deterministic without a sort pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub companies: BTreeMap<String, CompanyStats>,
}

impl AggregateReport {
    /// Field-wise sum merge: union of company and employee keys, all
    /// counters added. Merging reports from disjoint shards of an
    /// archive equals scanning the whole archive in one pass.
    pub fn merge(&mut self, other: Self) {
        for (company, stats) in other.companies {
            let target = self.companies.entry(company).or_default();
            target.total_messages += stats.total_messages;
            for (employee, incoming) in stats.employees {
                let record = target.employees.entry(employee).or_default();
                record.total_messages += incoming.total_messages;
                for (kind, count) in incoming.counts {
                    *record.counts.entry(kind).or_insert(0) += count;
                }
            }
        }
    }
}

/// Builds an [`AggregateReport`] incrementally over one pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    report: AggregateReport,
    policy: MessageCountPolicy,
}

impl Aggregator {
    #[must_use]
    pub fn new(policy: MessageCountPolicy) -> Self {
        Self {
            report: AggregateReport::default(),
            policy,
        }
    }

    /// Fold one message's extraction into the running report.
    ///
    /// Each distinct attributed employee gains exactly one message
    /// count, plus one count per detected operation. Missing names
    /// fall back to the sentinels, never to a missing key.
    pub fn fold(
        &mut self,
        company: Option<&str>,
        employees: &BTreeSet<String>,
        operations: &BTreeSet<OperationKind>,
    ) {
        let company = match company {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_COMPANY,
        };
        let names: Vec<&str> = if employees.is_empty() {
            vec![UNKNOWN_EMPLOYEE]
        } else {
            employees.iter().map(String::as_str).collect()
        };

        let stats = self.report.companies.entry(company.to_string()).or_default();
        if self.policy == MessageCountPolicy::PerMessage {
            stats.total_messages += 1;
        }
        for name in names {
            if self.policy == MessageCountPolicy::PerEmployee {
                stats.total_messages += 1;
            }
            let record = stats.employees.entry(name.to_string()).or_default();
            record.total_messages += 1;
            for &kind in operations {
                *record.counts.entry(kind).or_insert(0) += 1;
            }
        }
    }

    /// Finish the pass and hand the report back.
    #[must_use]
    pub fn finish(self) -> AggregateReport {
        self.report
    }
}

/// Flat counters for single-employee analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub total_messages: u64,
    pub counts: BTreeMap<OperationKind, u64>,
}

impl Default for EmployeeSummary {
    fn default() -> Self {
        Self {
            total_messages: 0,
            counts: zeroed_counts(),
        }
    }
}

impl EmployeeSummary {
    /// Count one matching message and its detected operations.
    pub fn record(&mut self, operations: &BTreeSet<OperationKind>) {
        self.total_messages += 1;
        for &kind in operations {
            *self.counts.entry(kind).or_insert(0) += 1;
        }
    }
}

fn zeroed_counts() -> BTreeMap<OperationKind, u64> {
    OperationKind::ALL.iter().map(|&kind| (kind, 0)).collect()
}
