//! Employment-event classification over normalized text

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Closed set of employment events recognized in message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Hire
    #[serde(rename = "ASSUNZIONE")]
    Assunzione,

    /// Contract extension
    #[serde(rename = "PROROGA")]
    Proroga,

    /// Contract change
    #[serde(rename = "VARIAZIONE")]
    Variazione,

    /// Resignation
    #[serde(rename = "DIMISSIONE")]
    Dimissione,

    /// Resignation filed through the online channel
    #[serde(rename = "DIMISSIONE CLIC LAVORO")]
    DimissioneClicLavoro,

    /// Dismissal
    #[serde(rename = "LICENZIAMENTO")]
    Licenziamento,
}

impl OperationKind {
    /// Every kind, in report order.
    pub const ALL: [Self; 6] = [
        Self::Assunzione,
        Self::Proroga,
        Self::Variazione,
        Self::Dimissione,
        Self::DimissioneClicLavoro,
        Self::Licenziamento,
    ];

    /// The label used in rendered reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assunzione => "ASSUNZIONE",
            Self::Proroga => "PROROGA",
            Self::Variazione => "VARIAZIONE",
            Self::Dimissione => "DIMISSIONE",
            Self::DimissioneClicLavoro => "DIMISSIONE CLIC LAVORO",
            Self::Licenziamento => "LICENZIAMENTO",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How to report a plain resignation when the online-channel phrase is
/// also present in the same text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResignationPolicy {
    /// Suppress the plain kind only where its match sits inside the
    /// specific phrase. An independent plain occurrence elsewhere in
    /// the text still counts, so both kinds can coexist in one
    /// message.
    #[default]
    SpanScoped,

    /// Any specific-channel match suppresses the plain kind for the
    /// whole message.
    Exclusive,
}

/// One entry of the ordered pattern table.
#[derive(Debug, Clone)]
pub struct OperationPattern {
    pub kind: OperationKind,
    pub pattern: Regex,
}

impl OperationPattern {
    #[must_use]
    pub const fn new(kind: OperationKind, pattern: Regex) -> Self {
        Self { kind, pattern }
    }
}

/// Ordered pattern-matching classifier.
///
/// Patterns are whole-word, case-insensitive and stem-tolerant, so
/// inflected forms (`PROROGHE`, `DIMESSO`, `licenziata`) match. The
/// table is passed in at construction; more specific patterns come
/// before their super-strings.
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: Vec<OperationPattern>,
    policy: ResignationPolicy,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(standard_patterns(), ResignationPolicy::default())
    }
}

impl Classifier {
    #[must_use]
    pub const fn new(patterns: Vec<OperationPattern>, policy: ResignationPolicy) -> Self {
        Self { patterns, policy }
    }

    /// The standard table under the given overlap policy.
    #[must_use]
    pub fn with_policy(policy: ResignationPolicy) -> Self {
        Self::new(standard_patterns(), policy)
    }

    /// Detect every operation mentioned in the text.
    ///
    /// Never fails; text mentioning none of them yields the empty set.
    #[must_use]
    pub fn classify(&self, text: &str) -> BTreeSet<OperationKind> {
        let specific_spans: Vec<(usize, usize)> = self
            .patterns
            .iter()
            .filter(|entry| entry.kind == OperationKind::DimissioneClicLavoro)
            .flat_map(|entry| entry.pattern.find_iter(text).map(|m| (m.start(), m.end())))
            .collect();

        let mut found = BTreeSet::new();
        for entry in &self.patterns {
            let hit = if entry.kind == OperationKind::Dimissione {
                match self.policy {
                    ResignationPolicy::Exclusive => {
                        specific_spans.is_empty() && entry.pattern.is_match(text)
                    }
                    ResignationPolicy::SpanScoped => entry.pattern.find_iter(text).any(|m| {
                        !specific_spans
                            .iter()
                            .any(|&(start, end)| m.start() >= start && m.end() <= end)
                    }),
                }
            } else {
                entry.pattern.is_match(text)
            };
            if hit {
                found.insert(entry.kind);
            }
        }
        found
    }
}

/// The standard ordered table: the online-channel resignation first so
/// it wins its lexical span over the plain resignation stem.
fn standard_patterns() -> Vec<OperationPattern> {
    let entry = |kind, pattern: &str| {
        OperationPattern::new(kind, Regex::new(&format!("(?i){pattern}")).unwrap())
    };
    vec![
        entry(
            OperationKind::DimissioneClicLavoro,
            r"\bDIMISSIONE(?:\s+CON)?\s+CLIC\s*LAVORO\b",
        ),
        entry(OperationKind::Dimissione, r"\bDIMISSION\w*\b|\bDIMESS[OA]\b"),
        entry(OperationKind::Proroga, r"\bPROROG\w*\b"),
        entry(OperationKind::Variazione, r"\bVARIAZION\w*\b"),
        entry(
            OperationKind::Assunzione,
            r"\bASSUNZION\w*\b|\bASSUNT[OA]\b",
        ),
        entry(
            OperationKind::Licenziamento,
            r"\bLICENZIAMENT\w*\b|\bLICENZIAT[OA]\b",
        ),
    ]
}
