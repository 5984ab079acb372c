use std::collections::BTreeSet;

use mbox_stats::{
    AggregateReport, Aggregator, EmployeeSummary, MessageCountPolicy, OperationKind,
    UNKNOWN_COMPANY, UNKNOWN_EMPLOYEE,
};

fn employees(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(ToString::to_string).collect()
}

fn operations(kinds: &[OperationKind]) -> BTreeSet<OperationKind> {
    kinds.iter().copied().collect()
}

#[test]
fn test_fold_counts_message_and_operations() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::default());
    aggregator.fold(
        Some("ACME"),
        &employees(&["MARIO ROSSI"]),
        &operations(&[OperationKind::Proroga]),
    );
    let report = aggregator.finish();

    let stats = &report.companies["ACME"];
    assert_eq!(stats.total_messages, 1);
    let record = &stats.employees["MARIO ROSSI"];
    assert_eq!(record.total_messages, 1);
    assert_eq!(record.counts[&OperationKind::Proroga], 1);
    assert_eq!(record.counts[&OperationKind::Assunzione], 0);
}

#[test]
fn test_counts_zero_initialized_for_every_kind() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::default());
    aggregator.fold(Some("ACME"), &employees(&["MARIO ROSSI"]), &BTreeSet::new());
    let report = aggregator.finish();

    let record = &report.companies["ACME"].employees["MARIO ROSSI"];
    for kind in OperationKind::ALL {
        assert_eq!(record.counts[&kind], 0);
    }
}

#[test]
fn test_sentinels_for_missing_names() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::default());
    aggregator.fold(None, &BTreeSet::new(), &operations(&[OperationKind::Variazione]));
    aggregator.fold(Some(""), &BTreeSet::new(), &BTreeSet::new());
    let report = aggregator.finish();

    let stats = &report.companies[UNKNOWN_COMPANY];
    assert_eq!(stats.total_messages, 2);
    let record = &stats.employees[UNKNOWN_EMPLOYEE];
    assert_eq!(record.total_messages, 2);
    assert_eq!(record.counts[&OperationKind::Variazione], 1);
}

#[test]
fn test_multi_employee_message_counts_each_once() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::PerMessage);
    aggregator.fold(
        Some("HM TREVISO"),
        &employees(&["BITTOLO MATTEO", "GALLEGOS SALGUERO JEAN CARLOS"]),
        &operations(&[OperationKind::Proroga]),
    );
    let report = aggregator.finish();

    let stats = &report.companies["HM TREVISO"];
    assert_eq!(stats.total_messages, 1);
    for record in stats.employees.values() {
        assert_eq!(record.total_messages, 1);
        assert_eq!(record.counts[&OperationKind::Proroga], 1);
    }
}

#[test]
fn test_per_employee_count_policy() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::PerEmployee);
    aggregator.fold(
        Some("HM TREVISO"),
        &employees(&["BITTOLO MATTEO", "GALLEGOS SALGUERO JEAN CARLOS"]),
        &operations(&[OperationKind::Proroga]),
    );
    let report = aggregator.finish();

    assert_eq!(report.companies["HM TREVISO"].total_messages, 2);
}

#[test]
fn test_operation_counts_bounded_by_messages() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::default());
    for _ in 0..3 {
        aggregator.fold(
            Some("ACME"),
            &employees(&["MARIO ROSSI"]),
            &operations(&[OperationKind::Proroga, OperationKind::Variazione]),
        );
    }
    let report = aggregator.finish();

    let record = &report.companies["ACME"].employees["MARIO ROSSI"];
    for count in record.counts.values() {
        assert!(*count <= record.total_messages);
    }
}

#[test]
fn test_merge_equals_single_pass() {
    let folds: Vec<(Option<&str>, Vec<&str>, Vec<OperationKind>)> = vec![
        (Some("ACME"), vec!["MARIO ROSSI"], vec![OperationKind::Assunzione]),
        (Some("HM TREVISO"), vec!["BITTOLO MATTEO"], vec![OperationKind::Proroga]),
        (None, vec![], vec![OperationKind::Licenziamento]),
        (Some("ACME"), vec!["MARIO ROSSI", "ANNA BIANCHI"], vec![OperationKind::Variazione]),
    ];

    let mut single = Aggregator::new(MessageCountPolicy::default());
    for (company, names, kinds) in &folds {
        single.fold(*company, &employees(names), &operations(kinds));
    }

    let (left, right) = folds.split_at(2);
    let mut first = Aggregator::new(MessageCountPolicy::default());
    for (company, names, kinds) in left {
        first.fold(*company, &employees(names), &operations(kinds));
    }
    let mut second = Aggregator::new(MessageCountPolicy::default());
    for (company, names, kinds) in right {
        second.fold(*company, &employees(names), &operations(kinds));
    }

    let mut merged = first.finish();
    merged.merge(second.finish());
    assert_eq!(merged, single.finish());
}

#[test]
fn test_merge_into_empty_report() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::default());
    aggregator.fold(Some("ACME"), &employees(&["MARIO ROSSI"]), &BTreeSet::new());
    let built = aggregator.finish();

    let mut empty = AggregateReport::default();
    empty.merge(built.clone());
    assert_eq!(empty, built);
}

#[test]
fn test_employee_summary_record() {
    let mut summary = EmployeeSummary::default();
    summary.record(&operations(&[OperationKind::Proroga]));
    summary.record(&operations(&[OperationKind::Proroga, OperationKind::Dimissione]));

    assert_eq!(summary.total_messages, 2);
    assert_eq!(summary.counts[&OperationKind::Proroga], 2);
    assert_eq!(summary.counts[&OperationKind::Dimissione], 1);
    assert_eq!(summary.counts[&OperationKind::Assunzione], 0);
}

#[test]
fn test_report_serializes_with_operation_labels() {
    let mut aggregator = Aggregator::new(MessageCountPolicy::default());
    aggregator.fold(
        Some("ACME"),
        &employees(&["MARIO ROSSI"]),
        &operations(&[OperationKind::DimissioneClicLavoro]),
    );
    let report = aggregator.finish();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"DIMISSIONE CLIC LAVORO\":1"));
    assert!(json.contains("\"ASSUNZIONE\":0"));
    assert!(json.contains("\"total_messages\":1"));
}
