use chrono::NaiveDate;

use crate::screening::domain::Recommendation;
use crate::screening::metrics::{InMemoryMetrics, MetricsSink, ScreeningSample};

fn sample(
    day: NaiveDate,
    recommendation: Recommendation,
    confidence: f64,
    latency_ms: f64,
) -> ScreeningSample {
    ScreeningSample {
        day,
        recommendation,
        confidence,
        latency_ms,
    }
}

#[test]
fn rollup_counts_decisions_by_type() {
    let metrics = InMemoryMetrics::new();
    let day = NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date");

    metrics.record(sample(day, Recommendation::Approve, 0.9, 12.0));
    metrics.record(sample(day, Recommendation::Approve, 0.8, 10.0));
    metrics.record(sample(day, Recommendation::Decline, 0.4, 8.0));
    metrics.record(sample(day, Recommendation::RequireCosigner, 0.6, 6.0));
    metrics.record(sample(day, Recommendation::ConditionalApprove, 0.7, 4.0));

    let rollup = metrics.for_day(day).expect("rollup exists");
    assert_eq!(rollup.applications_screened, 5);
    assert_eq!(rollup.approvals, 2);
    assert_eq!(rollup.declines, 1);
    assert_eq!(rollup.cosigner_required, 1);
    assert_eq!(rollup.conditional_approvals, 1);
}

#[test]
fn rollup_keeps_running_averages() {
    let metrics = InMemoryMetrics::new();
    let day = NaiveDate::from_ymd_opt(2026, 8, 4).expect("valid date");

    metrics.record(sample(day, Recommendation::Approve, 0.9, 20.0));
    metrics.record(sample(day, Recommendation::Decline, 0.5, 10.0));

    let rollup = metrics.for_day(day).expect("rollup exists");
    assert!((rollup.average_confidence - 0.7).abs() < 1e-9);
    assert!((rollup.average_latency_ms - 15.0).abs() < 1e-9);
}

#[test]
fn days_accumulate_independently() {
    let metrics = InMemoryMetrics::new();
    let monday = NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date");
    let tuesday = NaiveDate::from_ymd_opt(2026, 8, 4).expect("valid date");

    metrics.record(sample(monday, Recommendation::Approve, 0.9, 5.0));
    metrics.record(sample(tuesday, Recommendation::Decline, 0.3, 7.0));

    assert_eq!(metrics.all().len(), 2);
    assert_eq!(metrics.for_day(monday).expect("monday").approvals, 1);
    assert_eq!(metrics.for_day(tuesday).expect("tuesday").declines, 1);
}
