use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Recommendation, ScreeningScore};

/// One completed screening, as reported to the metrics sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSample {
    pub day: NaiveDate,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub latency_ms: f64,
}

impl ScreeningSample {
    pub(crate) fn from_score(score: &ScreeningScore, latency_ms: f64) -> Self {
        Self {
            day: Utc::now().date_naive(),
            recommendation: score.recommendation,
            confidence: score.confidence,
            latency_ms,
        }
    }
}

/// Outbound observability hook. The engine records exactly one sample per
/// completed screening, degraded results included.
pub trait MetricsSink: Send + Sync {
    fn record(&self, sample: ScreeningSample);
}

/// Daily rollup of screening activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub day: NaiveDate,
    pub applications_screened: u64,
    pub approvals: u64,
    pub conditional_approvals: u64,
    pub cosigner_required: u64,
    pub declines: u64,
    pub average_latency_ms: f64,
    pub average_confidence: f64,
}

impl DailyMetrics {
    fn new(day: NaiveDate) -> Self {
        Self {
            day,
            applications_screened: 0,
            approvals: 0,
            conditional_approvals: 0,
            cosigner_required: 0,
            declines: 0,
            average_latency_ms: 0.0,
            average_confidence: 0.0,
        }
    }

    fn absorb(&mut self, sample: &ScreeningSample) {
        let previous = self.applications_screened as f64;
        self.applications_screened += 1;
        let count = self.applications_screened as f64;

        match sample.recommendation {
            Recommendation::Approve => self.approvals += 1,
            Recommendation::ConditionalApprove => self.conditional_approvals += 1,
            Recommendation::RequireCosigner => self.cosigner_required += 1,
            Recommendation::Decline => self.declines += 1,
        }

        self.average_latency_ms = (self.average_latency_ms * previous + sample.latency_ms) / count;
        self.average_confidence =
            (self.average_confidence * previous + sample.confidence) / count;
    }
}

/// Default in-process sink keeping per-day rollups.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    days: Mutex<BTreeMap<NaiveDate, DailyMetrics>>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rollup for one day, if any screening landed on it.
    pub fn for_day(&self, day: NaiveDate) -> Option<DailyMetrics> {
        self.days
            .lock()
            .expect("metrics mutex poisoned")
            .get(&day)
            .cloned()
    }

    /// All rollups in day order.
    pub fn all(&self) -> Vec<DailyMetrics> {
        self.days
            .lock()
            .expect("metrics mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record(&self, sample: ScreeningSample) {
        let mut days = self.days.lock().expect("metrics mutex poisoned");
        days.entry(sample.day)
            .or_insert_with(|| DailyMetrics::new(sample.day))
            .absorb(&sample);
    }
}
