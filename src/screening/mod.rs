//! Applicant risk screening: deterministic sub-score assessors, fraud
//! blending, trained-model inference with a rule-based fallback, and the
//! threshold decision classifier.

pub mod domain;
pub mod engine;
pub(crate) mod features;
pub(crate) mod insights;
pub mod metrics;
pub mod models;
pub(crate) mod scoring;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantRecord, BatchLoadError, EmploymentType, Recommendation, ReferenceQuality,
    ReferenceType, RiskLevel, ScoringMode, ScreeningInsights, ScreeningScore, SubScores,
    TrainingBatch, TrainingExample,
};
pub use engine::ScreeningEngine;
pub use features::FeaturePipeline;
pub use metrics::{DailyMetrics, InMemoryMetrics, MetricsSink, ScreeningSample};
pub use models::{training::TrainingError, ModelError, TrainedModelSet};
pub use scoring::FraudIndicator;
