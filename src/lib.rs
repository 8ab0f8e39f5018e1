//! Risk screening and decision engine for rental applicants.
//!
//! The [`ScreeningEngine`] converts an [`ApplicantRecord`] and optional
//! third-party verification signals into a risk-weighted decision: a
//! composite score, a risk classification, an approval recommendation, a
//! confidence estimate, and operator-facing rationale. Without a trained
//! model set it degrades to a deterministic rule-based mode rather than
//! failing.

pub mod config;
pub mod screening;
pub mod telemetry;
pub mod verification;

pub use config::{AppConfig, AppEnvironment, ConfigError, ScreeningConfig, TelemetryConfig};
pub use screening::{
    ApplicantRecord, EmploymentType, Recommendation, ReferenceQuality, ReferenceType, RiskLevel,
    ScoringMode, ScreeningEngine, ScreeningInsights, ScreeningScore, SubScores, TrainingBatch,
    TrainingExample,
};
pub use verification::{VerificationBundle, VerificationOrchestrator};
