use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::task;
use tracing::{debug, info, warn};

use crate::config::ScreeningConfig;
use crate::verification::VerificationBundle;

use super::domain::{
    ApplicantRecord, Recommendation, RiskLevel, ScreeningInsights, ScreeningScore, TrainingBatch,
};
use super::insights;
use super::metrics::{InMemoryMetrics, MetricsSink, ScreeningSample};
use super::models::{training, ModelStore};
use super::scoring;

/// Applicant screening service: deterministic assessors, optional trained
/// models, and the fail-safe decision pipeline.
///
/// Explicitly constructed and owned by the caller; the engine keeps no
/// process-wide state. The only shared mutable state is the model snapshot,
/// which training and loading replace atomically.
pub struct ScreeningEngine {
    config: ScreeningConfig,
    models: ModelStore,
    metrics: Arc<dyn MetricsSink>,
}

impl ScreeningEngine {
    /// Build an engine and load the configured model artifact when one
    /// exists on disk; otherwise start in rule-based mode.
    pub fn new(config: ScreeningConfig) -> Self {
        Self::with_metrics(config, Arc::new(InMemoryMetrics::new()))
    }

    pub fn with_metrics(config: ScreeningConfig, metrics: Arc<dyn MetricsSink>) -> Self {
        let engine = Self {
            config,
            models: ModelStore::default(),
            metrics,
        };

        let artifact = engine.config.model_artifact_path.clone();
        if artifact.exists() {
            match engine.models.load(&artifact) {
                Ok(()) => info!(path = %artifact.display(), "model artifact loaded at start"),
                Err(error) => {
                    warn!(%error, path = %artifact.display(), "ignoring unreadable model artifact")
                }
            }
        } else {
            debug!(path = %artifact.display(), "no model artifact; running rule-based");
        }

        engine
    }

    pub fn is_trained(&self) -> bool {
        self.models.is_trained()
    }

    pub fn model_artifact_path(&self) -> &PathBuf {
        &self.config.model_artifact_path
    }

    /// Fit the three models and the feature pipeline over a labeled batch,
    /// then swap the new snapshot in atomically. On any failure the prior
    /// snapshot stays untouched and `false` is returned.
    pub async fn train(&self, batch: TrainingBatch) -> bool {
        let rows = batch.len();
        let fitted = task::spawn_blocking(move || training::fit_model_set(&batch)).await;

        match fitted {
            Ok(Ok(set)) => {
                self.models.replace(set);
                info!(rows, "model set trained and swapped in");
                true
            }
            Ok(Err(error)) => {
                warn!(%error, rows, "training failed; keeping prior model set");
                false
            }
            Err(error) => {
                warn!(%error, rows, "training task aborted; keeping prior model set");
                false
            }
        }
    }

    /// Score one applicant. Never fails: internal errors surface as the
    /// degraded fail-safe-to-decline result, and every completed call is
    /// reported to the metrics sink.
    pub async fn screen_applicant(&self, record: &ApplicantRecord) -> ScreeningScore {
        let started = Instant::now();
        let score = self.score_on_worker(record).await;
        self.record_sample(&score, started);
        score
    }

    /// Score one applicant with verification results folded in. Verified
    /// facts enrich the record before scoring; a mandatory-decline finding
    /// overrides the classified outcome; unavailable channels lower
    /// confidence instead of failing the call.
    pub async fn screen_verified(
        &self,
        record: &ApplicantRecord,
        bundle: &VerificationBundle,
    ) -> ScreeningScore {
        let started = Instant::now();
        let enriched = enrich_record(record, bundle);
        let mut score = self.score_on_worker(&enriched).await;

        if bundle.mandatory_decline() {
            score.risk_level = RiskLevel::Critical;
            score.recommendation = Recommendation::Decline;
        }

        let unavailable = bundle.unavailable_channels();
        if unavailable > 0 {
            score.confidence = (score.confidence - 0.1 * unavailable as f64).max(0.1);
        }

        self.record_sample(&score, started);
        score
    }

    /// Derive operator-facing narrative for a completed screening pass.
    pub async fn generate_insights(
        &self,
        record: &ApplicantRecord,
        score: &ScreeningScore,
    ) -> ScreeningInsights {
        let snapshot = self.models.snapshot();
        let record = record.clone();
        let score = score.clone();

        match task::spawn_blocking(move || {
            insights::generate(&record, &score, snapshot.as_deref())
        })
        .await
        {
            Ok(generated) => generated,
            Err(error) => {
                warn!(%error, "insights task aborted; regenerating without models");
                ScreeningInsights {
                    strengths: Vec::new(),
                    concerns: Vec::new(),
                    recommendations: Vec::new(),
                    similar_cases: Vec::new(),
                    probability_of_success: 0.0,
                }
            }
        }
    }

    /// Persist the current model snapshot as one serialized artifact.
    pub async fn save_model_set(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref().to_path_buf();
        match self.models.save(&path) {
            Ok(()) => {
                info!(path = %path.display(), "model artifact saved");
                true
            }
            Err(error) => {
                warn!(%error, path = %path.display(), "unable to save model artifact");
                false
            }
        }
    }

    /// Load a serialized artifact and swap it in atomically. On failure the
    /// current snapshot stays untouched.
    pub async fn load_model_set(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref().to_path_buf();
        match self.models.load(&path) {
            Ok(()) => {
                info!(path = %path.display(), "model artifact loaded");
                true
            }
            Err(error) => {
                warn!(%error, path = %path.display(), "unable to load model artifact");
                false
            }
        }
    }

    /// Dispatch the CPU-bound scoring pass to the blocking worker pool so
    /// concurrent screenings never stall the async runtime.
    async fn score_on_worker(&self, record: &ApplicantRecord) -> ScreeningScore {
        let snapshot = self.models.snapshot();
        let record = record.clone();

        match task::spawn_blocking(move || scoring::score_applicant(&record, snapshot.as_deref()))
            .await
        {
            Ok(score) => score,
            Err(error) => {
                warn!(%error, "scoring task aborted; substituting degraded result");
                ScreeningScore::degraded()
            }
        }
    }

    fn record_sample(&self, score: &ScreeningScore, started: Instant) {
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.metrics
            .record(ScreeningSample::from_score(score, latency_ms));
    }
}

/// Copy verified third-party facts onto the record before scoring. Bureau
/// and document-pipeline figures are authoritative over self-reported ones.
fn enrich_record(record: &ApplicantRecord, bundle: &VerificationBundle) -> ApplicantRecord {
    let mut enriched = record.clone();

    if let Some(report) = &bundle.credit {
        enriched.credit_score = Some(f64::from(report.credit_score));
    }

    if let Some(documents) = &bundle.documents {
        enriched.document_quality_score = Some((documents.overall_score * 100.0).clamp(0.0, 100.0));
    }

    enriched
}
