//! Trained model set, its atomic snapshot store, and artifact persistence.

pub(crate) mod training;

use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::features::FeaturePipeline;

/// Depth-limited random forest over 0/1 labels. The mean tree vote is the
/// positive-class probability, which is exactly what an ensemble
/// classifier's averaged votes would report.
pub(crate) type VoteForest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Error raised by model persistence and inference plumbing.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unable to access model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is not a valid serialized model set: {0}")]
    Format(#[from] serde_json::Error),
}

/// Immutable bundle of the three trained models plus the fitted feature
/// pipeline. Replaced wholesale by training or loading, never mutated.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainedModelSet {
    approval_model: VoteForest,
    risk_model: VoteForest,
    fraud_model: VoteForest,
    pipeline: FeaturePipeline,
    trained_at: DateTime<Utc>,
    training_rows: usize,
}

impl TrainedModelSet {
    pub(crate) fn new(
        approval_model: VoteForest,
        risk_model: VoteForest,
        fraud_model: VoteForest,
        pipeline: FeaturePipeline,
        training_rows: usize,
    ) -> Self {
        Self {
            approval_model,
            risk_model,
            fraud_model,
            pipeline,
            trained_at: Utc::now(),
            training_rows,
        }
    }

    pub(crate) fn pipeline(&self) -> &FeaturePipeline {
        &self.pipeline
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Probability in [0, 1] that the applicant's submission is fraudulent.
    pub(crate) fn fraud_probability(&self, features: &[f64]) -> Option<f64> {
        predict_one(&self.fraud_model, features).map(|p| p.clamp(0.0, 1.0))
    }

    /// Max class probability of the approval vote: how certain the forest is
    /// either way about the approval outcome.
    pub(crate) fn approval_confidence(&self, features: &[f64]) -> Option<f64> {
        predict_one(&self.approval_model, features)
            .map(|p| p.clamp(0.0, 1.0))
            .map(|p| p.max(1.0 - p))
    }

    /// Regressed risk estimate on the training label scale (0-100).
    pub(crate) fn risk_estimate(&self, features: &[f64]) -> Option<f64> {
        predict_one(&self.risk_model, features).map(|value| value.clamp(0.0, 100.0))
    }

    fn to_artifact(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_artifact(raw: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn predict_one(forest: &VoteForest, features: &[f64]) -> Option<f64> {
    if features.is_empty() {
        return None;
    }
    let matrix = DenseMatrix::from_2d_vec(&vec![features.to_vec()]);
    match forest.predict(&matrix) {
        Ok(predictions) => predictions.first().copied(),
        Err(error) => {
            tracing::warn!(%error, "forest prediction failed; using defaults");
            None
        }
    }
}

/// Shared holder for the current model snapshot. Inference clones the Arc
/// out under a read lock; training and loading swap the whole Arc in under
/// a short write lock, so readers always observe a fully-trained set.
#[derive(Debug, Default)]
pub(crate) struct ModelStore {
    inner: RwLock<Option<Arc<TrainedModelSet>>>,
}

impl ModelStore {
    pub(crate) fn snapshot(&self) -> Option<Arc<TrainedModelSet>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub(crate) fn replace(&self, set: TrainedModelSet) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Arc::new(set));
    }

    pub(crate) fn is_trained(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Serialize the current snapshot to a single artifact file.
    pub(crate) fn save(&self, path: &Path) -> Result<(), ModelError> {
        let snapshot = self.snapshot().ok_or_else(|| {
            ModelError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no trained model set to save",
            ))
        })?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, snapshot.to_artifact()?)?;
        Ok(())
    }

    /// Load an artifact and swap it in atomically. On failure the current
    /// snapshot is left untouched.
    pub(crate) fn load(&self, path: &Path) -> Result<(), ModelError> {
        let raw = fs::read_to_string(path)?;
        let set = TrainedModelSet::from_artifact(&raw)?;
        self.replace(set);
        Ok(())
    }
}
