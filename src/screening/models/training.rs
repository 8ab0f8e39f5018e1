use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::screening::domain::TrainingBatch;
use crate::screening::features::{FeatureError, FeaturePipeline};

use super::{TrainedModelSet, VoteForest};

/// Rows below which a fit is rejected rather than producing a forest that
/// memorized a handful of applicants.
const MIN_TRAINING_ROWS: usize = 10;


/// Error raised by the training pipeline. Any of these leaves the prior
/// model snapshot untouched.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("training batch has {found} usable rows, need at least {required}")]
    InsufficientData { found: usize, required: usize },
    #[error("feature preparation failed: {0}")]
    Features(#[from] FeatureError),
    #[error("forest fit failed: {0}")]
    Fit(String),
}

/// Fit the feature pipeline and all three forests over a labeled batch.
/// Pure CPU work; the engine runs it on the blocking pool.
pub(crate) fn fit_model_set(batch: &TrainingBatch) -> Result<TrainedModelSet, TrainingError> {
    if batch.len() < MIN_TRAINING_ROWS {
        return Err(TrainingError::InsufficientData {
            found: batch.len(),
            required: MIN_TRAINING_ROWS,
        });
    }

    let pipeline = FeaturePipeline::fit(batch)?;

    let mut rows = Vec::with_capacity(batch.len());
    let mut approval_labels = Vec::with_capacity(batch.len());
    let mut risk_labels = Vec::with_capacity(batch.len());
    let mut fraud_labels = Vec::with_capacity(batch.len());
    for example in &batch.examples {
        rows.push(pipeline.transform(&example.record)?);
        approval_labels.push(if example.approval_outcome { 1.0 } else { 0.0 });
        risk_labels.push(example.risk_score.clamp(0.0, 100.0));
        fraud_labels.push(if example.fraud_detected { 1.0 } else { 0.0 });
    }

    let matrix = DenseMatrix::from_2d_vec(&rows);

    let approval_model = fit_forest(&matrix, &approval_labels, "approval")?;
    let risk_model = fit_forest(&matrix, &risk_labels, "risk")?;
    let fraud_model = fit_forest(&matrix, &fraud_labels, "fraud")?;

    Ok(TrainedModelSet::new(
        approval_model,
        risk_model,
        fraud_model,
        pipeline,
        batch.len(),
    ))
}

fn fit_forest(
    matrix: &DenseMatrix<f64>,
    labels: &[f64],
    name: &'static str,
) -> Result<VoteForest, TrainingError> {
    // 64 depth-limited trees; fixed seed keeps retraining reproducible.
    let parameters = RandomForestRegressorParameters::default()
        .with_n_trees(64)
        .with_max_depth(8)
        .with_seed(7);

    RandomForestRegressor::fit(matrix, &labels.to_vec(), parameters)
        .map_err(|error| TrainingError::Fit(format!("{name} forest: {error}")))
}
