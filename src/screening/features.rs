use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, TrainingBatch};

/// Order matters: matrices handed to the model layer use these columns in
/// this exact sequence, raw columns first, derived columns last.
pub(crate) const NUMERIC_COLUMNS: [&str; 11] = [
    "credit_score",
    "annual_income",
    "monthly_rent",
    "debt_to_income_ratio",
    "payment_history_score",
    "claimed_savings",
    "employment_length_months",
    "rental_history_length",
    "previous_evictions",
    "late_payment_count",
    "number_of_references",
];

pub(crate) const DERIVED_COLUMNS: [&str; 2] = ["income_to_rent_ratio", "credit_score_normalized"];

pub(crate) const CATEGORICAL_COLUMNS: [&str; 2] = ["employment_type", "reference_quality"];

/// Error raised while preparing features. The engine treats any of these as
/// "no feature vector" and falls back to heuristic defaults.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("pipeline fitted over an empty batch")]
    EmptyBatch,
    #[error("non-finite value produced for column {column}")]
    NonFinite { column: &'static str },
}

/// Category labels observed at fit time, in sorted order. Unseen labels at
/// inference encode into the one-past-last bucket; the encoder is never
/// refit outside training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LabelEncoder {
    labels: Vec<String>,
}

impl LabelEncoder {
    fn fit(mut observed: Vec<String>) -> Self {
        observed.sort();
        observed.dedup();
        Self { labels: observed }
    }

    pub(crate) fn encode(&self, label: &str) -> f64 {
        match self.labels.binary_search_by(|known| known.as_str().cmp(label)) {
            Ok(index) => index as f64,
            Err(_) => self.labels.len() as f64,
        }
    }
}

/// Per-column location/spread captured at fit time for z-score scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ColumnStats {
    pub(crate) median: f64,
    pub(crate) mean: f64,
    pub(crate) std_dev: f64,
}

/// Fitted feature preparation state: imputation medians, label encoders,
/// and the scaler. Fit once during training, reused read-only at inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePipeline {
    numeric: BTreeMap<String, ColumnStats>,
    encoders: BTreeMap<String, LabelEncoder>,
}

impl FeaturePipeline {
    /// Fit imputation, encoding, and scaling statistics over a batch.
    pub(crate) fn fit(batch: &TrainingBatch) -> Result<Self, FeatureError> {
        if batch.is_empty() {
            return Err(FeatureError::EmptyBatch);
        }

        let mut raw_rows: Vec<Vec<Option<f64>>> = Vec::with_capacity(batch.len());
        for example in &batch.examples {
            raw_rows.push(raw_numeric_row(&example.record));
        }

        let mut numeric = BTreeMap::new();
        for (index, column) in NUMERIC_COLUMNS
            .iter()
            .chain(DERIVED_COLUMNS.iter())
            .enumerate()
        {
            let present: Vec<f64> = raw_rows
                .iter()
                .filter_map(|row| row[index])
                .filter(|value| value.is_finite())
                .collect();
            numeric.insert(column.to_string(), fit_column(*column, present)?);
        }

        let mut encoders = BTreeMap::new();
        encoders.insert(
            "employment_type".to_string(),
            LabelEncoder::fit(
                batch
                    .examples
                    .iter()
                    .filter_map(|example| example.record.employment_type)
                    .map(|value| value.label().to_string())
                    .collect(),
            ),
        );
        encoders.insert(
            "reference_quality".to_string(),
            LabelEncoder::fit(
                batch
                    .examples
                    .iter()
                    .filter_map(|example| example.record.reference_quality)
                    .map(|value| value.label().to_string())
                    .collect(),
            ),
        );

        Ok(Self { numeric, encoders })
    }

    /// Produce a model-ready vector for one record using fitted statistics
    /// only. Column order: scaled numerics, scaled derived, encoded
    /// categoricals.
    pub(crate) fn transform(&self, record: &ApplicantRecord) -> Result<Vec<f64>, FeatureError> {
        let raw = raw_numeric_row(record);
        let mut features = Vec::with_capacity(raw.len() + CATEGORICAL_COLUMNS.len());

        for (index, column) in NUMERIC_COLUMNS
            .iter()
            .chain(DERIVED_COLUMNS.iter())
            .enumerate()
        {
            let stats = self
                .numeric
                .get(*column)
                .ok_or(FeatureError::NonFinite { column: *column })?;
            let value = raw[index]
                .filter(|value| value.is_finite())
                .unwrap_or(stats.median);
            let scaled = (value - stats.mean) / stats.std_dev;
            if !scaled.is_finite() {
                return Err(FeatureError::NonFinite { column: *column });
            }
            features.push(scaled);
        }

        let employment = record
            .employment_type
            .map(|value| value.label())
            .unwrap_or("other");
        features.push(self.encoders["employment_type"].encode(employment));

        let quality = record
            .reference_quality
            .map(|value| value.label())
            .unwrap_or("none");
        features.push(self.encoders["reference_quality"].encode(quality));

        Ok(features)
    }

    pub(crate) fn feature_width(&self) -> usize {
        NUMERIC_COLUMNS.len() + DERIVED_COLUMNS.len() + CATEGORICAL_COLUMNS.len()
    }
}

fn fit_column(column: &'static str, mut present: Vec<f64>) -> Result<ColumnStats, FeatureError> {
    if present.is_empty() {
        // Column absent from the whole batch: impute zero, pass through.
        return Ok(ColumnStats {
            median: 0.0,
            mean: 0.0,
            std_dev: 1.0,
        });
    }

    present.sort_by(f64::total_cmp);
    let median = if present.len() % 2 == 1 {
        present[present.len() / 2]
    } else {
        let upper = present.len() / 2;
        (present[upper - 1] + present[upper]) / 2.0
    };

    let mean = present.iter().sum::<f64>() / present.len() as f64;
    let variance = present
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / present.len() as f64;
    let std_dev = variance.sqrt();
    let std_dev = if std_dev > f64::EPSILON { std_dev } else { 1.0 };

    if !median.is_finite() || !mean.is_finite() || !std_dev.is_finite() {
        return Err(FeatureError::NonFinite { column });
    }

    Ok(ColumnStats {
        median,
        mean,
        std_dev,
    })
}

/// Raw (unimputed, unscaled) numeric row including derived ratios.
fn raw_numeric_row(record: &ApplicantRecord) -> Vec<Option<f64>> {
    let income_to_rent = match (record.annual_income, record.monthly_rent) {
        (Some(income), Some(rent)) if rent > 0.0 => Some(income / (rent * 12.0)),
        _ => None,
    };
    let credit_normalized = record.credit_score.map(|score| (score - 300.0) / 550.0);

    vec![
        record.credit_score,
        record.annual_income,
        record.monthly_rent,
        record.debt_to_income_ratio,
        record.payment_history_score,
        record.claimed_savings,
        record.employment_length_months,
        record.rental_history_length,
        Some(f64::from(record.previous_evictions)),
        Some(f64::from(record.late_payment_count)),
        Some(f64::from(record.number_of_references)),
        income_to_rent,
        credit_normalized,
    ]
}
