use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::screening::domain::ApplicantRecord;

/// Model probability substituted when no trained fraud model is available
/// to the blend (heuristic-only screening still needs a second term).
pub(crate) const DEFAULT_MODEL_PROBABILITY: f64 = 0.1;

const HEURISTIC_WEIGHT: f64 = 0.3;
const MODEL_WEIGHT: f64 = 0.7;

/// Rule-based red flags scanned on every screening pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FraudIndicator {
    /// Claimed savings exceed twice the declared annual income.
    InflatedSavings,
    /// Six-figure income declared within the first three months of tenure.
    IncomeTenureMismatch,
    /// Phone number collapses to two or fewer distinct digits.
    SuspiciousPhone,
    /// Submitted documents scored below the quality floor.
    LowDocumentQuality,
}

impl FraudIndicator {
    pub const fn describe(self) -> &'static str {
        match self {
            FraudIndicator::InflatedSavings => "claimed savings exceed 2x annual income",
            FraudIndicator::IncomeTenureMismatch => {
                "high declared income with under three months of tenure"
            }
            FraudIndicator::SuspiciousPhone => "phone number uses two or fewer distinct digits",
            FraudIndicator::LowDocumentQuality => "document quality below review floor",
        }
    }
}

/// Scan the record for heuristic fraud indicators.
pub(crate) fn heuristic_indicators(record: &ApplicantRecord) -> Vec<FraudIndicator> {
    let mut indicators = Vec::new();

    if let (Some(savings), Some(income)) = (record.claimed_savings, record.annual_income) {
        if savings > 2.0 * income {
            indicators.push(FraudIndicator::InflatedSavings);
        }
    }

    if let (Some(income), Some(months)) = (record.annual_income, record.employment_length_months) {
        if income > 100_000.0 && months < 3.0 {
            indicators.push(FraudIndicator::IncomeTenureMismatch);
        }
    }

    if let Some(phone) = record.phone_number.as_deref() {
        let digits: BTreeSet<char> = phone.chars().filter(char::is_ascii_digit).collect();
        if !digits.is_empty() && digits.len() <= 2 {
            indicators.push(FraudIndicator::SuspiciousPhone);
        }
    }

    if let Some(quality) = record.document_quality_score {
        if quality < 50.0 {
            indicators.push(FraudIndicator::LowDocumentQuality);
        }
    }

    indicators
}

/// Blend heuristic indicators with the model's fraud probability into the
/// applicant-facing fraud score, where higher means safer.
pub(crate) fn fraud_score(indicator_count: usize, model_probability: Option<f64>) -> f64 {
    let heuristic_risk = (indicator_count as f64 * 20.0).min(100.0);
    let model_risk = model_probability
        .unwrap_or(DEFAULT_MODEL_PROBABILITY)
        .clamp(0.0, 1.0)
        * 100.0;

    let final_risk = HEURISTIC_WEIGHT * heuristic_risk + MODEL_WEIGHT * model_risk;
    (100.0 - final_risk).max(0.0)
}
