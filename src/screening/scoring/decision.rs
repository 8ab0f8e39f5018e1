use crate::screening::domain::{ApplicantRecord, Recommendation, RiskLevel, SubScores};

/// Fixed composite weights. The overall score is always this linear
/// combination of the six component scores.
pub(crate) const CREDIT_WEIGHT: f64 = 0.25;
pub(crate) const INCOME_WEIGHT: f64 = 0.20;
pub(crate) const RENTAL_HISTORY_WEIGHT: f64 = 0.20;
pub(crate) const EMPLOYMENT_WEIGHT: f64 = 0.15;
pub(crate) const REFERENCES_WEIGHT: f64 = 0.10;
pub(crate) const FRAUD_WEIGHT: f64 = 0.10;

/// Fraud score below which the screening is declined outright.
pub(crate) const FRAUD_OVERRIDE_FLOOR: f64 = 30.0;

/// Confidence constant reported by the rule-based path.
pub(crate) const RULE_BASED_CONFIDENCE: f64 = 0.7;

/// Fraud score constant reported by the rule-based path (no fraud signal).
pub(crate) const RULE_BASED_FRAUD_SCORE: f64 = 80.0;

/// Model confidence substituted when approval inference fails mid-screen.
pub(crate) const DEFAULT_MODEL_CONFIDENCE: f64 = 0.8;

/// Weighted composite of the five sub-scores plus the fraud score.
pub(crate) fn composite_score(sub_scores: &SubScores, fraud_score: f64) -> f64 {
    let overall = CREDIT_WEIGHT * sub_scores.credit
        + INCOME_WEIGHT * sub_scores.income
        + RENTAL_HISTORY_WEIGHT * sub_scores.rental_history
        + EMPLOYMENT_WEIGHT * sub_scores.employment
        + REFERENCES_WEIGHT * sub_scores.references
        + FRAUD_WEIGHT * fraud_score;
    overall.clamp(0.0, 100.0)
}

/// Ordered threshold classifier; first match wins. The fraud override is
/// evaluated before any composite band.
pub(crate) fn classify(
    overall_score: f64,
    fraud_score: f64,
    credit_sub_score: f64,
) -> (RiskLevel, Recommendation) {
    if fraud_score < FRAUD_OVERRIDE_FLOOR {
        return (RiskLevel::Critical, Recommendation::Decline);
    }

    if overall_score >= 75.0 {
        (RiskLevel::Low, Recommendation::Approve)
    } else if overall_score >= 65.0 {
        if credit_sub_score >= 70.0 {
            (RiskLevel::Medium, Recommendation::ConditionalApprove)
        } else {
            (RiskLevel::Medium, Recommendation::RequireCosigner)
        }
    } else if overall_score >= 50.0 {
        (RiskLevel::High, Recommendation::RequireCosigner)
    } else {
        (RiskLevel::Critical, Recommendation::Decline)
    }
}

/// Fraction of the five confidence-bearing fields present on the record.
pub(crate) fn completeness(record: &ApplicantRecord) -> f64 {
    let mut present = 0u8;
    if record.credit_score.is_some() {
        present += 1;
    }
    if record.annual_income.is_some() {
        present += 1;
    }
    if record.employment_length_months.is_some() {
        present += 1;
    }
    if record.rental_history_length.is_some() {
        present += 1;
    }
    if record.number_of_references > 0 {
        present += 1;
    }
    f64::from(present) / 5.0
}

/// Blend data completeness with model certainty into [0.1, 1.0].
pub(crate) fn confidence(completeness: f64, model_confidence: f64) -> f64 {
    (0.4 * completeness + 0.6 * model_confidence).clamp(0.1, 1.0)
}
