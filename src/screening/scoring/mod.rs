//! Deterministic scoring: the five domain assessors, the fraud blend, the
//! fixed-weight composite, and the threshold decision classifier.

pub(crate) mod assessors;
pub(crate) mod decision;
pub(crate) mod fraud;

pub use fraud::FraudIndicator;

use chrono::Utc;

use super::domain::{ApplicantRecord, ScoringMode, ScreeningScore};
use super::models::TrainedModelSet;

/// Score one applicant against an optional trained model snapshot. This is
/// the CPU-bound core of a screening pass; the engine dispatches it to the
/// blocking pool.
pub(crate) fn score_applicant(
    record: &ApplicantRecord,
    models: Option<&TrainedModelSet>,
) -> ScreeningScore {
    let sub_scores = assessors::assess_all(record);
    let indicators = fraud::heuristic_indicators(record);

    let (fraud_risk_score, model_confidence, scoring_mode) = match models {
        Some(snapshot) => {
            let features = match snapshot.pipeline().transform(record) {
                Ok(features) => Some(features),
                Err(error) => {
                    tracing::warn!(%error, "feature preparation failed; using heuristic defaults");
                    None
                }
            };
            let fraud_probability =
                features.as_deref().and_then(|f| snapshot.fraud_probability(f));
            let approval_confidence = features
                .as_deref()
                .and_then(|f| snapshot.approval_confidence(f))
                .unwrap_or(decision::DEFAULT_MODEL_CONFIDENCE);
            (
                fraud::fraud_score(indicators.len(), fraud_probability),
                approval_confidence,
                ScoringMode::Model,
            )
        }
        None => (
            decision::RULE_BASED_FRAUD_SCORE,
            decision::DEFAULT_MODEL_CONFIDENCE,
            ScoringMode::RuleBased,
        ),
    };

    let overall_score = decision::composite_score(&sub_scores, fraud_risk_score);
    let (risk_level, recommendation) =
        decision::classify(overall_score, fraud_risk_score, sub_scores.credit);

    let confidence = match scoring_mode {
        ScoringMode::Model => {
            decision::confidence(decision::completeness(record), model_confidence)
        }
        _ => decision::RULE_BASED_CONFIDENCE,
    };

    ScreeningScore {
        overall_score,
        sub_scores,
        fraud_risk_score,
        risk_level,
        recommendation,
        confidence,
        scoring_mode,
        evaluated_at: Utc::now(),
    }
}
