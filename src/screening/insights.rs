use super::domain::{ApplicantRecord, Recommendation, ScreeningInsights, ScreeningScore};
use super::models::TrainedModelSet;

const STRENGTH_FLOOR: f64 = 80.0;
const CONCERN_CEILING: f64 = 60.0;
const FRAUD_CONCERN_CEILING: f64 = 70.0;

/// Derive operator-facing narrative from a completed screening pass.
pub(crate) fn generate(
    record: &ApplicantRecord,
    score: &ScreeningScore,
    models: Option<&TrainedModelSet>,
) -> ScreeningInsights {
    let sub = &score.sub_scores;

    let mut strengths = Vec::new();
    if sub.credit >= STRENGTH_FLOOR {
        strengths.push(format!(
            "Strong credit profile (score {:.0} of 100)",
            sub.credit
        ));
    }
    if sub.income >= STRENGTH_FLOOR {
        strengths.push("Income comfortably covers the asking rent".to_string());
    }
    if sub.rental_history >= STRENGTH_FLOOR {
        strengths.push("Established rental history with favorable landlord feedback".to_string());
    }
    if sub.employment >= STRENGTH_FLOOR {
        strengths.push("Stable employment situation".to_string());
    }
    if sub.references >= STRENGTH_FLOOR {
        strengths.push("Well-corroborated references".to_string());
    }

    let mut concerns = Vec::new();
    if sub.credit < CONCERN_CEILING {
        concerns.push("Credit profile falls below the comfort band".to_string());
    }
    if sub.income < CONCERN_CEILING {
        concerns.push("Declared income is thin relative to the asking rent".to_string());
    }
    if sub.rental_history < CONCERN_CEILING {
        concerns.push("Rental history is short or carries negative marks".to_string());
    }
    if score.fraud_risk_score < FRAUD_CONCERN_CEILING {
        concerns.push("Application shows elevated fraud indicators".to_string());
    }

    let recommendations = recommendation_text(score.recommendation);
    let similar_cases = similar_cases(record, score, models);

    let probability_of_success =
        ((sub.credit + sub.income + sub.rental_history + sub.employment) / 4.0 / 100.0)
            .clamp(0.0, 1.0);

    ScreeningInsights {
        strengths,
        concerns,
        recommendations,
        similar_cases,
        probability_of_success,
    }
}

fn recommendation_text(recommendation: Recommendation) -> Vec<String> {
    match recommendation {
        Recommendation::Approve => vec![
            "Proceed to lease preparation with standard deposit terms".to_string(),
        ],
        Recommendation::ConditionalApprove => vec![
            "Consider an increased security deposit".to_string(),
            "Request additional supporting documentation before lease signing".to_string(),
        ],
        Recommendation::RequireCosigner => vec![
            "Require a cosigner and verify the cosigner's income independently".to_string(),
        ],
        Recommendation::Decline => vec![
            "Document the decline rationale for the adverse action notice".to_string(),
        ],
    }
}

/// Illustrative comparisons only. When a trained risk regressor exists its
/// estimate is quoted as context; none of this feeds the decision.
fn similar_cases(
    record: &ApplicantRecord,
    score: &ScreeningScore,
    models: Option<&TrainedModelSet>,
) -> Vec<String> {
    let mut cases = Vec::new();

    cases.push(match score.overall_score {
        s if s >= 75.0 => {
            "Applicants in this band historically complete their lease term without incident"
                .to_string()
        }
        s if s >= 65.0 => {
            "Applicants in this band succeed most often when paired with a larger deposit"
                .to_string()
        }
        s if s >= 50.0 => {
            "Applicants in this band have mixed outcomes; cosigned leases fare markedly better"
                .to_string()
        }
        _ => "Applicants in this band rarely complete a full lease term".to_string(),
    });

    if let Some(snapshot) = models {
        let estimate = snapshot
            .pipeline()
            .transform(record)
            .ok()
            .and_then(|features| snapshot.risk_estimate(&features));
        if let Some(estimate) = estimate {
            cases.push(format!(
                "Trained risk model places comparable applications near {estimate:.0} of 100"
            ));
        }
    }

    cases
}
