use crate::screening::domain::ApplicantRecord;
use crate::screening::scoring::fraud::{self, FraudIndicator};

#[test]
fn clean_record_raises_no_indicators() {
    let record = ApplicantRecord {
        phone_number: Some("515-555-0182".to_string()),
        annual_income: Some(80_000.0),
        claimed_savings: Some(30_000.0),
        employment_length_months: Some(24.0),
        document_quality_score: Some(90.0),
        ..ApplicantRecord::default()
    };

    assert!(fraud::heuristic_indicators(&record).is_empty());
}

#[test]
fn each_heuristic_trips_on_its_own_signal() {
    let savings = ApplicantRecord {
        annual_income: Some(40_000.0),
        claimed_savings: Some(90_000.0),
        ..ApplicantRecord::default()
    };
    assert_eq!(
        fraud::heuristic_indicators(&savings),
        vec![FraudIndicator::InflatedSavings]
    );

    let tenure = ApplicantRecord {
        annual_income: Some(150_000.0),
        employment_length_months: Some(2.0),
        ..ApplicantRecord::default()
    };
    assert_eq!(
        fraud::heuristic_indicators(&tenure),
        vec![FraudIndicator::IncomeTenureMismatch]
    );

    let phone = ApplicantRecord {
        phone_number: Some("555-555-5555".to_string()),
        ..ApplicantRecord::default()
    };
    assert_eq!(
        fraud::heuristic_indicators(&phone),
        vec![FraudIndicator::SuspiciousPhone]
    );

    let documents = ApplicantRecord {
        document_quality_score: Some(35.0),
        ..ApplicantRecord::default()
    };
    assert_eq!(
        fraud::heuristic_indicators(&documents),
        vec![FraudIndicator::LowDocumentQuality]
    );
}

#[test]
fn absent_phone_is_not_a_fraud_signal() {
    let record = ApplicantRecord::default();
    assert!(fraud::heuristic_indicators(&record).is_empty());
}

#[test]
fn fraud_score_blends_heuristics_with_the_default_model_term() {
    // No indicators, no model: risk = 0.3 * 0 + 0.7 * 10 = 7.
    assert!((fraud::fraud_score(0, None) - 93.0).abs() < 1e-9);

    // Two indicators: risk = 0.3 * 40 + 0.7 * 10 = 19.
    assert!((fraud::fraud_score(2, None) - 81.0).abs() < 1e-9);
}

#[test]
fn fraud_score_uses_the_model_probability_when_present() {
    // risk = 0.3 * 20 + 0.7 * 90 = 69.
    let score = fraud::fraud_score(1, Some(0.9));
    assert!((score - 31.0).abs() < 1e-9, "got {score}");
}

#[test]
fn heuristic_risk_caps_at_one_hundred() {
    // Six indicators would be 120 uncapped; capped risk is
    // 0.3 * 100 + 0.7 * 10 = 37.
    assert!((fraud::fraud_score(6, None) - 63.0).abs() < 1e-9);
}

#[test]
fn fraud_score_floors_at_zero() {
    let score = fraud::fraud_score(6, Some(1.0));
    assert!(score >= 0.0);
    assert!((score - 0.0).abs() < 1e-9);
}
