use std::path::PathBuf;
use std::sync::Arc;

use applicant_screening::screening::InMemoryMetrics;
use applicant_screening::{
    ApplicantRecord, EmploymentType, Recommendation, ReferenceQuality, ReferenceType, RiskLevel,
    ScoringMode, ScreeningConfig, ScreeningEngine, ScreeningScore, TrainingBatch, TrainingExample,
};
use chrono::Utc;

fn strong_record() -> ApplicantRecord {
    ApplicantRecord {
        full_name: Some("Jordan Miles".to_string()),
        phone_number: Some("515-555-0182".to_string()),
        current_address: Some("800 Walnut St, Des Moines".to_string()),
        employer_name: Some("Mercy Health".to_string()),
        credit_score: Some(760.0),
        annual_income: Some(96_000.0),
        monthly_rent: Some(1_400.0),
        debt_to_income_ratio: Some(0.18),
        payment_history_score: Some(95.0),
        claimed_savings: Some(20_000.0),
        employment_type: Some(EmploymentType::FullTime),
        employment_length_months: Some(40.0),
        industry: Some("healthcare".to_string()),
        rental_history_length: Some(48.0),
        previous_evictions: 0,
        late_payment_count: 0,
        landlord_reference_quality: Some(ReferenceQuality::Excellent),
        number_of_references: 3,
        reference_quality: Some(ReferenceQuality::Excellent),
        reference_types: vec![
            ReferenceType::Employer,
            ReferenceType::Landlord,
            ReferenceType::Professional,
        ],
        document_quality_score: Some(92.0),
    }
}

fn weak_record() -> ApplicantRecord {
    ApplicantRecord {
        full_name: Some("Riley Sharp".to_string()),
        phone_number: Some("555-555-5555".to_string()),
        credit_score: Some(520.0),
        annual_income: Some(24_000.0),
        monthly_rent: Some(1_500.0),
        debt_to_income_ratio: Some(0.55),
        payment_history_score: Some(35.0),
        claimed_savings: Some(90_000.0),
        employment_type: Some(EmploymentType::Unemployed),
        employment_length_months: Some(1.0),
        rental_history_length: Some(5.0),
        previous_evictions: 2,
        late_payment_count: 7,
        landlord_reference_quality: Some(ReferenceQuality::Poor),
        number_of_references: 0,
        reference_quality: Some(ReferenceQuality::None),
        document_quality_score: Some(30.0),
        ..ApplicantRecord::default()
    }
}

fn training_batch() -> TrainingBatch {
    let mut examples = Vec::new();
    for index in 0..30u32 {
        let mut record = strong_record();
        record.full_name = Some(format!("Approved Applicant {index}"));
        record.credit_score = Some(700.0 + f64::from(index % 10) * 10.0);
        record.annual_income = Some(70_000.0 + f64::from(index) * 1_000.0);
        examples.push(TrainingExample {
            record,
            approval_outcome: true,
            risk_score: 15.0 + f64::from(index % 5),
            fraud_detected: false,
        });
    }
    for index in 0..20u32 {
        let mut record = weak_record();
        record.full_name = Some(format!("Declined Applicant {index}"));
        record.credit_score = Some(520.0 + f64::from(index % 4) * 10.0);
        examples.push(TrainingExample {
            record,
            approval_outcome: false,
            risk_score: 80.0 + f64::from(index % 10),
            fraud_detected: index % 2 == 0,
        });
    }
    TrainingBatch::new(examples)
}

fn untrained_engine() -> ScreeningEngine {
    ScreeningEngine::new(ScreeningConfig {
        model_artifact_path: PathBuf::from("does/not/exist.json"),
        ..ScreeningConfig::default()
    })
}

fn assert_same_decision(left: &ScreeningScore, right: &ScreeningScore) {
    assert_eq!(left.overall_score, right.overall_score);
    assert_eq!(left.sub_scores, right.sub_scores);
    assert_eq!(left.fraud_risk_score, right.fraud_risk_score);
    assert_eq!(left.risk_level, right.risk_level);
    assert_eq!(left.recommendation, right.recommendation);
    assert_eq!(left.confidence, right.confidence);
    assert_eq!(left.scoring_mode, right.scoring_mode);
}

#[tokio::test]
async fn untrained_engine_screens_with_rule_based_constants() {
    let engine = untrained_engine();
    assert!(!engine.is_trained());

    let score = engine.screen_applicant(&strong_record()).await;

    assert_eq!(score.scoring_mode, ScoringMode::RuleBased);
    assert_eq!(score.fraud_risk_score, 80.0);
    assert_eq!(score.confidence, 0.7);
    assert_eq!(score.recommendation, Recommendation::Approve);
    assert_eq!(score.risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn rule_based_screening_is_idempotent() {
    let engine = untrained_engine();

    let first = engine.screen_applicant(&weak_record()).await;
    let second = engine.screen_applicant(&weak_record()).await;

    assert_same_decision(&first, &second);
}

#[tokio::test]
async fn overall_score_is_always_the_weighted_combination() {
    let engine = untrained_engine();

    for record in [strong_record(), weak_record(), ApplicantRecord::default()] {
        let score = engine.screen_applicant(&record).await;
        let sub = &score.sub_scores;
        let expected = 0.25 * sub.credit
            + 0.20 * sub.income
            + 0.20 * sub.rental_history
            + 0.15 * sub.employment
            + 0.10 * sub.references
            + 0.10 * score.fraud_risk_score;
        assert!(
            (score.overall_score - expected.clamp(0.0, 100.0)).abs() < 1e-9,
            "overall {} vs expected {expected}",
            score.overall_score
        );
        assert!((0.0..=100.0).contains(&score.overall_score));
        assert!((0.1..=1.0).contains(&score.confidence));
    }
}

#[tokio::test]
async fn training_flips_the_engine_into_model_mode() {
    let engine = untrained_engine();
    assert!(engine.train(training_batch()).await);
    assert!(engine.is_trained());

    let approved = engine.screen_applicant(&strong_record()).await;
    assert_eq!(approved.scoring_mode, ScoringMode::Model);
    assert!((0.1..=1.0).contains(&approved.confidence));

    let declined = engine.screen_applicant(&weak_record()).await;
    assert_eq!(declined.scoring_mode, ScoringMode::Model);
    assert!(declined.overall_score < approved.overall_score);
}

#[tokio::test]
async fn tiny_batches_are_rejected_and_leave_the_engine_untrained() {
    let engine = untrained_engine();
    let batch = TrainingBatch::new(training_batch().examples.into_iter().take(3).collect());

    assert!(!engine.train(batch).await);
    assert!(!engine.is_trained());

    let score = engine.screen_applicant(&strong_record()).await;
    assert_eq!(score.scoring_mode, ScoringMode::RuleBased);
}

#[tokio::test]
async fn failed_training_keeps_the_prior_model_set() {
    let engine = untrained_engine();
    assert!(engine.train(training_batch()).await);

    let before = engine.screen_applicant(&strong_record()).await;

    let empty = TrainingBatch::default();
    assert!(!engine.train(empty).await);
    assert!(engine.is_trained());

    let after = engine.screen_applicant(&strong_record()).await;
    assert_same_decision(&before, &after);
}

#[tokio::test]
async fn saved_artifact_round_trips_into_an_identical_engine() {
    let engine = untrained_engine();
    assert!(engine.train(training_batch()).await);

    let path = std::env::temp_dir().join(format!(
        "screening-artifact-{}-{}.json",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    assert!(engine.save_model_set(&path).await);

    let restored = untrained_engine();
    assert!(restored.load_model_set(&path).await);
    assert!(restored.is_trained());

    for record in [strong_record(), weak_record()] {
        let original = engine.screen_applicant(&record).await;
        let reloaded = restored.screen_applicant(&record).await;
        assert_same_decision(&original, &reloaded);
    }

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn loading_a_missing_artifact_reports_failure() {
    let engine = untrained_engine();
    assert!(!engine.load_model_set("nowhere/missing.json").await);
    assert!(!engine.is_trained());
}

#[tokio::test]
async fn insights_describe_strengths_concerns_and_next_steps() {
    let engine = untrained_engine();

    let strong_score = engine.screen_applicant(&strong_record()).await;
    let strong_insights = engine
        .generate_insights(&strong_record(), &strong_score)
        .await;
    assert!(!strong_insights.strengths.is_empty());
    assert!(strong_insights.probability_of_success > 0.8);

    let weak_score = engine.screen_applicant(&weak_record()).await;
    let weak_insights = engine.generate_insights(&weak_record(), &weak_score).await;
    assert!(!weak_insights.concerns.is_empty());
    assert!(weak_insights.probability_of_success < 0.5);
    assert!(!weak_insights.recommendations.is_empty());
}

#[test]
fn training_batches_load_from_csv_with_empty_cells_as_missing() {
    let header = "full_name,phone_number,current_address,employer_name,credit_score,annual_income,monthly_rent,debt_to_income_ratio,payment_history_score,claimed_savings,employment_type,employment_length_months,industry,rental_history_length,previous_evictions,late_payment_count,landlord_reference_quality,number_of_references,reference_quality,document_quality_score,approval_outcome,risk_score,fraud_detected";
    let rows = [
        "Jordan Miles,515-555-0182,800 Walnut St,Mercy Health,760,96000,1400,0.18,95,20000,full_time,40,healthcare,48,0,0,excellent,3,excellent,92,true,15,false",
        "Riley Sharp,,,,520,24000,1500,0.55,,,unemployed,1,,5,2,7,poor,0,none,30,false,85,true",
    ];
    let path = std::env::temp_dir().join(format!(
        "screening-batch-{}-{}.csv",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    std::fs::write(&path, format!("{header}\n{}\n{}\n", rows[0], rows[1])).expect("write csv");

    let batch = TrainingBatch::from_csv_path(&path).expect("csv loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(batch.len(), 2);
    let first = &batch.examples[0];
    assert!(first.approval_outcome);
    assert_eq!(first.record.employment_type, Some(EmploymentType::FullTime));
    assert_eq!(first.record.credit_score, Some(760.0));

    let second = &batch.examples[1];
    assert!(!second.approval_outcome);
    assert!(second.fraud_detected);
    assert_eq!(second.record.phone_number, None);
    assert_eq!(second.record.payment_history_score, None);
    assert_eq!(second.record.previous_evictions, 2);
}

#[tokio::test]
async fn every_completed_screening_lands_in_the_metrics_rollup() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let engine = ScreeningEngine::with_metrics(
        ScreeningConfig {
            model_artifact_path: PathBuf::from("does/not/exist.json"),
            ..ScreeningConfig::default()
        },
        metrics.clone(),
    );

    engine.screen_applicant(&strong_record()).await;
    engine.screen_applicant(&weak_record()).await;

    let today = Utc::now().date_naive();
    let rollup = metrics.for_day(today).expect("today's rollup exists");
    assert_eq!(rollup.applications_screened, 2);
    assert!(rollup.average_confidence > 0.0);
    assert!(rollup.average_latency_ms >= 0.0);
}
