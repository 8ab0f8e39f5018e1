use crate::screening::domain::{
    ApplicantRecord, EmploymentType, ReferenceQuality, ReferenceType, TrainingBatch,
    TrainingExample,
};

/// Applicant with every confidence-bearing field populated and strong
/// figures across the board.
pub(super) fn strong_record() -> ApplicantRecord {
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

/// Applicant with almost nothing filled in.
pub(super) fn sparse_record() -> ApplicantRecord {
    ApplicantRecord::default()
}

/// Labeled batch large enough to train on, spanning approvals and
/// declines with a few fraudulent rows.
pub(super) fn training_batch() -> TrainingBatch {
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
        let record = ApplicantRecord {
            full_name: Some(format!("Declined Applicant {index}")),
            phone_number: Some("555-555-5555".to_string()),
            credit_score: Some(520.0 + f64::from(index % 4) * 10.0),
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
        };
        examples.push(TrainingExample {
            record,
            approval_outcome: false,
            risk_score: 80.0 + f64::from(index % 10),
            fraud_detected: index % 2 == 0,
        });
    }

    TrainingBatch::new(examples)
}
