use crate::screening::domain::{ApplicantRecord, EmploymentType, ReferenceQuality, SubScores};

/// Score substituted when an assessor cannot band its required inputs.
pub(crate) const NEUTRAL_SCORE: f64 = 50.0;

/// Run all five domain assessors. Each is pure and total: missing required
/// numerics fall back to the neutral score, everything clamps to [0, 100].
pub(crate) fn assess_all(record: &ApplicantRecord) -> SubScores {
    SubScores {
        credit: assess_credit(record),
        income: assess_income(record),
        rental_history: assess_rental_history(record),
        employment: assess_employment(record),
        references: assess_references(record),
    }
}

/// Credit assessment: 60% score band, 25% debt band, 15% payment history.
pub(crate) fn assess_credit(record: &ApplicantRecord) -> f64 {
    credit_components(record)
        .unwrap_or(NEUTRAL_SCORE)
        .clamp(0.0, 100.0)
}

fn credit_components(record: &ApplicantRecord) -> Option<f64> {
    let credit_score = record.credit_score?;
    let debt_ratio = record.debt_to_income_ratio?;
    let payment_history = record.payment_history_score?;

    let score_component = if credit_score >= 750.0 {
        100.0
    } else if credit_score >= 700.0 {
        85.0
    } else if credit_score >= 650.0 {
        70.0
    } else if credit_score >= 600.0 {
        55.0
    } else {
        30.0
    };

    let debt_component = if debt_ratio <= 0.2 {
        100.0
    } else if debt_ratio <= 0.3 {
        85.0
    } else if debt_ratio <= 0.4 {
        70.0
    } else {
        40.0
    };

    let payment_component = payment_history.min(100.0);

    Some(0.6 * score_component + 0.25 * debt_component + 0.15 * payment_component)
}

/// Income assessment: monthly income-to-rent ratio and tenure stability,
/// discounted by employment type.
pub(crate) fn assess_income(record: &ApplicantRecord) -> f64 {
    income_components(record)
        .unwrap_or(NEUTRAL_SCORE)
        .clamp(0.0, 100.0)
}

fn income_components(record: &ApplicantRecord) -> Option<f64> {
    let annual_income = record.annual_income?;
    let monthly_rent = record.monthly_rent?;
    if monthly_rent <= 0.0 {
        return None;
    }
    let employment_months = record.employment_length_months?;

    let income_ratio = (annual_income / 12.0) / monthly_rent;
    let ratio_score = if income_ratio >= 4.0 {
        100.0
    } else if income_ratio >= 3.0 {
        85.0
    } else if income_ratio >= 2.5 {
        60.0
    } else {
        30.0
    };

    let stability_score = if employment_months >= 24.0 {
        100.0
    } else if employment_months >= 12.0 {
        80.0
    } else if employment_months >= 6.0 {
        60.0
    } else {
        40.0
    };

    let type_multiplier = match record.employment_type {
        Some(EmploymentType::FullTime) => 1.0,
        Some(EmploymentType::PartTime) => 0.8,
        Some(EmploymentType::Contract) => 0.7,
        Some(EmploymentType::SelfEmployed) => 0.6,
        Some(EmploymentType::Unemployed) => 0.1,
        _ => 0.7,
    };

    Some((0.7 * ratio_score + 0.3 * stability_score) * type_multiplier)
}

/// Rental history assessment: tenure and landlord reference quality less
/// eviction and late-payment penalties.
pub(crate) fn assess_rental_history(record: &ApplicantRecord) -> f64 {
    rental_history_components(record)
        .unwrap_or(NEUTRAL_SCORE)
        .clamp(0.0, 100.0)
}

fn rental_history_components(record: &ApplicantRecord) -> Option<f64> {
    let history_months = record.rental_history_length?;

    let length_score = if history_months >= 36.0 {
        100.0
    } else if history_months >= 24.0 {
        85.0
    } else if history_months >= 12.0 {
        70.0
    } else {
        50.0
    };

    let reference_score = match record.landlord_reference_quality {
        Some(ReferenceQuality::Excellent) => 100.0,
        Some(ReferenceQuality::Good) => 85.0,
        Some(ReferenceQuality::Fair) => 70.0,
        Some(ReferenceQuality::Poor) => 40.0,
        Some(ReferenceQuality::None) => 20.0,
        None => 50.0,
    };

    let eviction_penalty = (f64::from(record.previous_evictions) * 25.0).min(50.0);
    let late_penalty = (f64::from(record.late_payment_count) * 5.0).min(30.0);

    Some(0.4 * length_score + 0.6 * reference_score - eviction_penalty - late_penalty)
}

/// Employment assessment: base score per type, tenure bonus, and a small
/// bump for historically stable industries.
pub(crate) fn assess_employment(record: &ApplicantRecord) -> f64 {
    let base: f64 = match record.employment_type {
        Some(EmploymentType::FullTime) => 90.0,
        Some(EmploymentType::PartTime) => 60.0,
        Some(EmploymentType::Contract) => 55.0,
        Some(EmploymentType::SelfEmployed) => 50.0,
        Some(EmploymentType::Unemployed) => 10.0,
        Some(EmploymentType::Retired) => 75.0,
        Some(EmploymentType::Student) => 40.0,
        _ => 50.0,
    };

    let length_bonus = match record.employment_length_months {
        Some(months) if months >= 36.0 => 10.0,
        Some(months) if months >= 24.0 => 8.0,
        Some(months) if months >= 12.0 => 5.0,
        _ => 0.0,
    };

    let industry_bonus = record
        .industry
        .as_deref()
        .map(|industry| {
            let industry = industry.trim().to_ascii_lowercase();
            if matches!(
                industry.as_str(),
                "government" | "healthcare" | "education" | "utilities"
            ) {
                5.0
            } else {
                0.0
            }
        })
        .unwrap_or(0.0);

    (base + length_bonus + industry_bonus).clamp(0.0, 100.0)
}

/// Reference assessment: quantity and quality blend plus a bonus per
/// vouching reference type.
pub(crate) fn assess_references(record: &ApplicantRecord) -> f64 {
    let quantity_score = match record.number_of_references {
        count if count >= 3 => 100.0,
        2 => 80.0,
        1 => 60.0,
        _ => 20.0,
    };

    let quality_score = match record.reference_quality {
        Some(ReferenceQuality::Excellent) => 100.0,
        Some(ReferenceQuality::Good) => 85.0,
        Some(ReferenceQuality::Fair) => 70.0,
        Some(ReferenceQuality::Poor) => 40.0,
        Some(ReferenceQuality::None) => 10.0,
        None => 50.0,
    };

    let vouching = record
        .reference_types
        .iter()
        .filter(|kind| kind.is_vouching())
        .count();
    let type_bonus = 5.0 * vouching as f64;

    (0.4 * quantity_score + 0.6 * quality_score + type_bonus).clamp(0.0, 100.0)
}
