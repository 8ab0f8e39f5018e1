use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employment arrangement declared on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
    Other,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Contract => "contract",
            EmploymentType::SelfEmployed => "self_employed",
            EmploymentType::Unemployed => "unemployed",
            EmploymentType::Retired => "retired",
            EmploymentType::Student => "student",
            EmploymentType::Other => "other",
        }
    }
}

/// Qualitative grade attached to landlord or personal references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    None,
}

impl ReferenceQuality {
    pub const fn label(self) -> &'static str {
        match self {
            ReferenceQuality::Excellent => "excellent",
            ReferenceQuality::Good => "good",
            ReferenceQuality::Fair => "fair",
            ReferenceQuality::Poor => "poor",
            ReferenceQuality::None => "none",
        }
    }
}

/// Relationship category of a supplied reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Employer,
    Landlord,
    Professional,
    Personal,
}

impl ReferenceType {
    /// References from parties with something to lose carry extra weight.
    pub const fn is_vouching(self) -> bool {
        matches!(
            self,
            ReferenceType::Employer | ReferenceType::Landlord | ReferenceType::Professional
        )
    }
}

/// Structured input describing one rental applicant.
///
/// Owned by the caller and treated as immutable per screening call;
/// re-screening the same record produces a fresh [`ScreeningScore`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub current_address: Option<String>,
    pub employer_name: Option<String>,
    pub credit_score: Option<f64>,
    pub annual_income: Option<f64>,
    pub monthly_rent: Option<f64>,
    pub debt_to_income_ratio: Option<f64>,
    pub payment_history_score: Option<f64>,
    pub claimed_savings: Option<f64>,
    pub employment_type: Option<EmploymentType>,
    pub employment_length_months: Option<f64>,
    pub industry: Option<String>,
    pub rental_history_length: Option<f64>,
    pub previous_evictions: u32,
    pub late_payment_count: u32,
    pub landlord_reference_quality: Option<ReferenceQuality>,
    pub number_of_references: u32,
    pub reference_quality: Option<ReferenceQuality>,
    pub reference_types: Vec<ReferenceType>,
    pub document_quality_score: Option<f64>,
}

/// Ordinal risk classification assigned by the decision classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Action recommended to the leasing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    ConditionalApprove,
    RequireCosigner,
    Decline,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::ConditionalApprove => "conditional_approve",
            Recommendation::RequireCosigner => "require_cosigner",
            Recommendation::Decline => "decline",
        }
    }
}

/// Which scoring path produced a [`ScreeningScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Trained model set contributed fraud probability and confidence.
    Model,
    /// No trained models; heuristic constants stood in.
    RuleBased,
    /// Internal failure; the fail-safe-to-decline result was substituted.
    Degraded,
}

/// The five domain assessments, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub credit: f64,
    pub income: f64,
    pub rental_history: f64,
    pub employment: f64,
    pub references: f64,
}

impl SubScores {
    pub const fn neutral() -> Self {
        Self {
            credit: 50.0,
            income: 50.0,
            rental_history: 50.0,
            employment: 50.0,
            references: 50.0,
        }
    }
}

/// Engine output for one screening pass. Append-only history: every call
/// yields a new value and never mutates a prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningScore {
    pub overall_score: f64,
    pub sub_scores: SubScores,
    pub fraud_risk_score: f64,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub scoring_mode: ScoringMode,
    pub evaluated_at: DateTime<Utc>,
}

impl ScreeningScore {
    /// Fail-safe result substituted when scoring itself cannot complete.
    pub fn degraded() -> Self {
        Self {
            overall_score: 50.0,
            sub_scores: SubScores::neutral(),
            fraud_risk_score: 50.0,
            risk_level: RiskLevel::High,
            recommendation: Recommendation::Decline,
            confidence: 0.1,
            scoring_mode: ScoringMode::Degraded,
            evaluated_at: Utc::now(),
        }
    }
}

/// Narrative derived from a screening pass for operator consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningInsights {
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
    /// Illustrative comparisons only; never feeds back into the decision.
    pub similar_cases: Vec<String>,
    pub probability_of_success: f64,
}

/// One labeled row of screening history used for supervised training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub record: ApplicantRecord,
    pub approval_outcome: bool,
    pub risk_score: f64,
    pub fraud_detected: bool,
}

/// Batch of labeled examples consumed by [`crate::ScreeningEngine::train`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingBatch {
    pub examples: Vec<TrainingExample>,
}

impl TrainingBatch {
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        Self { examples }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Load labeled rows from a CSV export. Empty cells become missing
    /// fields; label columns are required on every row.
    pub fn from_csv_path(path: &Path) -> Result<Self, BatchLoadError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut examples = Vec::new();
        for row in reader.deserialize() {
            let row: CsvTrainingRow = row?;
            examples.push(row.into_example());
        }
        Ok(Self { examples })
    }
}

/// Error raised while ingesting a training CSV.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    #[error("unable to read training csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV row; kept separate from the domain type so the on-disk header
/// names stay stable independently of the struct layout.
#[derive(Debug, Deserialize)]
struct CsvTrainingRow {
    full_name: Option<String>,
    phone_number: Option<String>,
    current_address: Option<String>,
    employer_name: Option<String>,
    credit_score: Option<f64>,
    annual_income: Option<f64>,
    monthly_rent: Option<f64>,
    debt_to_income_ratio: Option<f64>,
    payment_history_score: Option<f64>,
    claimed_savings: Option<f64>,
    employment_type: Option<EmploymentType>,
    employment_length_months: Option<f64>,
    industry: Option<String>,
    rental_history_length: Option<f64>,
    #[serde(default)]
    previous_evictions: u32,
    #[serde(default)]
    late_payment_count: u32,
    landlord_reference_quality: Option<ReferenceQuality>,
    #[serde(default)]
    number_of_references: u32,
    reference_quality: Option<ReferenceQuality>,
    document_quality_score: Option<f64>,
    approval_outcome: bool,
    risk_score: f64,
    fraud_detected: bool,
}

impl CsvTrainingRow {
    fn into_example(self) -> TrainingExample {
        TrainingExample {
            record: ApplicantRecord {
                full_name: self.full_name,
                phone_number: self.phone_number,
                current_address: self.current_address,
                employer_name: self.employer_name,
                credit_score: self.credit_score,
                annual_income: self.annual_income,
                monthly_rent: self.monthly_rent,
                debt_to_income_ratio: self.debt_to_income_ratio,
                payment_history_score: self.payment_history_score,
                claimed_savings: self.claimed_savings,
                employment_type: self.employment_type,
                employment_length_months: self.employment_length_months,
                industry: self.industry,
                rental_history_length: self.rental_history_length,
                previous_evictions: self.previous_evictions,
                late_payment_count: self.late_payment_count,
                landlord_reference_quality: self.landlord_reference_quality,
                number_of_references: self.number_of_references,
                reference_quality: self.reference_quality,
                reference_types: Vec::new(),
                document_quality_score: self.document_quality_score,
            },
            approval_outcome: self.approval_outcome,
            risk_score: self.risk_score,
            fraud_detected: self.fraud_detected,
        }
    }
}
