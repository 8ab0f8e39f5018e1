use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Consumer reporting agency a credit report was pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBureau {
    Equifax,
    Experian,
    TransUnion,
}

impl CreditBureau {
    pub const fn label(self) -> &'static str {
        match self {
            CreditBureau::Equifax => "equifax",
            CreditBureau::Experian => "experian",
            CreditBureau::TransUnion => "transunion",
        }
    }
}

/// Structured credit report returned by a bureau gateway. The vendor wire
/// format stays behind the gateway; this is the engine-facing shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditReport {
    pub bureau: CreditBureau,
    pub credit_score: u16,
    pub open_accounts: u16,
    pub derogatory_marks: u16,
    pub credit_utilization: f64,
    pub inquiries_last_six_months: u16,
    pub retrieved_at: DateTime<Utc>,
}

/// Depth of background check requested. Standard skips employment and
/// address verification; Full runs every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundCheckScope {
    Standard,
    Full,
}

/// Severity tier of a criminal-history finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriminalSeverity {
    Minor,
    Moderate,
    Severe,
}

/// One criminal-history finding surfaced by the background vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriminalFinding {
    pub severity: CriminalSeverity,
    pub years_since: u8,
    pub jurisdiction: String,
    pub description: String,
}

/// Identity-match evidence from the background vendor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentityVerification {
    pub verified: bool,
    pub confidence: f64,
}

/// Address-history corroboration summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressHistory {
    pub addresses_reported: u16,
    pub verification_rate: f64,
}

/// Employment corroboration outcome; `None` when the requested scope did
/// not include employment verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentVerification {
    Verified,
    Unverifiable,
}

/// Advisory recommendation attached to a background check. Input to the
/// decision classifier, never a replacement for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantRecommendation {
    Recommended,
    ConditionallyRecommended,
    NotRecommended,
    Rejected,
}

/// Risk bucket computed from the background check's own additive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Aggregated background check result with its independent risk read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundCheckResult {
    pub scope: BackgroundCheckScope,
    pub criminal_findings: Vec<CriminalFinding>,
    pub sex_offender_match: bool,
    pub eviction_filings: u16,
    pub identity: IdentityVerification,
    pub address_history: Option<AddressHistory>,
    pub employment: Option<EmploymentVerification>,
    pub risk_score: f64,
    pub risk_level: BackgroundRiskLevel,
    pub tenant_recommendation: TenantRecommendation,
    pub completed_at: DateTime<Utc>,
}

impl BackgroundCheckResult {
    /// A registry match leaves no discretion to the composite score.
    pub fn forces_decline(&self) -> bool {
        self.sex_offender_match
    }
}

/// Kind of document submitted with an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Identification,
    PayStub,
    BankStatement,
    TaxReturn,
    ReferenceLetter,
    Other,
}

/// One document handed to the verification gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedDocument {
    pub name: String,
    pub kind: DocumentKind,
    pub storage_key: String,
}

/// Facts the OCR pass extracted from one document. Absent fields simply do
/// not participate in cross-referencing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFacts {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub employer: Option<String>,
}

/// Verification status of a single document or of a whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    RequiresReview,
    Rejected,
}

/// Per-document verification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVerificationResult {
    pub document: SubmittedDocument,
    pub authenticity_score: f64,
    pub ocr_confidence: f64,
    pub compliance_score: f64,
    pub extracted: ExtractedFacts,
    pub status: VerificationStatus,
}

/// Whole-set verification outcome: authenticity average blended with
/// cross-document consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSetVerification {
    pub documents: Vec<DocumentVerificationResult>,
    pub consistency_score: f64,
    pub overall_score: f64,
    pub status: VerificationStatus,
}

/// Channel of the verification fan-out, used to report unavailability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationChannel {
    Credit,
    Background,
    Documents,
}

impl VerificationChannel {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationChannel::Credit => "credit",
            VerificationChannel::Background => "background",
            VerificationChannel::Documents => "documents",
        }
    }
}

/// Transient aggregate of one verification fan-out. Consumed once per
/// screening request; never persisted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationBundle {
    pub credit: Option<CreditReport>,
    pub background: Option<BackgroundCheckResult>,
    pub documents: Option<DocumentSetVerification>,
    pub unavailable: Vec<VerificationChannel>,
}

impl VerificationBundle {
    /// True when any channel's findings mandate an outright decline.
    pub fn mandatory_decline(&self) -> bool {
        self.background
            .as_ref()
            .map(BackgroundCheckResult::forces_decline)
            .unwrap_or(false)
    }

    pub fn unavailable_channels(&self) -> usize {
        self.unavailable.len()
    }
}
