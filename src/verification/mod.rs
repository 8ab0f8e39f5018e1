//! External verification collaborators: credit reporting, background
//! checks, and document authenticity, plus the concurrent orchestrator
//! that folds their independent outputs into one bundle.

pub mod background;
pub mod credit;
pub mod documents;
pub mod domain;
pub mod orchestrator;

pub use background::{score_background, BackgroundCheckGateway, InMemoryBackgroundVendor, VendorFile};
pub use credit::{CreditReportingGateway, InMemoryCreditBureau};
pub use documents::{
    assemble_document_result, assemble_set_result, consistency_score, DocumentAnalysis,
    DocumentGateway, InMemoryDocumentAnalyzer,
};
pub use domain::{
    AddressHistory, BackgroundCheckResult, BackgroundCheckScope, BackgroundRiskLevel,
    CreditBureau, CreditReport, CriminalFinding, CriminalSeverity, DocumentKind,
    DocumentSetVerification, DocumentVerificationResult, EmploymentVerification, ExtractedFacts,
    IdentityVerification, SubmittedDocument, TenantRecommendation, VerificationBundle,
    VerificationChannel, VerificationStatus,
};
pub use orchestrator::VerificationOrchestrator;

/// Error raised by verification gateways. Timeouts are handled by the
/// orchestrator and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("verification vendor unavailable: {0}")]
    Unavailable(String),
    #[error("verification request rejected by vendor: {0}")]
    Rejected(String),
}
