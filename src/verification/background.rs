use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::screening::domain::ApplicantRecord;

use super::domain::{
    AddressHistory, BackgroundCheckResult, BackgroundCheckScope, BackgroundRiskLevel,
    CriminalFinding, CriminalSeverity, EmploymentVerification, IdentityVerification,
    TenantRecommendation,
};
use super::VerificationError;

/// Outbound seam to a background-check vendor.
#[async_trait]
pub trait BackgroundCheckGateway: Send + Sync {
    async fn run_check(
        &self,
        applicant: &ApplicantRecord,
        scope: BackgroundCheckScope,
    ) -> Result<BackgroundCheckResult, VerificationError>;
}

const BASE_RISK: f64 = 20.0;

/// Raw vendor findings before risk scoring.
#[derive(Debug, Clone, Default)]
pub struct VendorFile {
    pub criminal_findings: Vec<CriminalFinding>,
    pub sex_offender_match: bool,
    pub eviction_filings: u16,
    pub identity_confidence: f64,
    pub address_verification_rate: f64,
    pub addresses_reported: u16,
    pub employment_verifiable: bool,
}

impl VendorFile {
    /// A clean file for applicants with no seeded history.
    pub fn clean() -> Self {
        Self {
            criminal_findings: Vec::new(),
            sex_offender_match: false,
            eviction_filings: 0,
            identity_confidence: 0.95,
            address_verification_rate: 0.9,
            addresses_reported: 2,
            employment_verifiable: true,
        }
    }
}

/// Fold vendor findings into the check's own additive risk score, bucket
/// it, and attach the advisory recommendation.
pub fn score_background(file: &VendorFile, scope: BackgroundCheckScope) -> BackgroundCheckResult {
    let mut risk = BASE_RISK;

    for finding in &file.criminal_findings {
        risk += match finding.severity {
            CriminalSeverity::Minor => 5.0,
            CriminalSeverity::Moderate => 15.0,
            CriminalSeverity::Severe => 30.0,
        };
    }

    if file.sex_offender_match {
        risk += 100.0;
    }

    risk += f64::from(file.eviction_filings) * 15.0;

    if file.identity_confidence < 0.5 {
        risk += 20.0;
    } else if file.identity_confidence < 0.8 {
        risk += 10.0;
    }

    let (employment, address_history) = match scope {
        BackgroundCheckScope::Standard => (None, None),
        BackgroundCheckScope::Full => {
            if !file.employment_verifiable {
                risk += 15.0;
            }
            if file.address_verification_rate < 0.6 {
                risk += 10.0;
            }
            (
                Some(if file.employment_verifiable {
                    EmploymentVerification::Verified
                } else {
                    EmploymentVerification::Unverifiable
                }),
                Some(AddressHistory {
                    addresses_reported: file.addresses_reported,
                    verification_rate: file.address_verification_rate,
                }),
            )
        }
    };

    let risk_level = if risk <= 30.0 {
        BackgroundRiskLevel::Low
    } else if risk <= 50.0 {
        BackgroundRiskLevel::Medium
    } else if risk <= 75.0 {
        BackgroundRiskLevel::High
    } else {
        BackgroundRiskLevel::Critical
    };

    let tenant_recommendation = if file.sex_offender_match {
        TenantRecommendation::Rejected
    } else {
        match risk_level {
            BackgroundRiskLevel::Low => TenantRecommendation::Recommended,
            BackgroundRiskLevel::Medium => TenantRecommendation::ConditionallyRecommended,
            BackgroundRiskLevel::High => TenantRecommendation::NotRecommended,
            BackgroundRiskLevel::Critical => TenantRecommendation::Rejected,
        }
    };

    BackgroundCheckResult {
        scope,
        criminal_findings: file.criminal_findings.clone(),
        sex_offender_match: file.sex_offender_match,
        eviction_filings: file.eviction_filings,
        identity: IdentityVerification {
            verified: file.identity_confidence >= 0.8,
            confidence: file.identity_confidence,
        },
        address_history,
        employment,
        risk_score: risk,
        risk_level,
        tenant_recommendation,
        completed_at: Utc::now(),
    }
}

/// Deterministic in-memory vendor. Files are seeded per applicant name;
/// unseeded applicants come back clean.
#[derive(Debug, Default)]
pub struct InMemoryBackgroundVendor {
    files: Mutex<HashMap<String, VendorFile>>,
}

impl InMemoryBackgroundVendor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, full_name: &str, file: VendorFile) {
        self.files
            .lock()
            .expect("vendor mutex poisoned")
            .insert(full_name.to_string(), file);
    }
}

#[async_trait]
impl BackgroundCheckGateway for InMemoryBackgroundVendor {
    async fn run_check(
        &self,
        applicant: &ApplicantRecord,
        scope: BackgroundCheckScope,
    ) -> Result<BackgroundCheckResult, VerificationError> {
        let file = applicant
            .full_name
            .as_deref()
            .and_then(|name| {
                self.files
                    .lock()
                    .expect("vendor mutex poisoned")
                    .get(name)
                    .cloned()
            })
            .unwrap_or_else(VendorFile::clean);

        Ok(score_background(&file, scope))
    }
}
