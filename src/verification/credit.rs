use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::screening::domain::ApplicantRecord;

use super::domain::{CreditBureau, CreditReport};
use super::VerificationError;

/// Outbound seam to a consumer reporting agency.
#[async_trait]
pub trait CreditReportingGateway: Send + Sync {
    async fn fetch_report(
        &self,
        applicant: &ApplicantRecord,
        bureau: CreditBureau,
    ) -> Result<CreditReport, VerificationError>;
}

/// Deterministic in-memory bureau for tests and demos. Reports can be
/// seeded per applicant name; unseeded applicants get a report derived
/// from their declared figures.
#[derive(Debug, Default)]
pub struct InMemoryCreditBureau {
    seeded: Mutex<HashMap<String, CreditReport>>,
}

impl InMemoryCreditBureau {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, full_name: &str, report: CreditReport) {
        self.seeded
            .lock()
            .expect("bureau mutex poisoned")
            .insert(full_name.to_string(), report);
    }

    fn derive_report(applicant: &ApplicantRecord, bureau: CreditBureau) -> CreditReport {
        let credit_score = applicant
            .credit_score
            .map(|score| score.clamp(300.0, 850.0) as u16)
            .unwrap_or(650);
        let utilization = applicant
            .debt_to_income_ratio
            .map(|ratio| ratio.clamp(0.0, 1.0))
            .unwrap_or(0.3);

        CreditReport {
            bureau,
            credit_score,
            open_accounts: 4,
            derogatory_marks: applicant.late_payment_count.min(u32::from(u16::MAX)) as u16,
            credit_utilization: utilization,
            inquiries_last_six_months: 1,
            retrieved_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CreditReportingGateway for InMemoryCreditBureau {
    async fn fetch_report(
        &self,
        applicant: &ApplicantRecord,
        bureau: CreditBureau,
    ) -> Result<CreditReport, VerificationError> {
        if let Some(name) = applicant.full_name.as_deref() {
            let seeded = self.seeded.lock().expect("bureau mutex poisoned");
            if let Some(report) = seeded.get(name) {
                return Ok(report.clone());
            }
        }
        Ok(Self::derive_report(applicant, bureau))
    }
}
