use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::screening::domain::ApplicantRecord;

use super::background::BackgroundCheckGateway;
use super::credit::CreditReportingGateway;
use super::documents::DocumentGateway;
use super::domain::{
    BackgroundCheckScope, CreditBureau, SubmittedDocument, VerificationBundle,
    VerificationChannel,
};

/// Fans out to the three verification collaborators concurrently and folds
/// whatever came back into one transient bundle. A slow or failing channel
/// degrades to "unavailable" instead of failing the screening request.
pub struct VerificationOrchestrator {
    credit: Arc<dyn CreditReportingGateway>,
    background: Arc<dyn BackgroundCheckGateway>,
    documents: Arc<dyn DocumentGateway>,
    channel_timeout: Duration,
}

impl VerificationOrchestrator {
    pub fn new(
        credit: Arc<dyn CreditReportingGateway>,
        background: Arc<dyn BackgroundCheckGateway>,
        documents: Arc<dyn DocumentGateway>,
        channel_timeout: Duration,
    ) -> Self {
        Self {
            credit,
            background,
            documents,
            channel_timeout,
        }
    }

    /// Run all three external calls concurrently, each under its own
    /// timeout. No ordering dependency exists between the channels.
    pub async fn verify_applicant(
        &self,
        applicant: &ApplicantRecord,
        bureau: CreditBureau,
        scope: BackgroundCheckScope,
        documents: &[SubmittedDocument],
    ) -> VerificationBundle {
        let credit_call = timeout(self.channel_timeout, self.credit.fetch_report(applicant, bureau));
        let background_call = timeout(
            self.channel_timeout,
            self.background.run_check(applicant, scope),
        );
        let document_call = async {
            if documents.is_empty() {
                None
            } else {
                Some(
                    timeout(
                        self.channel_timeout,
                        self.documents.verify_document_set(documents),
                    )
                    .await,
                )
            }
        };

        let (credit_result, background_result, document_result) =
            tokio::join!(credit_call, background_call, document_call);

        let mut bundle = VerificationBundle::default();

        match credit_result {
            Ok(Ok(report)) => bundle.credit = Some(report),
            Ok(Err(error)) => {
                warn!(%error, channel = VerificationChannel::Credit.label(), "verification failed");
                bundle.unavailable.push(VerificationChannel::Credit);
            }
            Err(_) => {
                warn!(channel = VerificationChannel::Credit.label(), "verification timed out");
                bundle.unavailable.push(VerificationChannel::Credit);
            }
        }

        match background_result {
            Ok(Ok(result)) => bundle.background = Some(result),
            Ok(Err(error)) => {
                warn!(
                    %error,
                    channel = VerificationChannel::Background.label(),
                    "verification failed"
                );
                bundle.unavailable.push(VerificationChannel::Background);
            }
            Err(_) => {
                warn!(
                    channel = VerificationChannel::Background.label(),
                    "verification timed out"
                );
                bundle.unavailable.push(VerificationChannel::Background);
            }
        }

        match document_result {
            None => {}
            Some(Ok(Ok(result))) => bundle.documents = Some(result),
            Some(Ok(Err(error))) => {
                warn!(
                    %error,
                    channel = VerificationChannel::Documents.label(),
                    "verification failed"
                );
                bundle.unavailable.push(VerificationChannel::Documents);
            }
            Some(Err(_)) => {
                warn!(
                    channel = VerificationChannel::Documents.label(),
                    "verification timed out"
                );
                bundle.unavailable.push(VerificationChannel::Documents);
            }
        }

        bundle
    }
}
