use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::domain::{
    DocumentSetVerification, DocumentVerificationResult, ExtractedFacts, SubmittedDocument,
    VerificationStatus,
};
use super::VerificationError;

/// Outbound seam to the document authenticity / OCR / compliance pipeline.
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    async fn verify_document(
        &self,
        document: &SubmittedDocument,
    ) -> Result<DocumentVerificationResult, VerificationError>;

    async fn verify_document_set(
        &self,
        documents: &[SubmittedDocument],
    ) -> Result<DocumentSetVerification, VerificationError>;
}

const VERIFIED_FLOOR: f64 = 0.85;
const REVIEW_FLOOR: f64 = 0.6;

const AUTHENTICITY_WEIGHT: f64 = 0.5;
const OCR_WEIGHT: f64 = 0.25;
const COMPLIANCE_WEIGHT: f64 = 0.25;

const SET_AUTHENTICITY_WEIGHT: f64 = 0.7;
const SET_CONSISTENCY_WEIGHT: f64 = 0.3;

/// Analyzer output for one document before status bucketing.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub authenticity_score: f64,
    pub ocr_confidence: f64,
    pub compliance_score: f64,
    pub extracted: ExtractedFacts,
}

impl Default for DocumentAnalysis {
    fn default() -> Self {
        Self {
            authenticity_score: 0.92,
            ocr_confidence: 0.9,
            compliance_score: 0.9,
            extracted: ExtractedFacts::default(),
        }
    }
}

fn status_for(score: f64) -> VerificationStatus {
    if score >= VERIFIED_FLOOR {
        VerificationStatus::Verified
    } else if score >= REVIEW_FLOOR {
        VerificationStatus::RequiresReview
    } else {
        VerificationStatus::Rejected
    }
}

/// Fold one analysis into a per-document result.
pub fn assemble_document_result(
    document: &SubmittedDocument,
    analysis: &DocumentAnalysis,
) -> DocumentVerificationResult {
    let composite = AUTHENTICITY_WEIGHT * analysis.authenticity_score
        + OCR_WEIGHT * analysis.ocr_confidence
        + COMPLIANCE_WEIGHT * analysis.compliance_score;

    DocumentVerificationResult {
        document: document.clone(),
        authenticity_score: analysis.authenticity_score,
        ocr_confidence: analysis.ocr_confidence,
        compliance_score: analysis.compliance_score,
        extracted: analysis.extracted.clone(),
        status: status_for(composite),
    }
}

/// Fraction of cross-document fact comparisons that agree. A fact only
/// participates once it appears on at least two documents; a set with
/// nothing to compare is vacuously consistent.
pub fn consistency_score(results: &[DocumentVerificationResult]) -> f64 {
    let mut checks = 0u32;
    let mut consistent = 0u32;

    let facts: [fn(&ExtractedFacts) -> Option<String>; 3] = [
        |extracted| extracted.full_name.clone(),
        |extracted| extracted.address.clone(),
        |extracted| extracted.employer.clone(),
    ];

    for select in facts {
        let values: Vec<String> = results
            .iter()
            .filter_map(|result| select(&result.extracted))
            .map(|value| value.trim().to_ascii_lowercase())
            .collect();
        if values.len() < 2 {
            continue;
        }
        checks += 1;
        if values.iter().all(|value| value == &values[0]) {
            consistent += 1;
        }
    }

    if checks == 0 {
        1.0
    } else {
        f64::from(consistent) / f64::from(checks)
    }
}

/// Blend per-document scores with cross-reference consistency into the
/// whole-set verdict.
pub fn assemble_set_result(results: Vec<DocumentVerificationResult>) -> DocumentSetVerification {
    let consistency = consistency_score(&results);
    let average_authenticity = if results.is_empty() {
        0.0
    } else {
        results
            .iter()
            .map(|result| {
                AUTHENTICITY_WEIGHT * result.authenticity_score
                    + OCR_WEIGHT * result.ocr_confidence
                    + COMPLIANCE_WEIGHT * result.compliance_score
            })
            .sum::<f64>()
            / results.len() as f64
    };

    let overall =
        SET_AUTHENTICITY_WEIGHT * average_authenticity + SET_CONSISTENCY_WEIGHT * consistency;

    DocumentSetVerification {
        documents: results,
        consistency_score: consistency,
        overall_score: overall,
        status: status_for(overall),
    }
}

/// Deterministic in-memory analyzer. Analyses are seeded per storage key;
/// unseeded documents pass with default scores and no extracted facts.
#[derive(Debug, Default)]
pub struct InMemoryDocumentAnalyzer {
    analyses: Mutex<HashMap<String, DocumentAnalysis>>,
}

impl InMemoryDocumentAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, storage_key: &str, analysis: DocumentAnalysis) {
        self.analyses
            .lock()
            .expect("analyzer mutex poisoned")
            .insert(storage_key.to_string(), analysis);
    }

    fn analysis_for(&self, document: &SubmittedDocument) -> DocumentAnalysis {
        self.analyses
            .lock()
            .expect("analyzer mutex poisoned")
            .get(&document.storage_key)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentGateway for InMemoryDocumentAnalyzer {
    async fn verify_document(
        &self,
        document: &SubmittedDocument,
    ) -> Result<DocumentVerificationResult, VerificationError> {
        Ok(assemble_document_result(document, &self.analysis_for(document)))
    }

    async fn verify_document_set(
        &self,
        documents: &[SubmittedDocument],
    ) -> Result<DocumentSetVerification, VerificationError> {
        let results = documents
            .iter()
            .map(|document| assemble_document_result(document, &self.analysis_for(document)))
            .collect();
        Ok(assemble_set_result(results))
    }
}
