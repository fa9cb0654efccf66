use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::decision::{DecisionConfig, DecisionEngine, DecisionError};
use super::documents::{
    DocumentError, DocumentEvidence, DocumentExtractor, DocumentKind, PatternExtractor,
};
use super::domain::{
    ApplicantProfile, ApplicationId, LoanDecision, LoanDecisionInput, LoanType,
    ProfileError, APPLICATION_SERIAL_LIMIT,
};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};
use super::scoring::CreditScoreSource;
use super::wizard::{ApplicationWizard, FaceCheck, WizardError};

/// Everything the applicant supplies in one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplicationRequest {
    pub loan_type: LoanType,
    pub applicant: ApplicantProfile,
    pub requested_amount_lakhs: f64,
    pub tenure_years: u16,
    /// Bureau score override. When absent the service samples its score source.
    #[serde(default)]
    pub credit_score: Option<u16>,
    /// Required so an omitted check never counts as a match.
    pub face_check: FaceCheck,
    #[serde(default)]
    pub documents: Vec<DocumentSubmission>,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
    /// Fill unanswered questions with the scripted answers.
    #[serde(default = "default_true")]
    pub use_canned_answers: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub kind: DocumentKind,
    #[serde(default)]
    pub manual_number: Option<String>,
    #[serde(default)]
    pub ocr_text: Option<String>,
}

/// Serials wrap at [`APPLICATION_SERIAL_LIMIT`], so a repeated name can land on an id that is
/// already stored. Submission moves on to the next serial this many times before reporting the
/// conflict.
const MAX_ID_ATTEMPTS: u32 = 16;

/// Service composing the application wizard, decision engine, and repository.
pub struct LoanApplicationService<R> {
    repository: Arc<R>,
    engine: Arc<DecisionEngine>,
    scores: Arc<dyn CreditScoreSource>,
    extractor: Arc<dyn DocumentExtractor>,
    serials: AtomicU32,
}

impl<R> LoanApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        scores: Arc<dyn CreditScoreSource>,
        config: DecisionConfig,
    ) -> Self {
        Self {
            repository,
            engine: Arc::new(DecisionEngine::new(config)),
            scores,
            extractor: Arc::new(PatternExtractor),
            serials: AtomicU32::new(1),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Start the serial sequence somewhere other than 1.
    pub fn starting_at(self, serial: u32) -> Self {
        self.serials
            .store(serial % APPLICATION_SERIAL_LIMIT, Ordering::Relaxed);
        self
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    fn next_serial(&self) -> u32 {
        self.serials.fetch_add(1, Ordering::Relaxed) % APPLICATION_SERIAL_LIMIT
    }

    /// Walk the wizard through verification, documents, and answers up to review.
    pub fn prepare(
        &self,
        request: &LoanApplicationRequest,
    ) -> Result<ApplicationWizard, LoanServiceError> {
        request.applicant.validate()?;

        let mut wizard = ApplicationWizard::new(request.loan_type, request.applicant.clone());
        wizard.complete_verification(request.face_check)?;

        while let Some(kind) = wizard.next_document() {
            let submission = request.documents.iter().find(|doc| doc.kind == kind);
            let evidence = self.resolve_document(kind, submission)?;
            if evidence.extraction_mismatch {
                warn!(
                    document = kind.label(),
                    "manual entry differs from extracted number"
                );
            }
            if evidence.kind_mismatch {
                warn!(
                    document = kind.label(),
                    "captured text looks like a different document"
                );
            }
            wizard.record_document(evidence)?;
        }

        for submission in request
            .documents
            .iter()
            .filter(|doc| doc.kind == DocumentKind::IncomeProof)
        {
            let evidence = self.resolve_document(submission.kind, Some(submission))?;
            wizard.attach_supporting(evidence)?;
        }

        for (question_id, answer) in &request.answers {
            wizard.record_answer(question_id, answer)?;
        }
        if request.use_canned_answers {
            let filled = wizard.use_canned_answers()?;
            debug!(filled, "filled scripted answers");
        }
        wizard.begin_review()?;

        Ok(wizard)
    }

    fn resolve_document(
        &self,
        kind: DocumentKind,
        submission: Option<&DocumentSubmission>,
    ) -> Result<DocumentEvidence, DocumentError> {
        let text = submission
            .and_then(|doc| doc.ocr_text.as_deref())
            .unwrap_or_default();
        let extracted = self.extractor.extract(kind, text);
        let manual = submission.and_then(|doc| doc.manual_number.as_deref());
        DocumentEvidence::resolve(kind, extracted, manual)
    }

    /// Submit a new application. The decision is computed before anything is stored, so a
    /// record is written exactly once and never left pending.
    pub fn submit(
        &self,
        request: LoanApplicationRequest,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut wizard = self.prepare(&request)?;

        let credit_score = match request.credit_score {
            Some(score) => score,
            None => self.scores.sample(),
        };
        let input = LoanDecisionInput {
            credit_score,
            requested_amount_lakhs: request.requested_amount_lakhs,
            tenure_years: request.tenure_years,
            applicant_name: Some(request.applicant.full_name.trim().to_string()),
        };
        self.engine.check(&input)?;

        let mut documents = wizard.documents().to_vec();
        documents.extend_from_slice(wizard.supporting_documents());
        let answers: BTreeMap<String, String> = wizard
            .answers()
            .iter()
            .map(|(id, answer)| (id.to_string(), answer.clone()))
            .collect();

        let mut attempts = 0;
        let (record, serial) = loop {
            let serial = self.next_serial();
            let decision = self.engine.evaluate(&input, serial)?;
            let record = ApplicationRecord {
                application_id: decision.application_id.clone(),
                loan_type: request.loan_type,
                applicant: request.applicant.clone(),
                input: input.clone(),
                documents: documents.clone(),
                answers: answers.clone(),
                status: decision.status,
                decision: Some(decision),
                submitted_at: Utc::now(),
            };

            attempts += 1;
            match self.repository.insert(record) {
                Ok(stored) => break (stored, serial),
                Err(RepositoryError::Conflict) if attempts < MAX_ID_ATTEMPTS => {
                    warn!(serial, "application id already taken, trying the next serial");
                }
                Err(error) => return Err(error.into()),
            }
        };

        if let Some(decision) = &record.decision {
            wizard.submit(decision.clone())?;
        }
        info!(
            application_id = record.application_id.as_str(),
            loan_type = record.loan_type.slug(),
            serial,
            status = record.status.label(),
            credit_score = record.input.credit_score,
            "loan decision issued"
        );
        Ok(record)
    }

    /// Evaluate inputs without persisting anything or consuming a serial.
    pub fn quote(&self, input: &LoanDecisionInput) -> Result<LoanDecision, LoanServiceError> {
        let decision = self.engine.evaluate(input, 0)?;
        debug!(
            credit_score = input.credit_score,
            status = decision.status.label(),
            "quote evaluated"
        );
        Ok(decision)
    }

    /// Fetch an application and its current status for API responses.
    pub fn get(&self, application_id: &ApplicationId) -> Result<ApplicationRecord, LoanServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, LoanServiceError> {
        Ok(self.repository.recent(limit)?)
    }
}

/// Error raised by the loan application service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl LoanServiceError {
    /// Whether the caller can fix the request and try again.
    pub fn is_invalid_request(&self) -> bool {
        !matches!(self, LoanServiceError::Repository(_))
    }
}
