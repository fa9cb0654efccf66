use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::loan::documents::CannedScanner;
use crate::workflows::loan::domain::{
    ApplicantProfile, ApplicationId, LoanDecisionInput, LoanType, Locale,
};
use crate::workflows::loan::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError,
};
use crate::workflows::loan::scoring::FixedScore;
use crate::workflows::loan::service::{DocumentSubmission, LoanApplicationRequest};
use crate::workflows::loan::wizard::FaceCheck;
use crate::workflows::loan::{
    loan_router, DecisionConfig, DecisionEngine, DocumentKind, LoanApplicationService,
};

pub(super) fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        mobile: "9876543210".to_string(),
        language: Locale::English,
    }
}

pub(super) fn decision_input(credit_score: u16, amount_lakhs: f64, years: u16) -> LoanDecisionInput {
    LoanDecisionInput {
        credit_score,
        requested_amount_lakhs: amount_lakhs,
        tenure_years: years,
        applicant_name: Some("Jane Doe".to_string()),
    }
}

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new(DecisionConfig::default())
}

pub(super) fn identity_documents() -> Vec<DocumentSubmission> {
    vec![
        DocumentSubmission {
            kind: DocumentKind::Aadhaar,
            manual_number: Some("1234 5678 9012".to_string()),
            ocr_text: None,
        },
        DocumentSubmission {
            kind: DocumentKind::Pan,
            manual_number: Some("abcde1234f".to_string()),
            ocr_text: None,
        },
    ]
}

pub(super) fn request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        loan_type: LoanType::HomeLoan,
        applicant: applicant(),
        requested_amount_lakhs: 25.0,
        tenure_years: 10,
        credit_score: Some(800),
        face_check: FaceCheck::Matched,
        documents: identity_documents(),
        answers: Default::default(),
        use_canned_answers: true,
    }
}

pub(super) fn rejected_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        credit_score: Some(600),
        ..request()
    }
}

pub(super) fn build_service() -> (LoanApplicationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanApplicationService::new(
        repository.clone(),
        Arc::new(FixedScore(720)),
        DecisionConfig::default(),
    );
    (service, repository)
}

pub(super) fn canned_service() -> LoanApplicationService<MemoryRepository> {
    let (service, _) = build_service();
    service.with_extractor(Arc::new(CannedScanner))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.application_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.application_id.cmp(&a.application_id))
        });
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Stores inserts in memory but refuses every later update.
#[derive(Default, Clone)]
pub(super) struct WriteOnceRepository {
    pub(super) inner: MemoryRepository,
}

impl ApplicationRepository for WriteOnceRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("updates disabled".to_string()))
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.recent(limit)
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn loan_router_with_service(
    service: LoanApplicationService<MemoryRepository>,
) -> axum::Router {
    loan_router(Arc::new(service))
}

pub(super) fn is_application_id(value: &str, initials: &str) -> bool {
    let Some(rest) = value.strip_prefix("SC") else {
        return false;
    };
    let Some(digits) = rest.strip_prefix(initials) else {
        return false;
    };
    digits.len() == 6 && digits.bytes().all(|byte| byte.is_ascii_digit())
}
