//! Integration scenarios for the guided loan application and the decision engine behind it.
//!
//! Everything goes through the public service facade and HTTP router so the wizard, scoring,
//! and persistence are exercised together.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use loan_desk::workflows::loan::{
        ApplicantProfile, ApplicationId, ApplicationRecord, ApplicationRepository,
        CannedScanner, DecisionConfig, FaceCheck, FixedScore, LoanApplicationRequest,
        LoanApplicationService, LoanType, Locale, RepositoryError,
    };

    pub(super) fn request(loan_type: LoanType, credit_score: Option<u16>) -> LoanApplicationRequest {
        LoanApplicationRequest {
            loan_type,
            applicant: ApplicantProfile {
                full_name: "Anita Rao".to_string(),
                email: "anita.rao@example.in".to_string(),
                mobile: "9988776655".to_string(),
                language: Locale::Kannada,
            },
            requested_amount_lakhs: 50.0,
            tenure_years: 5,
            credit_score,
            face_check: FaceCheck::Matched,
            documents: Vec::new(),
            answers: Default::default(),
            use_canned_answers: true,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
    }

    impl ApplicationRepository for MemoryRepository {
        fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.application_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.application_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.application_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.values().take(limit).cloned().collect())
        }
    }

    pub(super) fn build_service(
        fallback_score: u16,
    ) -> (
        LoanApplicationService<MemoryRepository>,
        Arc<MemoryRepository>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let service = LoanApplicationService::new(
            repository.clone(),
            Arc::new(FixedScore(fallback_score)),
            DecisionConfig::default(),
        )
        .with_extractor(Arc::new(CannedScanner));
        (service, repository)
    }
}

mod decisions {
    use super::common::*;
    use loan_desk::workflows::loan::{
        ApplicationRepository, CreditTier, DecisionStatus, LoanType, WizardStage,
    };

    #[test]
    fn fair_score_business_loan_is_approved_end_to_end() {
        let (service, repository) = build_service(680);

        let record = service
            .submit(request(LoanType::BusinessLoan, None))
            .expect("application accepted");

        assert_eq!(record.application_id.as_str(), "SCAR000001");
        assert_eq!(record.status, DecisionStatus::Approved);
        assert_eq!(record.answers.len(), 11);

        let decision = record.decision.as_ref().expect("decision");
        assert_eq!(decision.tier, CreditTier::Fair);
        assert_eq!(decision.interest_rate_percent, 9.5);
        assert_eq!(decision.monthly_installment, 105_009);
        assert_eq!(decision.next_steps[0], "Submit additional income proof documents");

        let stored = repository
            .fetch(&record.application_id)
            .expect("fetch")
            .expect("present");
        assert_eq!(stored.status, DecisionStatus::Approved);
    }

    #[test]
    fn prepared_wizard_stops_at_review() {
        let (service, _) = build_service(700);

        let wizard = service
            .prepare(&request(LoanType::HomeLoan, Some(700)))
            .expect("prepared");

        assert_eq!(wizard.stage(), WizardStage::Reviewing);
        assert!(wizard.decision().is_none());
        assert!(wizard.unanswered().is_empty());
    }

    #[test]
    fn low_score_override_is_rejected_but_recorded() {
        let (service, _) = build_service(820);

        let record = service
            .submit(request(LoanType::PersonalLoan, Some(612)))
            .expect("rejection recorded");

        assert_eq!(record.status, DecisionStatus::Rejected);
        assert_eq!(record.input.credit_score, 612);
        let fetched = service.get(&record.application_id).expect("fetch");
        assert_eq!(fetched.decision, record.decision);
    }
}

mod routing {
    use super::common::*;
    use axum::http::StatusCode;
    use loan_desk::workflows::loan::{loan_router, LoanType};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn read_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn submitted_application_is_visible_through_status_route() {
        let (service, _) = build_service(760);
        let router = loan_router(Arc::new(service));

        let payload = serde_json::to_vec(&request(LoanType::HomeLoan, None)).unwrap();
        let response = router
            .clone()
            .oneshot(
                axum::http::Request::post("/api/v1/loan/applications")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = read_json(response).await;
        let id = created["application_id"].as_str().expect("id").to_string();

        let response = router
            .oneshot(
                axum::http::Request::get(format!("/api/v1/loan/applications/{id}"))
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status = read_json(response).await;
        assert_eq!(status["status"], json!("approved"));
        assert_eq!(status["decision"]["interest_rate_percent"], json!(7.5));
    }
}
