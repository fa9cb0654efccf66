use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::documents::DocumentEvidence;
use super::domain::{
    ApplicantProfile, ApplicationId, DecisionStatus, LoanDecision, LoanDecisionInput, LoanType,
};

/// Repository record for a submitted application and its decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub loan_type: LoanType,
    pub applicant: ApplicantProfile,
    pub input: LoanDecisionInput,
    pub documents: Vec<DocumentEvidence>,
    pub answers: BTreeMap<String, String>,
    pub status: DecisionStatus,
    pub decision: Option<LoanDecision>,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn decision_summary(&self) -> String {
        match &self.decision {
            Some(decision) => decision.summary(),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            loan_type: self.loan_type,
            status: self.status.label(),
            decision_summary: self.decision_summary(),
            submitted_at: self.submitted_at,
            decision: self.decision.clone(),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Most recently submitted records first.
    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public view of an application's progress.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub loan_type: LoanType,
    pub status: &'static str,
    pub decision_summary: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<LoanDecision>,
}
