//! Loan origination desk: credit-tier decisions and the guided application around them.
//!
//! A submission walks the [`ApplicationWizard`] (identity check, documents, interview), is
//! scored by a [`CreditScoreSource`] unless the caller supplies a score, and is decided by
//! the pure [`DecisionEngine`]. The service persists records through an
//! [`ApplicationRepository`] and the router exposes the flow over HTTP.

pub mod decision;
pub mod documents;
pub mod domain;
pub mod questions;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use decision::{CreditTier, DecisionConfig, DecisionEngine, DecisionError, RepaymentPlan};
pub use documents::{
    CannedScanner, DocumentError, DocumentEvidence, DocumentExtractor, DocumentKind,
    EvidenceSource, ExtractedFields, PatternExtractor,
};
pub use domain::{
    ApplicantProfile, ApplicationId, DecisionStatus, LoanDecision, LoanDecisionInput, LoanType,
    Locale, ProfileError,
};
pub use questions::{Question, QuestionScript};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, RepositoryError,
};
pub use router::loan_router;
pub use scoring::{CreditScoreSource, FixedScore, SimulatedBureau};
pub use service::{
    DocumentSubmission, LoanApplicationRequest, LoanApplicationService, LoanServiceError,
};
pub use wizard::{ApplicationWizard, FaceCheck, WizardError, WizardStage};
