//! Guided application flow.
//!
//! The wizard owns the applicant-facing progression only. It never computes a decision; it
//! accepts one from the engine at submission time and then becomes read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::documents::{DocumentEvidence, DocumentKind};
use super::domain::{ApplicantProfile, LoanDecision, LoanType};
use super::questions::QuestionScript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    AwaitingVerification,
    AwaitingDocuments,
    AwaitingAnswers,
    Reviewing,
    Submitted,
}

impl WizardStage {
    pub const fn label(self) -> &'static str {
        match self {
            WizardStage::AwaitingVerification => "awaiting-verification",
            WizardStage::AwaitingDocuments => "awaiting-documents",
            WizardStage::AwaitingAnswers => "awaiting-answers",
            WizardStage::Reviewing => "reviewing",
            WizardStage::Submitted => "submitted",
        }
    }
}

/// Outcome reported by the face verification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum FaceCheck {
    Matched,
    Mismatched,
    /// Camera could not be opened; the applicant may confirm identity manually instead.
    CaptureUnavailable { manual_confirmation: bool },
}

/// Identity documents are collected in this order.
const DOCUMENT_SEQUENCE: [DocumentKind; 2] = [DocumentKind::Aadhaar, DocumentKind::Pan];

#[derive(Debug, Clone)]
pub struct ApplicationWizard {
    loan_type: LoanType,
    applicant: ApplicantProfile,
    script: QuestionScript,
    stage: WizardStage,
    documents: Vec<DocumentEvidence>,
    supporting: Vec<DocumentEvidence>,
    answers: BTreeMap<&'static str, String>,
    decision: Option<LoanDecision>,
}

impl ApplicationWizard {
    pub fn new(loan_type: LoanType, applicant: ApplicantProfile) -> Self {
        Self {
            loan_type,
            applicant,
            script: QuestionScript::for_loan(loan_type),
            stage: WizardStage::AwaitingVerification,
            documents: Vec::new(),
            supporting: Vec::new(),
            answers: BTreeMap::new(),
            decision: None,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn loan_type(&self) -> LoanType {
        self.loan_type
    }

    pub fn applicant(&self) -> &ApplicantProfile {
        &self.applicant
    }

    pub fn script(&self) -> &QuestionScript {
        &self.script
    }

    pub fn documents(&self) -> &[DocumentEvidence] {
        &self.documents
    }

    pub fn supporting_documents(&self) -> &[DocumentEvidence] {
        &self.supporting
    }

    pub fn answers(&self) -> &BTreeMap<&'static str, String> {
        &self.answers
    }

    pub fn decision(&self) -> Option<&LoanDecision> {
        self.decision.as_ref()
    }

    /// Next identity document the wizard expects, if any.
    pub fn next_document(&self) -> Option<DocumentKind> {
        DOCUMENT_SEQUENCE.get(self.documents.len()).copied()
    }

    pub fn unanswered(&self) -> Vec<&'static str> {
        self.script
            .ids()
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    pub fn complete_verification(&mut self, check: FaceCheck) -> Result<(), WizardError> {
        self.expect_stage(WizardStage::AwaitingVerification, "complete_verification")?;

        match check {
            FaceCheck::Matched
            | FaceCheck::CaptureUnavailable {
                manual_confirmation: true,
            } => {
                self.stage = WizardStage::AwaitingDocuments;
                Ok(())
            }
            FaceCheck::Mismatched
            | FaceCheck::CaptureUnavailable {
                manual_confirmation: false,
            } => Err(WizardError::VerificationFailed(check)),
        }
    }

    pub fn record_document(&mut self, evidence: DocumentEvidence) -> Result<(), WizardError> {
        self.expect_stage(WizardStage::AwaitingDocuments, "record_document")?;

        let expected = self
            .next_document()
            .ok_or(WizardError::InvalidTransition {
                stage: self.stage,
                action: "record_document",
            })?;
        if evidence.kind != expected {
            return Err(WizardError::UnexpectedDocument {
                expected,
                found: evidence.kind,
            });
        }

        self.documents.push(evidence);
        if self.next_document().is_none() {
            self.stage = WizardStage::AwaitingAnswers;
        }
        Ok(())
    }

    /// Attach a non-identity document such as income proof. Allowed until submission.
    pub fn attach_supporting(&mut self, evidence: DocumentEvidence) -> Result<(), WizardError> {
        if self.stage == WizardStage::Submitted {
            return Err(WizardError::InvalidTransition {
                stage: self.stage,
                action: "attach_supporting",
            });
        }
        if DOCUMENT_SEQUENCE.contains(&evidence.kind) {
            return Err(WizardError::IdentityDocumentOutOfSequence(evidence.kind));
        }

        self.supporting.push(evidence);
        Ok(())
    }

    pub fn record_answer(&mut self, question_id: &str, answer: &str) -> Result<(), WizardError> {
        self.expect_stage(WizardStage::AwaitingAnswers, "record_answer")?;

        let question = self
            .script
            .lookup(question_id)
            .ok_or_else(|| WizardError::UnknownQuestion(question_id.to_string()))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(WizardError::EmptyAnswer(question.id.to_string()));
        }

        self.answers.insert(question.id, answer.to_string());
        Ok(())
    }

    /// Fill every unanswered question with its scripted answer. Returns how many were filled.
    pub fn use_canned_answers(&mut self) -> Result<usize, WizardError> {
        self.expect_stage(WizardStage::AwaitingAnswers, "use_canned_answers")?;

        let mut filled = 0;
        for question in self.script.questions {
            if !self.answers.contains_key(question.id) {
                self.answers
                    .insert(question.id, question.canned_answer.to_string());
                filled += 1;
            }
        }
        Ok(filled)
    }

    pub fn begin_review(&mut self) -> Result<(), WizardError> {
        self.expect_stage(WizardStage::AwaitingAnswers, "begin_review")?;

        let missing = self.unanswered();
        if !missing.is_empty() {
            return Err(WizardError::UnansweredQuestions(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }

        self.stage = WizardStage::Reviewing;
        Ok(())
    }

    pub fn reopen_answers(&mut self) -> Result<(), WizardError> {
        self.expect_stage(WizardStage::Reviewing, "reopen_answers")?;
        self.stage = WizardStage::AwaitingAnswers;
        Ok(())
    }

    pub fn submit(&mut self, decision: LoanDecision) -> Result<&LoanDecision, WizardError> {
        self.expect_stage(WizardStage::Reviewing, "submit")?;
        self.stage = WizardStage::Submitted;
        Ok(self.decision.insert(decision))
    }

    fn expect_stage(&self, expected: WizardStage, action: &'static str) -> Result<(), WizardError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("cannot {action} while {}", .stage.label())]
    InvalidTransition {
        stage: WizardStage,
        action: &'static str,
    },
    #[error("identity verification did not pass: {0:?}")]
    VerificationFailed(FaceCheck),
    #[error("expected {} document, received {}", .expected.label(), .found.label())]
    UnexpectedDocument {
        expected: DocumentKind,
        found: DocumentKind,
    },
    #[error("{} documents must go through the identity step", .0.label())]
    IdentityDocumentOutOfSequence(DocumentKind),
    #[error("question '{0}' is not part of this interview")]
    UnknownQuestion(String),
    #[error("answer for '{0}' is empty")]
    EmptyAnswer(String),
    #[error("{} question(s) still unanswered", .0.len())]
    UnansweredQuestions(Vec<String>),
}
