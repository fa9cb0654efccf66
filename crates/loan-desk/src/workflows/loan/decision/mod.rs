mod config;
pub mod emi;
mod policy;

pub use config::DecisionConfig;
pub use emi::{RepaymentPlan, RUPEES_PER_LAKH};
pub use policy::CreditTier;

use super::domain::{
    ApplicationId, LoanDecision, LoanDecisionInput, APPLICATION_SERIAL_LIMIT,
};

const MIN_CREDIT_SCORE: u16 = 300;
const MAX_CREDIT_SCORE: u16 = 900;

/// Stateless evaluator mapping scalar loan inputs to a decision record.
///
/// The engine performs no I/O and holds no mutable state; identical inputs always yield
/// identical decisions. Score sampling and serial allocation belong to the caller.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Reject malformed inputs before any figures are computed.
    pub fn check(&self, input: &LoanDecisionInput) -> Result<(), DecisionError> {
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&input.credit_score) {
            return Err(DecisionError::invalid(
                "credit_score",
                format!(
                    "{} outside {MIN_CREDIT_SCORE}..={MAX_CREDIT_SCORE}",
                    input.credit_score
                ),
            ));
        }

        let amount = input.requested_amount_lakhs;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DecisionError::invalid(
                "requested_amount_lakhs",
                format!("{amount} must be a positive, finite amount"),
            ));
        }
        if amount > self.config.max_amount_lakhs {
            return Err(DecisionError::invalid(
                "requested_amount_lakhs",
                format!(
                    "{amount} exceeds the {} lakh ceiling",
                    self.config.max_amount_lakhs
                ),
            ));
        }
        if principal_in_rupees(amount) == 0 {
            return Err(DecisionError::invalid(
                "requested_amount_lakhs",
                format!("{amount} rounds to less than one rupee"),
            ));
        }

        if input.tenure_years == 0 {
            return Err(DecisionError::invalid(
                "tenure_years",
                "tenure must be at least one year".to_string(),
            ));
        }
        if input.tenure_years > self.config.max_tenure_years {
            return Err(DecisionError::invalid(
                "tenure_years",
                format!(
                    "{} exceeds the {}-year maximum",
                    input.tenure_years, self.config.max_tenure_years
                ),
            ));
        }

        Ok(())
    }

    /// Evaluate an application, stamping `serial` into the application id.
    pub fn evaluate(
        &self,
        input: &LoanDecisionInput,
        serial: u32,
    ) -> Result<LoanDecision, DecisionError> {
        self.check(input)?;
        if serial >= APPLICATION_SERIAL_LIMIT {
            return Err(DecisionError::invalid(
                "serial",
                format!("{serial} does not fit in six digits"),
            ));
        }

        let tier = CreditTier::classify(input.credit_score, &self.config);
        let interest_rate_percent = tier.interest_rate_percent();
        let principal = principal_in_rupees(input.requested_amount_lakhs);
        let tenure_months = u32::from(input.tenure_years) * 12;

        let plan = RepaymentPlan::quote(principal, interest_rate_percent, tenure_months)
            .ok_or_else(|| {
                DecisionError::invalid(
                    "requested_amount_lakhs",
                    "installment is not representable".to_string(),
                )
            })?;

        Ok(LoanDecision {
            application_id: ApplicationId::for_applicant(input.applicant_name.as_deref(), serial),
            status: tier.status(),
            tier,
            credit_score: input.credit_score,
            interest_rate_percent,
            principal,
            tenure_months,
            monthly_installment: plan.monthly_installment,
            total_repayment: plan.total_repayment,
            total_interest: plan.total_interest,
            reasons: tier.reasons(input.credit_score),
            next_steps: tier.next_steps(),
        })
    }
}

fn principal_in_rupees(amount_lakhs: f64) -> u64 {
    (amount_lakhs * RUPEES_PER_LAKH).round() as u64
}

/// Caller contract violations detected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl DecisionError {
    fn invalid(field: &'static str, reason: String) -> Self {
        Self::InvalidInput { field, reason }
    }

    pub fn field(&self) -> &'static str {
        match self {
            DecisionError::InvalidInput { field, .. } => *field,
        }
    }
}
