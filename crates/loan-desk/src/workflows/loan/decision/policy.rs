use serde::{Deserialize, Serialize};

use super::super::domain::DecisionStatus;
use super::config::DecisionConfig;

/// Credit-score bracket driving the rate, outcome, and customer messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl CreditTier {
    pub fn classify(credit_score: u16, config: &DecisionConfig) -> Self {
        if credit_score >= config.excellent_min {
            CreditTier::Excellent
        } else if credit_score >= config.good_min {
            CreditTier::Good
        } else if credit_score >= config.fair_min {
            CreditTier::Fair
        } else if credit_score >= config.approval_floor {
            CreditTier::BelowAverage
        } else {
            CreditTier::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditTier::Excellent => "excellent",
            CreditTier::Good => "good",
            CreditTier::Fair => "fair",
            CreditTier::BelowAverage => "below_average",
            CreditTier::Poor => "poor",
        }
    }

    /// Annual rate quoted for the tier. Rejections still carry the highest rate.
    pub const fn interest_rate_percent(self) -> f64 {
        match self {
            CreditTier::Excellent => 7.5,
            CreditTier::Good => 8.5,
            CreditTier::Fair => 9.5,
            CreditTier::BelowAverage | CreditTier::Poor => 10.5,
        }
    }

    pub const fn status(self) -> DecisionStatus {
        match self {
            CreditTier::Poor => DecisionStatus::Rejected,
            _ => DecisionStatus::Approved,
        }
    }

    /// Justification shown to the applicant, primary reason first.
    pub fn reasons(self, credit_score: u16) -> Vec<String> {
        let headline = match self {
            CreditTier::Excellent => format!("Excellent credit score of {credit_score}"),
            CreditTier::Good => format!("Good credit score of {credit_score}"),
            CreditTier::Fair => format!("Fair credit score of {credit_score}"),
            CreditTier::BelowAverage => format!("Below average credit score of {credit_score}"),
            CreditTier::Poor => format!("Credit score below minimum threshold: {credit_score}"),
        };

        let supporting: [&str; 3] = match self {
            CreditTier::Excellent => [
                "Strong financial history with no defaults",
                "Adequate income-to-loan ratio",
                "Stable employment history",
            ],
            CreditTier::Good => [
                "No recent defaults on existing loans",
                "Income meets minimum requirements",
                "Acceptable debt-to-income ratio",
            ],
            CreditTier::Fair => [
                "Limited credit history but no major concerns",
                "Income is sufficient with minimal risk factors",
                "Additional documentation may be required",
            ],
            CreditTier::BelowAverage => [
                "Higher risk profile based on credit history",
                "Approved with higher interest rate to offset risk",
                "Regular payment history will help improve future rates",
            ],
            CreditTier::Poor => [
                "Unfavorable debt-to-income ratio",
                "Insufficient income for the requested loan amount",
                "Credit history shows recent payment irregularities",
            ],
        };

        std::iter::once(headline)
            .chain(supporting.iter().map(|reason| reason.to_string()))
            .collect()
    }

    pub fn next_steps(self) -> Vec<String> {
        let steps: [&str; 4] = match self {
            CreditTier::Excellent => [
                "Visit your nearest Standard Chartered branch with KYC documents",
                "Sign the loan agreement",
                "Funds will be disbursed within 48 hours",
                "Set up auto-payment for monthly EMIs",
            ],
            CreditTier::Good => [
                "Visit your nearest Standard Chartered branch with KYC documents",
                "Complete income verification process",
                "Sign the loan agreement",
                "Funds will be disbursed within 3-5 business days",
            ],
            CreditTier::Fair => [
                "Submit additional income proof documents",
                "Complete detailed financial verification",
                "Visit your nearest Standard Chartered branch for document verification",
                "Funds will be disbursed within 7 business days after verification",
            ],
            CreditTier::BelowAverage => [
                "Submit additional collateral documentation",
                "Complete enhanced verification process",
                "Visit branch with co-applicant (if applicable)",
                "Funds will be disbursed within 10 business days after verification",
            ],
            CreditTier::Poor => [
                "Work on improving your credit score",
                "Reduce existing debt obligations",
                "Maintain regular payments on existing loans",
                "You can reapply after 6 months with improved financial standing",
            ],
        };

        steps.iter().map(|step| step.to_string()).collect()
    }
}
