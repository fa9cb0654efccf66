use serde::{Deserialize, Serialize};

pub const RUPEES_PER_LAKH: f64 = 100_000.0;

/// Equated monthly installment under a fixed-rate amortizing loan.
///
/// `emi = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate. A zero rate degrades to
/// straight-line repayment.
pub fn monthly_installment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    if months == 0 {
        return principal;
    }
    if monthly_rate <= 0.0 {
        return principal / f64::from(months);
    }

    let factor = (1.0 + monthly_rate).powf(f64::from(months));
    principal * monthly_rate * factor / (factor - 1.0)
}

/// Rounded repayment figures quoted to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentPlan {
    pub monthly_installment: u64,
    pub total_repayment: u64,
    pub total_interest: u64,
}

impl RepaymentPlan {
    /// Returns `None` when the installment is not a finite, representable amount.
    pub fn quote(principal: u64, annual_rate_percent: f64, months: u32) -> Option<Self> {
        let emi = monthly_installment(principal as f64, annual_rate_percent, months).round();
        if !emi.is_finite() || emi < 0.0 || emi > u64::MAX as f64 {
            return None;
        }

        let monthly_installment = emi as u64;
        let total_repayment = monthly_installment.checked_mul(u64::from(months))?;

        Some(Self {
            monthly_installment,
            total_repayment,
            total_interest: total_repayment.saturating_sub(principal),
        })
    }
}
