use serde::{Deserialize, Serialize};

use super::DecisionError;

/// Score thresholds and input limits applied by the decision engine.
///
/// Tiers are matched top-down: `excellent_min`, `good_min`, `fair_min`, then `approval_floor`.
/// Anything below the floor is rejected, so raising `approval_floor` turns scores that the
/// default policy approves into rejections. Run [`DecisionConfig::validate`] on any config that
/// does not come from `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub excellent_min: u16,
    pub good_min: u16,
    pub fair_min: u16,
    pub approval_floor: u16,
    pub max_tenure_years: u16,
    pub max_amount_lakhs: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            excellent_min: 750,
            good_min: 700,
            fair_min: 650,
            approval_floor: 630,
            max_tenure_years: 30,
            max_amount_lakhs: 10_000.0,
        }
    }
}

impl DecisionConfig {
    /// Check that the tiers descend and the input ceilings are usable.
    pub fn validate(&self) -> Result<(), DecisionError> {
        let tiers = [
            ("good_min", self.good_min, self.excellent_min),
            ("fair_min", self.fair_min, self.good_min),
            ("approval_floor", self.approval_floor, self.fair_min),
        ];
        for (field, value, above) in tiers {
            if value > above {
                return Err(DecisionError::invalid(
                    field,
                    format!("{value} is above the next tier's minimum of {above}"),
                ));
            }
        }

        if self.max_tenure_years == 0 {
            return Err(DecisionError::invalid(
                "max_tenure_years",
                "at least one year must be allowed".to_string(),
            ));
        }
        if !self.max_amount_lakhs.is_finite() || self.max_amount_lakhs <= 0.0 {
            return Err(DecisionError::invalid(
                "max_amount_lakhs",
                format!("{} must be a positive, finite amount", self.max_amount_lakhs),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_valid() {
        assert_eq!(DecisionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn floor_above_fair_tier_is_rejected() {
        let config = DecisionConfig {
            approval_floor: 700,
            ..DecisionConfig::default()
        };

        let error = config.validate().expect_err("floor above fair tier");
        assert_eq!(error.field(), "approval_floor");
    }

    #[test]
    fn tiers_out_of_order_are_rejected() {
        let config = DecisionConfig {
            good_min: 760,
            ..DecisionConfig::default()
        };

        let error = config.validate().expect_err("good above excellent");
        assert_eq!(error.field(), "good_min");
    }

    #[test]
    fn unusable_ceilings_are_rejected() {
        let no_tenure = DecisionConfig {
            max_tenure_years: 0,
            ..DecisionConfig::default()
        };
        assert_eq!(
            no_tenure.validate().map_err(|error| error.field()),
            Err("max_tenure_years")
        );

        let no_amount = DecisionConfig {
            max_amount_lakhs: f64::NAN,
            ..DecisionConfig::default()
        };
        assert_eq!(
            no_amount.validate().map_err(|error| error.field()),
            Err("max_amount_lakhs")
        );
    }
}
