use super::common::*;
use crate::workflows::loan::decision::emi::monthly_installment;
use crate::workflows::loan::domain::DecisionStatus;
use crate::workflows::loan::{CreditTier, DecisionConfig, DecisionError};

#[test]
fn excellent_score_is_approved_at_lowest_rate() {
    let decision = engine()
        .evaluate(&decision_input(800, 25.0, 10), 1)
        .expect("valid input");

    assert_eq!(decision.status, DecisionStatus::Approved);
    assert_eq!(decision.tier, CreditTier::Excellent);
    assert_eq!(decision.interest_rate_percent, 7.5);
    assert_eq!(decision.principal, 2_500_000);
    assert_eq!(decision.tenure_months, 120);
    assert_eq!(decision.monthly_installment, 29_675);
    assert_eq!(decision.total_repayment, 29_675 * 120);
    assert_eq!(decision.total_interest, 29_675 * 120 - 2_500_000);
    assert_eq!(decision.reasons[0], "Excellent credit score of 800");
    assert_eq!(decision.reasons.len(), 4);
    assert_eq!(decision.next_steps.len(), 4);
    assert_eq!(decision.application_id.as_str(), "SCJD000001");
}

#[test]
fn tier_boundaries_follow_the_rate_table() {
    let engine = engine();
    let cases = [
        (900, CreditTier::Excellent, 7.5, DecisionStatus::Approved),
        (750, CreditTier::Excellent, 7.5, DecisionStatus::Approved),
        (749, CreditTier::Good, 8.5, DecisionStatus::Approved),
        (700, CreditTier::Good, 8.5, DecisionStatus::Approved),
        (699, CreditTier::Fair, 9.5, DecisionStatus::Approved),
        (650, CreditTier::Fair, 9.5, DecisionStatus::Approved),
        (649, CreditTier::BelowAverage, 10.5, DecisionStatus::Approved),
        (630, CreditTier::BelowAverage, 10.5, DecisionStatus::Approved),
        (629, CreditTier::Poor, 10.5, DecisionStatus::Rejected),
        (300, CreditTier::Poor, 10.5, DecisionStatus::Rejected),
    ];

    for (score, tier, rate, status) in cases {
        let decision = engine
            .evaluate(&decision_input(score, 10.0, 5), 9)
            .expect("valid input");
        assert_eq!(decision.tier, tier, "tier for {score}");
        assert_eq!(decision.interest_rate_percent, rate, "rate for {score}");
        assert_eq!(decision.status, status, "status for {score}");
    }
}

#[test]
fn poor_score_is_rejected_with_threshold_reason() {
    let decision = engine()
        .evaluate(&decision_input(600, 25.0, 10), 3)
        .expect("valid input");

    assert_eq!(decision.status, DecisionStatus::Rejected);
    assert_eq!(decision.interest_rate_percent, 10.5);
    assert_eq!(
        decision.reasons[0],
        "Credit score below minimum threshold: 600"
    );
    assert!(decision.summary().starts_with("rejected: Credit score below"));
    // Figures are still quoted for a rejection.
    assert!(decision.monthly_installment > 0);
}

#[test]
fn known_installments_match_the_amortisation_formula() {
    let engine = engine();
    let cases = [
        (720, 25.0, 10, 30_996),
        (640, 10.0, 4, 25_603),
        (680, 50.0, 5, 105_009),
        (800, 30.0, 20, 24_168),
        (720, 12.5, 15, 12_309),
    ];

    for (score, amount, years, expected) in cases {
        let decision = engine
            .evaluate(&decision_input(score, amount, years), 1)
            .expect("valid input");
        assert_eq!(decision.monthly_installment, expected, "{amount} lakh over {years}y");
    }
}

#[test]
fn installment_grows_with_amount_and_rate() {
    let small = monthly_installment(1_000_000.0, 9.5, 60);
    let large = monthly_installment(2_000_000.0, 9.5, 60);
    let dearer = monthly_installment(1_000_000.0, 10.5, 60);

    assert!(large > small);
    assert!(dearer > small);
    assert!(small * 60.0 > 1_000_000.0);
}

#[test]
fn total_repayment_always_exceeds_principal() {
    let engine = engine();
    for score in [630, 660, 710, 780] {
        for years in [1, 7, 30] {
            let decision = engine
                .evaluate(&decision_input(score, 3.5, years), 1)
                .expect("valid input");
            assert!(decision.total_repayment > decision.principal);
            assert_eq!(
                decision.total_interest,
                decision.total_repayment - decision.principal
            );
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let engine = engine();
    let input = decision_input(705, 18.25, 12);
    assert_eq!(
        engine.evaluate(&input, 77).expect("valid"),
        engine.evaluate(&input, 77).expect("valid")
    );
}

#[test]
fn invalid_inputs_name_the_offending_field() {
    let engine = engine();
    let cases = [
        (decision_input(250, 10.0, 5), "credit_score"),
        (decision_input(901, 10.0, 5), "credit_score"),
        (decision_input(720, 0.0, 5), "requested_amount_lakhs"),
        (decision_input(720, -4.0, 5), "requested_amount_lakhs"),
        (decision_input(720, f64::NAN, 5), "requested_amount_lakhs"),
        (decision_input(720, 20_000.0, 5), "requested_amount_lakhs"),
        (decision_input(720, 10.0, 0), "tenure_years"),
        (decision_input(720, 10.0, 31), "tenure_years"),
    ];

    for (input, field) in cases {
        match engine.evaluate(&input, 1) {
            Err(error @ DecisionError::InvalidInput { .. }) => assert_eq!(error.field(), field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }
}

#[test]
fn serial_must_fit_six_digits() {
    let error = engine()
        .evaluate(&decision_input(720, 10.0, 5), 1_000_000)
        .expect_err("serial too large");
    assert_eq!(error.field(), "serial");
}

#[test]
fn custom_thresholds_shift_the_tiers() {
    let config = DecisionConfig {
        excellent_min: 800,
        approval_floor: 600,
        ..DecisionConfig::default()
    };
    assert_eq!(CreditTier::classify(780, &config), CreditTier::Good);
    assert_eq!(CreditTier::classify(610, &config), CreditTier::BelowAverage);
    assert_eq!(CreditTier::classify(599, &config), CreditTier::Poor);
}
