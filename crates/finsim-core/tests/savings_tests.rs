use finsim_core::savings::goal::{self, SavingsGoalInput};
use finsim_core::savings::investment::{self, InvestmentInput};
use finsim_core::time_value::{annuity_fv_factor, compound, effective_monthly_rate};
use finsim_core::{Compounding, HorizonUnit, RateBasis};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Savings goal
// ===========================================================================

#[test]
fn test_savings_goal_scenario_annual_compounding() {
    // 10,000 in 5 years at 5%, compounded annually
    let input = SavingsGoalInput {
        target_amount: dec!(10000),
        annual_rate: dec!(0.05),
        years: dec!(5),
        compounding: Compounding::Annual,
    };
    let out = goal::compute_savings_goal(&input).unwrap().result;

    let m = effective_monthly_rate(dec!(0.05));
    assert_eq!(out.monthly_rate, m);
    assert_ne!(out.monthly_rate, dec!(0.05) / dec!(12));

    let reached = out.required_monthly_deposit * annuity_fv_factor(m, dec!(60)).unwrap();
    assert!((reached - dec!(10000)).abs() < dec!(0.000001));
    assert_eq!(out.projection.len(), 5);
}

#[test]
fn test_savings_goal_deposit_reproduces_target_monthly_compounding() {
    for (target, rate, years) in [
        (dec!(5000), dec!(0.02), dec!(2)),
        (dec!(250000), dec!(0.07), dec!(30)),
        (dec!(1200), dec!(0.1), dec!(1)),
    ] {
        let input = SavingsGoalInput {
            target_amount: target,
            annual_rate: rate,
            years,
            compounding: Compounding::Monthly,
        };
        let out = goal::compute_savings_goal(&input).unwrap().result;
        let reached = out.required_monthly_deposit
            * annuity_fv_factor(rate / dec!(12), years * dec!(12)).unwrap();
        assert!((reached - target).abs() < dec!(0.000001), "target {target}");
        assert!((out.total_deposited + out.interest_earned - target).abs() < dec!(0.000001));
    }
}

// ===========================================================================
// Investment growth
// ===========================================================================

#[test]
fn test_investment_reduces_to_compound_growth() {
    for basis in [RateBasis::Annual, RateBasis::Monthly] {
        for unit in [HorizonUnit::Years, HorizonUnit::Months] {
            let input = InvestmentInput {
                principal: dec!(25000),
                annual_rate: dec!(0.004),
                horizon: 24,
                horizon_unit: unit,
                annual_contribution: Decimal::ZERO,
                rate_basis: basis,
                include_schedule: false,
            };
            let out = investment::compute_investment_growth(&input).unwrap().result;
            let expected = dec!(25000) * compound(out.period_rate, out.periods).unwrap();
            assert!(
                (out.future_value - expected).abs() < dec!(0.000001),
                "{basis:?}/{unit:?}"
            );
        }
    }
}

#[test]
fn test_investment_interest_identity() {
    let input = InvestmentInput {
        principal: dec!(10000),
        annual_rate: dec!(0.07),
        horizon: 15,
        horizon_unit: HorizonUnit::Years,
        annual_contribution: dec!(2400),
        rate_basis: RateBasis::Monthly,
        include_schedule: true,
    };
    let out = investment::compute_investment_growth(&input).unwrap().result;
    assert_eq!(out.periods, 180);
    assert_eq!(out.total_contributed, dec!(200) * dec!(180));
    assert_eq!(
        out.total_interest_earned,
        out.future_value - dec!(10000) - out.total_contributed
    );
    let rows = out.schedule.unwrap();
    assert_eq!(rows.len(), 180);
    assert_eq!(rows.first().unwrap().period, 1);
}

#[test]
fn test_investment_input_defaults_from_json() {
    let input: InvestmentInput = serde_json::from_str(
        r#"{ "principal": "1000", "annual_rate": "0.05", "horizon": 3 }"#,
    )
    .unwrap();
    assert_eq!(input.horizon_unit, HorizonUnit::Years);
    assert_eq!(input.rate_basis, RateBasis::Annual);
    assert_eq!(input.annual_contribution, Decimal::ZERO);
    assert!(input.include_schedule);
}
