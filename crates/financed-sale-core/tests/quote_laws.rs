//! Algebraic laws the engine must hold over its whole input range.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use financed_sale_core::input::fees::ManualFees;
use financed_sale_core::pricing::aggregate::{aggregate, FinancingLine};
use financed_sale_core::pricing::decompose::{decompose, DecomposeInput};
use financed_sale_core::pricing::scenario::compute_scenarios;

const TOLERANCE: Decimal = dec!(0.000001);

proptest! {
    // base + tax + shipping reassembles the customer total whenever the
    // shipping charge does not exceed it.
    #[test]
    fn decomposition_conserves_the_total(
        total_cents in 0i64..=200_000_00,
        tax_rate in 0u32..=30,
        shipping_permille in 0u32..=1000,
        include_shipping in any::<bool>(),
    ) {
        let total = Decimal::new(total_cents, 2);
        let shipping = total * Decimal::from(shipping_permille) / dec!(1000);

        let d = decompose(&DecomposeInput {
            total_price: total,
            tax_rate_pct: Decimal::from(tax_rate),
            include_shipping,
            shipping_amount: shipping,
        }).unwrap();

        let reassembled = d.taxable_base + d.tax_amount + d.shipping;
        prop_assert!((reassembled - total).abs() <= TOLERANCE,
            "base {} + tax {} + shipping {} != total {}",
            d.taxable_base, d.tax_amount, d.shipping, total);
    }

    // Solving price × (1 − pct/100) = base for the price and charging the
    // fee on that price must hand the store exactly the base back.
    #[test]
    fn passed_price_recovers_the_base(
        base_cents in 0i64..=100_000_00,
        fee_basis_points in 0i64..=9999,
    ) {
        let base = Decimal::new(base_cents, 2);
        let pct = Decimal::new(fee_basis_points, 2);

        let s = compute_scenarios(base, Decimal::ZERO, pct, Decimal::ZERO, Decimal::ZERO);
        let passed = s.passed.expect("fee percent below 100 must have a passed scenario");

        let recovered = passed.customer_price * (Decimal::ONE - pct / dec!(100));
        prop_assert!((recovered - base).abs() <= TOLERANCE);
        prop_assert!((passed.net_to_store - base).abs() <= TOLERANCE);
    }

    // At or past 100% aggregate fees the pass-through price stops existing;
    // the absorbed side is untouched.
    #[test]
    fn fee_percent_at_or_above_100_kills_only_the_passed_side(
        base_cents in 0i64..=100_000_00,
        fee_pct in 100u32..=300,
        cost_cents in 0i64..=100_000_00,
    ) {
        let base = Decimal::new(base_cents, 2);
        let pct = Decimal::from(fee_pct);
        let fee_amount = base * pct / dec!(100);
        let cost = Decimal::new(cost_cents, 2);

        let s = compute_scenarios(base, fee_amount, pct, cost, Decimal::ZERO);
        prop_assert!(s.passed.is_none());
        prop_assert_eq!(s.absorbed.net_to_store, base - fee_amount);
        prop_assert_eq!(s.absorbed.profit, base - fee_amount - cost);
    }

    // A line with a zero amount or zero rate never reaches the breakdown
    // and never moves the totals.
    #[test]
    fn zero_lines_stay_out_of_the_breakdown(
        amount_cents in 0i64..=10_000_00,
        rate_basis_points in 0i64..=2000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let rate = Decimal::new(rate_basis_points, 2);
        let contributes = amount > Decimal::ZERO && rate > Decimal::ZERO;

        let agg = aggregate(
            &[FinancingLine {
                key: "bank".into(),
                display_name: "Bank".into(),
                amount_financed: amount,
                rate,
            }],
            &ManualFees::default(),
            dec!(5000),
        );

        prop_assert_eq!(agg.breakdown.len(), usize::from(contributes));
        if !contributes {
            prop_assert_eq!(agg.total_fee_amount, Decimal::ZERO);
            prop_assert_eq!(agg.total_fee_percent, Decimal::ZERO);
        }
    }
}
