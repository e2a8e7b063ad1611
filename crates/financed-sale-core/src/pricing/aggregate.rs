use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::input::fees::ManualFees;
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One submitted financing line: how much a named source finances and at
/// what merchant fee rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingLine {
    pub key: String,
    pub display_name: String,
    pub amount_financed: Money,
    pub rate: Percent,
}

/// One contributing fee in the breakdown shown to the merchant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeLine {
    pub name: String,
    pub amount: Money,
    pub rate: Percent,
    pub fee: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeAggregate {
    pub total_fee_amount: Money,
    pub total_fee_percent: Percent,
    pub breakdown: Vec<FeeLine>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Combine named financing lines and manual fee rates into one fee total.
///
/// A line only contributes when both its financed amount and its rate are
/// positive; anything else is silently dropped from the breakdown. Manual
/// rates are percentage-only contributions charged against the taxable
/// base, not against any particular financed amount.
///
/// `total_fee_percent` is the plain sum of contributing rates even though
/// sources finance different amounts. That is the aggregation policy the
/// pass-through gross-up is defined over, not a weighted blend.
pub fn aggregate(
    lines: &[FinancingLine],
    manual: &ManualFees,
    taxable_base: Money,
) -> FeeAggregate {
    let mut total_fee_amount = Decimal::ZERO;
    let mut total_fee_percent = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for line in lines {
        if line.amount_financed <= Decimal::ZERO || line.rate <= Decimal::ZERO {
            continue;
        }
        let fee = line.amount_financed * line.rate / dec!(100);
        total_fee_amount += fee;
        total_fee_percent += line.rate;
        breakdown.push(FeeLine {
            name: line.display_name.clone(),
            amount: line.amount_financed,
            rate: line.rate,
            fee,
        });
    }

    for rate in &manual.rates {
        total_fee_percent += *rate;
        if *rate == Decimal::ZERO {
            continue;
        }
        let fee = taxable_base * *rate / dec!(100);
        total_fee_amount += fee;
        breakdown.push(FeeLine {
            name: "Manual fee".to_string(),
            amount: taxable_base,
            rate: *rate,
            fee,
        });
    }

    FeeAggregate {
        total_fee_amount,
        total_fee_percent,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(name: &str, amount: Decimal, rate: Decimal) -> FinancingLine {
        FinancingLine {
            key: name.to_ascii_lowercase(),
            display_name: name.to_string(),
            amount_financed: amount,
            rate,
        }
    }

    #[test]
    fn single_line_fee() {
        let agg = aggregate(
            &[line("Bank A", dec!(4000), dec!(5))],
            &ManualFees::default(),
            dec!(3831.78),
        );
        assert_eq!(agg.total_fee_amount, dec!(200));
        assert_eq!(agg.total_fee_percent, dec!(5));
        assert_eq!(agg.breakdown.len(), 1);
        assert_eq!(agg.breakdown[0].fee, dec!(200));
    }

    #[test]
    fn zero_amount_or_rate_contributes_nothing() {
        let agg = aggregate(
            &[
                line("Bank A", Decimal::ZERO, dec!(5)),
                line("Bank B", dec!(1000), Decimal::ZERO),
                line("Bank C", dec!(2000), dec!(4)),
            ],
            &ManualFees::default(),
            dec!(5000),
        );
        assert_eq!(agg.total_fee_amount, dec!(80));
        assert_eq!(agg.total_fee_percent, dec!(4));
        assert_eq!(agg.breakdown.len(), 1);
        assert_eq!(agg.breakdown[0].name, "Bank C");
    }

    #[test]
    fn manual_rates_apply_against_taxable_base() {
        let manual = ManualFees {
            rates: vec![dec!(2), dec!(1.5)],
            total: dec!(3.5),
        };
        let agg = aggregate(&[], &manual, dec!(1000));
        assert_eq!(agg.total_fee_percent, dec!(3.5));
        assert_eq!(agg.total_fee_amount, dec!(35));
        assert_eq!(agg.breakdown.len(), 2);
        assert_eq!(agg.breakdown[0].amount, dec!(1000));
    }

    #[test]
    fn rate_sum_is_not_amount_weighted() {
        // two sources financing very different amounts still sum rates 1:1
        let agg = aggregate(
            &[
                line("Big", dec!(100000), dec!(3)),
                line("Small", dec!(10), dec!(7)),
            ],
            &ManualFees::default(),
            dec!(90000),
        );
        assert_eq!(agg.total_fee_percent, dec!(10));
        assert_eq!(agg.total_fee_amount, dec!(3000) + dec!(0.7));
    }
}
