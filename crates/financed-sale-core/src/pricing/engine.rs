use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::catalog::FinancingCatalog;
use crate::input::fees::parse_fee_list;
use crate::pricing::aggregate::{aggregate, FeeLine, FinancingLine};
use crate::pricing::decompose::{decompose, DecomposeInput, DEFAULT_SHIPPING, DEFAULT_TAX_RATE_PCT};
use crate::pricing::scenario::{compute_scenarios, AbsorbedScenario, PassedScenario};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// One financed-sale request. Request-scoped value object; constructed
/// fresh per call and discarded with the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    pub total_price: Money,
    pub tax_rate_pct: Percent,
    pub include_shipping: bool,
    pub shipping_amount: Money,
    pub cost_basis: Money,
    pub seller_commission: Money,
    pub manual_fee_text: String,
    pub financing: Vec<FinancingLine>,
}

impl Default for QuoteInput {
    fn default() -> Self {
        Self {
            total_price: Decimal::ZERO,
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            include_shipping: true,
            shipping_amount: DEFAULT_SHIPPING,
            cost_basis: Decimal::ZERO,
            seller_commission: Decimal::ZERO,
            manual_fee_text: String::new(),
            financing: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResult {
    pub taxable_base: Money,
    pub tax_amount: Money,
    pub shipping_amount: Money,
    pub total_fee_amount: Money,
    pub total_fee_percent: Percent,
    pub fee_breakdown: Vec<FeeLine>,
    pub absorbed: AbsorbedScenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<PassedScenario>,
}

impl QuoteResult {
    /// Presentation copy with monetary fields rounded to 2 decimal places.
    /// Percentages are left at full precision. The engine itself never
    /// rounds, so the algebraic laws hold on the unrounded result.
    pub fn rounded(&self) -> QuoteResult {
        QuoteResult {
            taxable_base: self.taxable_base.round_dp(2),
            tax_amount: self.tax_amount.round_dp(2),
            shipping_amount: self.shipping_amount.round_dp(2),
            total_fee_amount: self.total_fee_amount.round_dp(2),
            total_fee_percent: self.total_fee_percent,
            fee_breakdown: self
                .fee_breakdown
                .iter()
                .map(|line| FeeLine {
                    name: line.name.clone(),
                    amount: line.amount.round_dp(2),
                    rate: line.rate,
                    fee: line.fee.round_dp(2),
                })
                .collect(),
            absorbed: AbsorbedScenario {
                net_to_store: self.absorbed.net_to_store.round_dp(2),
                profit: self.absorbed.profit.round_dp(2),
            },
            passed: self.passed.as_ref().map(|p| PassedScenario {
                customer_price: p.customer_price.round_dp(2),
                net_to_store: p.net_to_store.round_dp(2),
                profit: p.profit.round_dp(2),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full financed-sale quote: decomposition, fee aggregation
/// and both fee-allocation scenarios.
pub fn calculate_quote(
    input: &QuoteInput,
    catalog: &FinancingCatalog,
) -> PricingResult<ComputationOutput<QuoteResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let manual = parse_fee_list(&input.manual_fee_text)?;

    let decomposition = decompose(&DecomposeInput {
        total_price: input.total_price,
        tax_rate_pct: input.tax_rate_pct,
        include_shipping: input.include_shipping,
        shipping_amount: input.shipping_amount,
    })?;

    if input.include_shipping && input.shipping_amount > input.total_price {
        warnings.push(format!(
            "Shipping {} exceeds the total price {}; taxable base clamped to zero.",
            input.shipping_amount, input.total_price
        ));
    }

    // Off-menu rates are substituted with the source default, not rejected.
    let effective_lines: Vec<FinancingLine> = input
        .financing
        .iter()
        .map(|line| {
            let (rate, warning) = catalog.validate_rate(&line.key, line.rate);
            if let Some(w) = warning {
                warnings.push(w);
            }
            FinancingLine {
                key: line.key.clone(),
                display_name: line.display_name.clone(),
                amount_financed: line.amount_financed,
                rate,
            }
        })
        .collect();

    let fees = aggregate(&effective_lines, &manual, decomposition.taxable_base);

    let scenarios = compute_scenarios(
        decomposition.taxable_base,
        fees.total_fee_amount,
        fees.total_fee_percent,
        input.cost_basis,
        input.seller_commission,
    );

    if scenarios.passed.is_none() {
        warnings.push(format!(
            "Aggregate fee percentage {}% is at or above 100%; no finite pass-through price exists.",
            fees.total_fee_percent
        ));
    }

    let result = QuoteResult {
        taxable_base: decomposition.taxable_base,
        tax_amount: decomposition.tax_amount,
        shipping_amount: decomposition.shipping,
        total_fee_amount: fees.total_fee_amount,
        total_fee_percent: fees.total_fee_percent,
        fee_breakdown: fees.breakdown,
        absorbed: scenarios.absorbed,
        passed: scenarios.passed,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "fee_percent_aggregation": "plain sum of contributing rates, not amount-weighted",
        "manual_fees_base": "taxable base",
        "profit_definition": "net to store minus cost basis minus seller commission",
        "shipping": "non-taxed pass-through, removed before tax recovery"
    });

    Ok(with_metadata(
        "Financed-sale quote (fees absorbed vs. passed through)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
