use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::types::{Money, Percent};
use crate::PricingResult;

/// Jurisdiction tax rate applied when the request omits one.
pub const DEFAULT_TAX_RATE_PCT: Decimal = dec!(7);

/// Flat shipping charge for the deployment, non-taxed pass-through.
pub const DEFAULT_SHIPPING: Decimal = dec!(900.00);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomposeInput {
    pub total_price: Money,
    pub tax_rate_pct: Percent,
    pub include_shipping: bool,
    pub shipping_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decomposition {
    pub shipping: Money,
    pub taxable_base: Money,
    pub tax_amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Split a tax-inclusive customer total into shipping, pre-tax base and tax.
///
/// Shipping is a non-taxed pass-through and is removed first; the remainder
/// is a tax-inclusive figure, so the base is recovered by dividing by
/// `1 + rate/100` rather than subtracting a flat percentage of the total.
/// A shipping charge exceeding the total clamps the base to zero instead of
/// producing a negative price.
pub fn decompose(input: &DecomposeInput) -> PricingResult<Decomposition> {
    validate_input(input)?;

    let shipping = if input.include_shipping {
        input.shipping_amount
    } else {
        Decimal::ZERO
    };

    let gross_taxable = (input.total_price - shipping).max(Decimal::ZERO);

    let taxable_base = if input.tax_rate_pct > Decimal::ZERO {
        let divisor = Decimal::ONE + input.tax_rate_pct / dec!(100);
        if divisor.is_zero() {
            return Err(PricingError::DivisionByZero {
                context: "tax-inclusive base recovery".to_string(),
            });
        }
        gross_taxable / divisor
    } else {
        gross_taxable
    };

    let tax_amount = gross_taxable - taxable_base;

    Ok(Decomposition {
        shipping,
        taxable_base,
        tax_amount,
    })
}

fn validate_input(input: &DecomposeInput) -> PricingResult<()> {
    if input.total_price < Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: "total_price".into(),
            reason: "Total price cannot be negative.".into(),
        });
    }
    if input.tax_rate_pct < Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: "tax_rate".into(),
            reason: "Tax rate cannot be negative.".into(),
        });
    }
    if input.shipping_amount < Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: "shipping_amount".into(),
            reason: "Shipping amount cannot be negative.".into(),
        });
    }
    Ok(())
}
