use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Merchant absorbs all financing fees out of revenue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsorbedScenario {
    pub net_to_store: Money,
    pub profit: Money,
}

/// Customer's price is grossed up so the fees are recovered in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassedScenario {
    pub customer_price: Money,
    pub net_to_store: Money,
    pub profit: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenarios {
    pub absorbed: AbsorbedScenario,
    /// Absent when the aggregate fee percentage reaches 100%: the gross-up
    /// factor is then non-positive and no finite customer price exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<PassedScenario>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute both fee-allocation scenarios from the decomposed base and the
/// aggregated fees.
///
/// Passing a percentage fee through to the customer means solving
/// `price × (1 − pct/100) = taxable_base` for the price. Adding the
/// absorbed-scenario fee dollars on top of the base would under-recover,
/// since the fee scales with the grossed-up price itself.
///
/// Profit in both scenarios is net-to-store minus cost basis minus seller
/// commission. Legacy variants that reported a margin-only figure for the
/// passed case are deliberately not reproduced.
pub fn compute_scenarios(
    taxable_base: Money,
    total_fee_amount: Money,
    total_fee_percent: Percent,
    cost_basis: Money,
    seller_commission: Money,
) -> Scenarios {
    let absorbed_net = taxable_base - total_fee_amount;
    let absorbed = AbsorbedScenario {
        net_to_store: absorbed_net,
        profit: absorbed_net - cost_basis - seller_commission,
    };

    let passed = if total_fee_percent >= dec!(100) {
        None
    } else {
        let factor = Decimal::ONE - total_fee_percent / dec!(100);
        let customer_price = taxable_base / factor;
        let fees_portion = customer_price * total_fee_percent / dec!(100);
        let net_to_store = customer_price - fees_portion;
        Some(PassedScenario {
            customer_price,
            net_to_store,
            profit: net_to_store - cost_basis - seller_commission,
        })
    };

    Scenarios { absorbed, passed }
}
