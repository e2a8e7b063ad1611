use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::types::Percent;
use crate::PricingResult;

/// Parsed manual bank-fee list: the individual percentages in input order
/// and their arithmetic sum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualFees {
    pub rates: Vec<Percent>,
    pub total: Percent,
}

/// Parse a comma-separated list of fee percentages ("4.5, 3" or "4.5%, 3%").
///
/// Unlike the form-field normalizer this path is strict: the list is
/// explicit finance input, so a token that is not a number is a hard error
/// rather than a silent default. Empty tokens are dropped; an empty or
/// whitespace-only string parses to no fees.
pub fn parse_fee_list(text: &str) -> PricingResult<ManualFees> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(ManualFees::default());
    }

    let mut rates = Vec::new();
    let mut total = Decimal::ZERO;
    for token in trimmed.split(',') {
        let cleaned = token.replace('%', "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            continue;
        }
        let rate: Decimal =
            cleaned
                .parse()
                .map_err(|_| PricingError::MalformedFeeList {
                    token: token.trim().to_string(),
                })?;
        rates.push(rate);
        total += rate;
    }

    Ok(ManualFees { rates, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_input_is_no_fees() {
        let fees = parse_fee_list("").unwrap();
        assert!(fees.rates.is_empty());
        assert_eq!(fees.total, Decimal::ZERO);

        let fees = parse_fee_list("   ").unwrap();
        assert!(fees.rates.is_empty());
        assert_eq!(fees.total, Decimal::ZERO);
    }

    #[test]
    fn parses_list_and_sum() {
        let fees = parse_fee_list("4.5, 3").unwrap();
        assert_eq!(fees.rates, vec![dec!(4.5), dec!(3)]);
        assert_eq!(fees.total, dec!(7.5));
    }

    #[test]
    fn percent_signs_and_blank_tokens_tolerated() {
        let fees = parse_fee_list("4.5%, , 3%,").unwrap();
        assert_eq!(fees.rates, vec![dec!(4.5), dec!(3)]);
        assert_eq!(fees.total, dec!(7.5));
    }

    #[test]
    fn bad_token_is_a_hard_error() {
        let err = parse_fee_list("abc").unwrap_err();
        match err {
            PricingError::MalformedFeeList { token } => assert_eq!(token, "abc"),
            other => panic!("Expected MalformedFeeList, got {other:?}"),
        }

        let err = parse_fee_list("4.5, oops, 3").unwrap_err();
        match err {
            PricingError::MalformedFeeList { token } => assert_eq!(token, "oops"),
            other => panic!("Expected MalformedFeeList, got {other:?}"),
        }
    }
}
