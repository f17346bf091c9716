//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount expressed in both invoice currencies.
///
/// Quotes are priced in USD; printed documents also show the IQD value
/// converted at the configured exchange rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DualAmount {
    pub usd: Decimal,
    pub iqd: Decimal,
}

impl DualAmount {
    pub fn from_usd(usd: Decimal, exchange_rate: Decimal) -> Self {
        Self {
            usd,
            iqd: usd * exchange_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_dual_amount_conversion() {
        let amount = DualAmount::from_usd(
            Decimal::from_str("140").unwrap(),
            Decimal::from_str("1500").unwrap(),
        );
        assert_eq!(amount.usd, Decimal::from_str("140").unwrap());
        assert_eq!(amount.iqd, Decimal::from_str("210000").unwrap());
    }
}
