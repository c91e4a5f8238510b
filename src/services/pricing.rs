use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Orders strictly above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::TEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub free_threshold: Decimal,
    pub flat_fee: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: FREE_SHIPPING_THRESHOLD,
            flat_fee: FLAT_SHIPPING_FEE,
        }
    }
}

impl ShippingPolicy {
    pub fn new(free_threshold: Decimal, flat_fee: Decimal) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    /// A subtotal exactly at the threshold still pays the flat fee.
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.free_threshold {
            round_currency(Decimal::ZERO)
        } else {
            round_currency(self.flat_fee)
        }
    }
}

/// Shipping under the default policy.
pub fn compute_shipping(subtotal: Decimal) -> Decimal {
    ShippingPolicy::default().shipping_for(subtotal)
}

/// Money never goes negative here, so overflow clamps to `Decimal::MAX`.
pub fn saturating_add(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or(Decimal::MAX)
}

pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(compute_shipping(Decimal::new(10000, 2)), Decimal::new(1000, 2));
        assert_eq!(compute_shipping(Decimal::new(10001, 2)), Decimal::ZERO);
        assert_eq!(compute_shipping(Decimal::ZERO), Decimal::new(1000, 2));
    }

    #[test]
    fn test_shipping_is_currency_scaled() {
        assert_eq!(compute_shipping(Decimal::ZERO).to_string(), "10.00");
        assert_eq!(compute_shipping(Decimal::new(34998, 2)).to_string(), "0.00");
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingPolicy::new(Decimal::new(50, 0), Decimal::new(495, 2));
        assert_eq!(policy.shipping_for(Decimal::new(4999, 2)), Decimal::new(495, 2));
        assert_eq!(policy.shipping_for(Decimal::new(5001, 2)), Decimal::ZERO);
    }

    #[test]
    fn test_saturating_add() {
        assert_eq!(saturating_add(Decimal::MAX, Decimal::TEN), Decimal::MAX);
        assert_eq!(saturating_add(Decimal::new(4999, 2), Decimal::TEN), Decimal::new(5999, 2));
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(Decimal::new(12345, 3)).to_string(), "12.35");
        assert_eq!(round_currency(Decimal::new(7, 0)).to_string(), "7.00");
    }
}
