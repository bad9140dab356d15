use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the customer intends to pay.
///
/// Only [`PaymentMethod::Online`] carries a discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Online,
    Partial,
    Cash,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[
            PaymentMethod::Online,
            PaymentMethod::Partial,
            PaymentMethod::Cash,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Partial => "partial",
            Self::Cash => "cash",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.as_str() == s)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Online => "Online Payment",
            Self::Partial => "Partial Payment",
            Self::Cash => "Cash on Event",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Online => "Pay securely with UPI, Cards, or Net Banking",
            Self::Partial => "Pay 30% now, rest before event",
            Self::Cash => "Pay directly to vendor on event day",
        }
    }

    /// Discount granted on the subtotal, as a whole percentage.
    pub fn discount_percent(&self) -> Decimal {
        match self {
            Self::Online => Decimal::TWO,
            Self::Partial | Self::Cash => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_method_is_online() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Online);
    }

    #[test]
    fn only_online_is_discounted() {
        assert_eq!(PaymentMethod::Online.discount_percent(), Decimal::TWO);
        assert_eq!(PaymentMethod::Partial.discount_percent(), Decimal::ZERO);
        assert_eq!(PaymentMethod::Cash.discount_percent(), Decimal::ZERO);
    }
}
