//! Itemized cost estimate for a booking draft.
//!
//! The estimate is derived fresh from the draft every time it is shown and is
//! never stored on its own.
//!
//! # Breakdown
//!
//! | Line         | Derivation |
//! |--------------|------------|
//! | base amount  | lower bound of the declared budget range |
//! | add-on cost  | Σ per distinct add-on: flat price, or per-person price × guests |
//! | subtotal     | base amount + add-on cost |
//! | tax          | subtotal × 18% |
//! | platform fee | subtotal × 2% |
//! | discount     | subtotal × payment method discount % |
//! | total        | subtotal + tax + platform fee − discount |
//!
//! Every line is rounded half-up to two places and the total is formed from
//! the rounded lines, so the identities above hold exactly.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use booking_core::calculations::PricingCalculator;
//! use booking_core::models::{AddOnCatalog, BookingDraft, BudgetRange, PaymentMethod};
//!
//! let draft = BookingDraft {
//!     budget_range: Some(BudgetRange::new(50000, 200000)),
//!     selected_add_ons: Some(vec!["catering".to_string()]),
//!     guest_count: Some(100),
//!     payment_method: Some(PaymentMethod::Online),
//!     ..Default::default()
//! };
//!
//! let breakdown = PricingCalculator::new(AddOnCatalog::standard()).calculate(&draft);
//!
//! assert_eq!(breakdown.add_on_cost, dec!(80000));
//! assert_eq!(breakdown.total, dec!(153400));
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{percent_of, round_half_up};
use crate::models::{AddOnCatalog, BookingDraft};

/// Flat goods-and-services tax rate applied to the subtotal, in percent.
pub const TAX_PERCENT: u32 = 18;

/// Marketplace fee applied to the subtotal, in percent.
pub const PLATFORM_FEE_PERCENT: u32 = 2;

/// Itemized estimate shown on the confirmation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Committed base spend: the minimum of the declared budget range.
    pub base_amount: Decimal,

    /// Sum of all selected, known add-ons.
    pub add_on_cost: Decimal,

    /// `base_amount + add_on_cost`.
    pub subtotal: Decimal,

    /// 18% of the subtotal.
    pub tax: Decimal,

    /// 2% of the subtotal.
    pub platform_fee: Decimal,

    /// Payment-method discount on the subtotal.
    pub discount: Decimal,

    /// `subtotal + tax + platform_fee - discount`.
    pub total: Decimal,
}

/// Computes [`PricingBreakdown`]s against a fixed add-on catalog.
#[derive(Debug, Clone)]
pub struct PricingCalculator {
    catalog: AddOnCatalog,
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(AddOnCatalog::standard())
    }
}

impl PricingCalculator {
    pub fn new(catalog: AddOnCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AddOnCatalog {
        &self.catalog
    }

    /// Prices the draft. Missing inputs count as zero; this never fails.
    pub fn calculate(
        &self,
        draft: &BookingDraft,
    ) -> PricingBreakdown {
        let base_amount = self.base_amount(draft);
        let add_on_cost = self.add_on_cost(draft);
        let subtotal = round_half_up(base_amount + add_on_cost);

        let tax = percent_of(subtotal, Decimal::from(TAX_PERCENT));
        let platform_fee = percent_of(subtotal, Decimal::from(PLATFORM_FEE_PERCENT));
        let discount = self.discount(draft, subtotal);

        let total = subtotal + tax + platform_fee - discount;

        debug!(
            %base_amount,
            %add_on_cost,
            %subtotal,
            %total,
            "priced booking draft"
        );

        PricingBreakdown {
            base_amount,
            add_on_cost,
            subtotal,
            tax,
            platform_fee,
            discount,
            total,
        }
    }

    /// The lower end of the declared budget is billed as the base spend.
    fn base_amount(
        &self,
        draft: &BookingDraft,
    ) -> Decimal {
        draft
            .budget_range
            .map(|range| round_half_up(Decimal::from(range.min)))
            .unwrap_or(Decimal::ZERO)
    }

    fn add_on_cost(
        &self,
        draft: &BookingDraft,
    ) -> Decimal {
        let guests = draft.billable_guests();
        let mut seen = HashSet::new();

        let cost = draft
            .selected_add_ons()
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| match self.catalog.get(id) {
                Some(add_on) => Some(add_on.cost_for(guests)),
                None => {
                    warn!(add_on = %id, "unknown add-on selected; priced at zero");
                    None
                }
            })
            .sum();

        round_half_up(cost)
    }

    fn discount(
        &self,
        draft: &BookingDraft,
        subtotal: Decimal,
    ) -> Decimal {
        let method = draft.payment_method_or_default();
        percent_of(subtotal, method.discount_percent())
    }
}
