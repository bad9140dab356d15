//! Price calculations for booking drafts.

pub mod common;
pub mod pricing;

pub use pricing::{PLATFORM_FEE_PERCENT, PricingBreakdown, PricingCalculator, TAX_PERCENT};
