//! Opt-in estimation for a missing local price.

use crate::derive::GRAMS_PER_TROY_OUNCE;

/// Markup historically observed between Korean retail gold and the converted
/// international price.
pub const DEFAULT_MARKUP: f64 = 1.03;

/// Estimates a local price as converted-international × a fixed markup.
///
/// This is a data-quality patch, not part of the reconciliation contract: the
/// gap-filling resolver never engages it, so an estimated reading is always
/// an explicit caller choice and tests can tell observed values from
/// estimated ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkupEstimate {
    markup: f64,
}

impl Default for MarkupEstimate {
    fn default() -> Self {
        Self {
            markup: DEFAULT_MARKUP,
        }
    }
}

impl MarkupEstimate {
    pub fn new(markup: f64) -> Self {
        Self { markup }
    }

    pub fn markup(&self) -> f64 {
        self.markup
    }

    /// Estimated local price (₩/g). `None` when the inputs cannot support an
    /// estimate, mirroring the derivation's undefined case.
    pub fn local_price(&self, international_price: f64, exchange_rate: f64) -> Option<f64> {
        if self.markup <= 0.0 || international_price <= 0.0 || exchange_rate <= 0.0 {
            return None;
        }
        Some((international_price / GRAMS_PER_TROY_OUNCE) * exchange_rate * self.markup)
    }
}
