use serde::{Deserialize, Serialize};

use crate::derive::{derive_premium, round2};
use crate::MarketDate;

/// One reconciled day of the premium series.
///
/// Serialized field names are frozen: existing consumers of the history
/// document read records by these exact keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumRecord {
    pub date: MarketDate,
    /// Local closing price, ₩/g.
    pub korean_price: f64,
    /// International price, USD/oz.
    pub international_price: f64,
    /// International price restated as ₩/g. Derived, never sourced.
    pub international_price_krw: f64,
    /// USD→KRW rate.
    pub exchange_rate: f64,
    /// Percent deviation of the local price; may be negative. Derived.
    pub premium: f64,
}

impl PremiumRecord {
    /// Build a record from the three observed values.
    ///
    /// The converted price and premium are always recomputed here; callers
    /// never supply them. `None` mirrors the derivation being undefined for
    /// the inputs, in which case no record may be emitted.
    pub fn derive(
        date: MarketDate,
        korean_price: f64,
        international_price: f64,
        exchange_rate: f64,
    ) -> Option<Self> {
        let derived = derive_premium(korean_price, international_price, exchange_rate)?;

        Some(Self {
            date,
            korean_price: round2(korean_price),
            international_price: round2(international_price),
            international_price_krw: round2(derived.international_price_krw),
            exchange_rate: round2(exchange_rate),
            premium: round2(derived.premium),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> MarketDate {
        MarketDate::parse(input).expect("test date")
    }

    #[test]
    fn derives_and_rounds_all_fields() {
        let record = PremiumRecord::derive(date("2024-03-01"), 120_000.456, 2_600.004, 1_400.0)
            .expect("defined");

        assert_eq!(record.korean_price, 120_000.46);
        assert_eq!(record.international_price, 2_600.0);
        assert_eq!(record.exchange_rate, 1_400.0);
        // Derived from the unrounded inputs, rounded only at the end.
        let expected = (2_600.004 / crate::GRAMS_PER_TROY_OUNCE) * 1_400.0;
        assert_eq!(record.international_price_krw, round2(expected));
    }

    #[test]
    fn undefined_derivation_yields_no_record() {
        assert!(PremiumRecord::derive(date("2024-03-01"), 0.0, 2_600.0, 1_400.0).is_none());
    }

    #[test]
    fn serializes_with_frozen_field_names() {
        let record = PremiumRecord::derive(date("2024-03-01"), 120_000.0, 2_600.0, 1_400.0)
            .expect("defined");
        let json = serde_json::to_value(&record).expect("serializable");
        let object = json.as_object().expect("object");

        for key in [
            "date",
            "koreanPrice",
            "internationalPrice",
            "internationalPriceKrw",
            "exchangeRate",
            "premium",
        ] {
            assert!(object.contains_key(key), "missing frozen key '{key}'");
        }
        assert_eq!(object.len(), 6);
    }
}
