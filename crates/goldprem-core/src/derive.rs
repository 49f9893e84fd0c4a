//! Premium derivation: the one formula relating the three observed values.

/// Grams per troy ounce; relates USD/oz international quotes to ₩/g local ones.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;

/// Output of the premium derivation, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPremium {
    /// International price restated in local-currency-per-gram terms.
    pub international_price_krw: f64,
    /// Percent deviation of the local price from the restated price.
    pub premium: f64,
}

/// Round to 2 decimals; storage/display normalization, applied only when a
/// record is built, never to intermediate math.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive the converted price and premium from the three observed values.
///
/// Returns `None` when the derivation is undefined: any non-positive or
/// non-finite input, or a zero denominator. Callers must skip the record in
/// that case rather than emit a zero-filled one.
pub fn derive_premium(
    korean_price: f64,
    international_price: f64,
    exchange_rate: f64,
) -> Option<DerivedPremium> {
    let inputs = [korean_price, international_price, exchange_rate];
    if inputs.iter().any(|value| !value.is_finite() || *value <= 0.0) {
        return None;
    }

    let international_price_krw = (international_price / GRAMS_PER_TROY_OUNCE) * exchange_rate;
    if international_price_krw <= 0.0 {
        return None;
    }

    let premium = ((korean_price - international_price_krw) / international_price_krw) * 100.0;
    Some(DerivedPremium {
        international_price_krw,
        premium,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_converted_price_and_premium() {
        let derived = derive_premium(120_000.0, 2_600.0, 1_400.0).expect("defined");

        let expected_krw = (2_600.0 / GRAMS_PER_TROY_OUNCE) * 1_400.0;
        assert!((derived.international_price_krw - expected_krw).abs() < 1e-9);
        assert_eq!(round2(derived.premium), 2.54);
    }

    #[test]
    fn negative_premium_is_representable() {
        let derived = derive_premium(80_000.0, 2_600.0, 1_400.0).expect("defined");
        assert!(derived.premium < 0.0);
    }

    #[test]
    fn non_positive_inputs_are_undefined() {
        assert!(derive_premium(0.0, 2_600.0, 1_400.0).is_none());
        assert!(derive_premium(120_000.0, -1.0, 1_400.0).is_none());
        assert!(derive_premium(120_000.0, 2_600.0, 0.0).is_none());
        assert!(derive_premium(f64::NAN, 2_600.0, 1_400.0).is_none());
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(2.539), 2.54);
        assert_eq!(round2(117_028.661), 117_028.66);
        assert_eq!(round2(-0.124), -0.12);
    }
}
