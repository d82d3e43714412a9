//! Product-mix adjustment.

use crate::domain::ProductMix;

/// Shift the mix toward (positive) or away from (negative) premium grade.
///
/// Premium scales by `1 + shift`, industrial by `1 - shift`, and builder takes
/// the residual so the shares still sum to one. Shifts beyond +100% drive
/// industrial negative, and builder follows once premium plus industrial
/// exceed one. Callers that care go through `engine::guard`.
pub fn adjusted_mix(mix: &ProductMix, shift: f64) -> ProductMix {
    let premium = mix.premium * (1.0 + shift);
    let industrial = mix.industrial * (1.0 - shift);
    ProductMix {
        premium,
        builder: 1.0 - premium - industrial,
        industrial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: ProductMix = ProductMix {
        premium: 0.40,
        builder: 0.45,
        industrial: 0.15,
    };

    #[test]
    fn zero_shift_is_identity() {
        let m = adjusted_mix(&BASE, 0.0);
        assert_eq!(m.premium, BASE.premium);
        assert_eq!(m.industrial, BASE.industrial);
        assert!((m.builder - BASE.builder).abs() < 1e-15);
    }

    #[test]
    fn positive_shift_moves_share_to_premium() {
        let m = adjusted_mix(&BASE, 0.20);
        assert!((m.premium - 0.48).abs() < 1e-12);
        assert!((m.industrial - 0.12).abs() < 1e-12);
        assert!((m.builder - 0.40).abs() < 1e-12);
        assert!((m.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn industrial_goes_negative_before_builder() {
        let m = adjusted_mix(&BASE, 1.5);
        assert!((m.premium - 1.0).abs() < 1e-12);
        assert!((m.builder - 0.075).abs() < 1e-12);
        assert!((m.industrial + 0.075).abs() < 1e-12);
        assert!((m.total() - 1.0).abs() < 1e-12);

        let m = adjusted_mix(&BASE, 2.0);
        assert!((m.builder + 0.05).abs() < 1e-12);
        assert!(m.industrial < 0.0);
        assert!((m.total() - 1.0).abs() < 1e-12);
    }
}
