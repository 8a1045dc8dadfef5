use rust_decimal::{Decimal, RoundingStrategy};

/// Unit price after the promotion discount. Percentages above 100 are capped.
pub fn effective_price(price: Decimal, promotion: u8) -> Decimal {
    if promotion == 0 {
        return price;
    }
    let kept = Decimal::from(100 - promotion.min(100));
    match price.checked_mul(kept) {
        Some(scaled) => scaled / Decimal::ONE_HUNDRED,
        // Only reachable near Decimal::MAX, where the last digit stops mattering.
        None => (price / Decimal::ONE_HUNDRED).saturating_mul(kept),
    }
}

/// Rounds a full-precision amount to cents. Only for display.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1234.50` style label.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", round_for_display(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_promotion_keeps_price() {
        assert_eq!(effective_price(dec!(79.99), 0), dec!(79.99));
    }

    #[test]
    fn test_promotion_discounts_price() {
        assert_eq!(effective_price(dec!(100.00), 20), dec!(80.00));
        assert_eq!(effective_price(dec!(19.99), 15), dec!(16.9915));
        assert_eq!(effective_price(dec!(50), 100), Decimal::ZERO);
    }

    #[test]
    fn test_promotion_is_capped_at_full_discount() {
        assert_eq!(effective_price(dec!(50), 250), Decimal::ZERO);
    }

    #[test]
    fn test_promotion_on_largest_price() {
        let discounted = effective_price(Decimal::MAX, 20);
        assert!(discounted < Decimal::MAX);
        assert!(discounted > Decimal::MAX / dec!(2));
    }

    #[test]
    fn test_display_rounding() {
        assert_eq!(format_price(dec!(16.9915)), "$16.99");
        assert_eq!(format_price(dec!(0.005)), "$0.01");
        assert_eq!(format_price(dec!(240)), "$240.00");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }
}
