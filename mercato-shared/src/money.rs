use rust_decimal::Decimal;

/// Apply a discount percentage to a base amount.
///
/// An absent percentage leaves the base unchanged. Percentages outside
/// [0, 100] are a caller error and are not checked here.
pub fn apply_percentage(base: Decimal, percent: Option<Decimal>) -> Decimal {
    match percent {
        Some(percent) => base - base * percent / Decimal::ONE_HUNDRED,
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn applies_percentage() {
        assert_eq!(apply_percentage(dec!(100), Some(dec!(10))), dec!(90));
        assert_eq!(apply_percentage(dec!(80), Some(dec!(25))), dec!(60));
    }

    #[test]
    fn absent_percentage_leaves_base_unchanged() {
        assert_eq!(apply_percentage(dec!(100), None), dec!(100));
    }

    #[test]
    fn zero_percentage_is_a_no_op() {
        assert_eq!(apply_percentage(dec!(42.50), Some(Decimal::ZERO)), dec!(42.50));
    }

    #[test]
    fn full_percentage_zeroes_the_price() {
        assert_eq!(apply_percentage(dec!(19.90), Some(dec!(100))), Decimal::ZERO);
    }
}
