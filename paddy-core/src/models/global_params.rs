use rust_decimal::Decimal;

/// Farm-level parameters entered once per season, not per cost row.
///
/// All values are optional: an absent or non-positive value disables the
/// derived metrics that depend on it rather than raising an error. The
/// one exception is per-area calculation, which requires a positive area
/// (enforced by the worksheet, not here).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalParameters {
    /// Cultivated area in rai.
    pub area_rai: Option<Decimal>,

    /// Expected paddy yield in tons.
    pub yield_tons: Option<Decimal>,

    /// Expected selling price in baht per ton.
    pub price_per_ton: Option<Decimal>,
}

impl GlobalParameters {
    /// Area when present and positive, otherwise `None`.
    pub fn positive_area(&self) -> Option<Decimal> {
        self.area_rai.filter(|v| *v > Decimal::ZERO)
    }

    /// Yield when present and positive, otherwise `None`.
    pub fn positive_yield(&self) -> Option<Decimal> {
        self.yield_tons.filter(|v| *v > Decimal::ZERO)
    }

    /// Price per ton when present and positive, otherwise `None`.
    pub fn positive_price(&self) -> Option<Decimal> {
        self.price_per_ton.filter(|v| *v > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn positive_accessors_pass_positive_values_through() {
        let params = GlobalParameters {
            area_rai: Some(dec!(10)),
            yield_tons: Some(dec!(1.5)),
            price_per_ton: Some(dec!(12000)),
        };

        assert_eq!(params.positive_area(), Some(dec!(10)));
        assert_eq!(params.positive_yield(), Some(dec!(1.5)));
        assert_eq!(params.positive_price(), Some(dec!(12000)));
    }

    #[test]
    fn positive_accessors_filter_absent_values() {
        let params = GlobalParameters::default();

        assert_eq!(params.positive_area(), None);
        assert_eq!(params.positive_yield(), None);
        assert_eq!(params.positive_price(), None);
    }

    #[test]
    fn positive_accessors_filter_zero_and_negative_values() {
        let params = GlobalParameters {
            area_rai: Some(Decimal::ZERO),
            yield_tons: Some(dec!(-2)),
            price_per_ton: Some(Decimal::ZERO),
        };

        assert_eq!(params.positive_area(), None);
        assert_eq!(params.positive_yield(), None);
        assert_eq!(params.positive_price(), None);
    }
}
