//! Season cost summary calculations.
//!
//! This module folds the cost table and the farm-level parameters into a
//! [`CostSummary`]: the absolute cost totals, the unit economics, and the
//! break-even and profit figures shown on the results screen.
//!
//! # Calculation steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Per-row totals from raw fields under the active input method |
//! | 2    | Positive-total rows form the category breakdown; their sum is the table total |
//! | 3    | Advanced analysis also partitions the table total by cost type |
//! | 4    | Per-area mode scales table values by the cultivated area (area must be positive) |
//! | 5    | Unit economics: cost per rai, cost per kg of expected yield |
//! | 6    | Break-even price per kg and break-even yield at the entered price |
//! | 7    | Revenue, profit, and profit per rai |
//!
//! Metrics whose inputs are absent or non-positive come back as `None`.
//! The only hard failure is requesting per-area calculation without a
//! positive area.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paddy_core::CostWorksheet;
//! use paddy_core::models::{
//!     AnalysisMode, CalculationMode, GlobalParameters, InputMethod, RowEntry,
//! };
//!
//! let mut row = RowEntry::new("Fertilizer");
//! row.simple_cost = Some(dec!(500));
//! let rows = vec![row];
//!
//! let params = GlobalParameters {
//!     area_rai: Some(dec!(10)),
//!     yield_tons: Some(dec!(1)),
//!     price_per_ton: Some(dec!(12000)),
//! };
//!
//! let worksheet = CostWorksheet::new(&rows);
//! let summary = worksheet
//!     .calculate(
//!         &params,
//!         InputMethod::Simple,
//!         CalculationMode::Total,
//!         AnalysisMode::Basic,
//!     )
//!     .unwrap();
//!
//! assert_eq!(summary.total_cost, dec!(500.00));
//! assert_eq!(summary.cost_per_rai, Some(dec!(50.00)));
//! assert_eq!(summary.cost_per_kg, Some(dec!(0.50)));
//! assert_eq!(summary.revenue_total, Some(dec!(12000.00)));
//! assert_eq!(summary.profit_total, Some(dec!(11500.00)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{per_unit, round_half_up};
use crate::models::{
    AnalysisMode, CalculationMode, CategoryTotal, CostSplit, CostSummary, CostType,
    GlobalParameters, InputMethod, RowEntry,
};

/// Errors that can occur while calculating a cost summary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostWorksheetError {
    /// Per-area calculation was requested without a positive cultivated area.
    ///
    /// This is the one hard precondition of the calculator; the message is
    /// shown to the user as-is and no summary is produced.
    #[error("cultivated area (rai) must be greater than zero to calculate per-area costs")]
    MissingArea,
}

/// Calculator for the season cost summary.
///
/// Borrows the cost table; every calculate call reads the rows' raw fields
/// under the input method passed in, so the result never depends on stale
/// stored totals.
#[derive(Debug, Clone)]
pub struct CostWorksheet<'a> {
    rows: &'a [RowEntry],
}

impl<'a> CostWorksheet<'a> {
    pub fn new(rows: &'a [RowEntry]) -> Self {
        Self { rows }
    }

    /// Calculates the full summary.
    ///
    /// # Errors
    ///
    /// Returns [`CostWorksheetError::MissingArea`] when `calculation_mode`
    /// is [`CalculationMode::PerArea`] and the area is absent or not
    /// positive. Nothing else fails: missing inputs degrade to
    /// "unavailable" metrics.
    pub fn calculate(
        &self,
        params: &GlobalParameters,
        input_method: InputMethod,
        calculation_mode: CalculationMode,
        analysis_mode: AnalysisMode,
    ) -> Result<CostSummary, CostWorksheetError> {
        let scale = self.scale_factor(calculation_mode, params)?;

        let table_categories = self.category_totals(input_method);
        let table_total: Decimal = table_categories.iter().map(|c| c.total).sum();

        let categories = table_categories
            .into_iter()
            .map(|c| CategoryTotal {
                label: c.label,
                total: round_half_up(c.total * scale),
            })
            .collect();
        let total_cost = round_half_up(table_total * scale);

        let cost_split = match analysis_mode {
            AnalysisMode::Basic => None,
            AnalysisMode::Advanced => {
                let split = self.table_split(input_method);
                Some(CostSplit {
                    fixed: round_half_up(split.fixed * scale),
                    variable: round_half_up(split.variable * scale),
                })
            }
        };

        let area = params.positive_area();
        let yield_kg = params
            .positive_yield()
            .map(|tons| tons * Decimal::ONE_THOUSAND);

        let cost_per_rai = per_unit(total_cost, area);
        let cost_per_kg = per_unit(total_cost, yield_kg);
        let break_even_price_per_kg = cost_per_kg;
        let break_even_yield_tons = per_unit(total_cost, params.positive_price());

        let revenue_total = match (params.positive_price(), params.positive_yield()) {
            (Some(price), Some(tons)) => Some(round_half_up(price * tons)),
            _ => None,
        };
        let profit_total = revenue_total.map(|revenue| round_half_up(revenue - total_cost));
        let profit_per_rai = profit_total.and_then(|profit| per_unit(profit, area));

        Ok(CostSummary {
            total_cost,
            cost_split,
            cost_per_rai,
            cost_per_kg,
            break_even_price_per_kg,
            break_even_yield_tons,
            revenue_total,
            profit_total,
            profit_per_rai,
            categories,
        })
    }

    /// The multiplier that turns table sums into absolute amounts.
    ///
    /// Per-area tables are expressed per rai and must be scaled by the
    /// cultivated area; absolute tables scale by one.
    fn scale_factor(
        &self,
        calculation_mode: CalculationMode,
        params: &GlobalParameters,
    ) -> Result<Decimal, CostWorksheetError> {
        match calculation_mode {
            CalculationMode::PerArea => params
                .positive_area()
                .ok_or(CostWorksheetError::MissingArea),
            CalculationMode::Total => Ok(Decimal::ONE),
        }
    }

    /// Positive-total rows as `(label, table total)` in table order.
    ///
    /// Rows whose total is zero or negative are left out of the breakdown
    /// and contribute nothing to the sums.
    fn category_totals(
        &self,
        input_method: InputMethod,
    ) -> Vec<CategoryTotal> {
        self.rows
            .iter()
            .filter_map(|row| {
                let total = row.computed_total(input_method);
                (total > Decimal::ZERO).then(|| CategoryTotal {
                    label: row.display_category().to_string(),
                    total,
                })
            })
            .collect()
    }

    /// Fixed/variable partition of the included table totals.
    fn table_split(
        &self,
        input_method: InputMethod,
    ) -> CostSplit {
        let mut split = CostSplit {
            fixed: Decimal::ZERO,
            variable: Decimal::ZERO,
        };
        for row in self.rows {
            let total = row.computed_total(input_method);
            if total <= Decimal::ZERO {
                continue;
            }
            match row.cost_type {
                CostType::Fixed => split.fixed += total,
                CostType::Variable => split.variable += total,
            }
        }
        split
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn simple_row(
        category: &str,
        cost: Decimal,
    ) -> RowEntry {
        let mut row = RowEntry::new(category);
        row.simple_cost = Some(cost);
        row
    }

    fn detailed_row(
        category: &str,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> RowEntry {
        let mut row = RowEntry::new(category);
        row.quantity = Some(quantity);
        row.unit_price = Some(unit_price);
        row
    }

    fn full_params() -> GlobalParameters {
        GlobalParameters {
            area_rai: Some(dec!(10)),
            yield_tons: Some(dec!(1)),
            price_per_ton: Some(dec!(12000)),
        }
    }

    // =========================================================================
    // scale_factor tests
    // =========================================================================

    #[test]
    fn scale_factor_is_area_in_per_area_mode() {
        let rows = [simple_row("Seed", dec!(100))];
        let worksheet = CostWorksheet::new(&rows);

        let result = worksheet.scale_factor(CalculationMode::PerArea, &full_params());

        assert_eq!(result, Ok(dec!(10)));
    }

    #[test]
    fn scale_factor_is_one_in_total_mode() {
        let rows = [simple_row("Seed", dec!(100))];
        let worksheet = CostWorksheet::new(&rows);

        let result = worksheet.scale_factor(CalculationMode::Total, &GlobalParameters::default());

        assert_eq!(result, Ok(Decimal::ONE));
    }

    #[test]
    fn scale_factor_fails_without_positive_area_in_per_area_mode() {
        let rows = [simple_row("Seed", dec!(100))];
        let worksheet = CostWorksheet::new(&rows);
        let mut params = GlobalParameters::default();

        let result = worksheet.scale_factor(CalculationMode::PerArea, &params);
        assert_eq!(result, Err(CostWorksheetError::MissingArea));

        params.area_rai = Some(Decimal::ZERO);
        let result = worksheet.scale_factor(CalculationMode::PerArea, &params);
        assert_eq!(result, Err(CostWorksheetError::MissingArea));
    }

    // =========================================================================
    // category_totals tests
    // =========================================================================

    #[test]
    fn category_totals_keep_table_order() {
        let rows = [
            simple_row("Seed", dec!(100)),
            simple_row("Fertilizer", dec!(300)),
            simple_row("Labor", dec!(200)),
        ];
        let worksheet = CostWorksheet::new(&rows);

        let categories = worksheet.category_totals(InputMethod::Simple);

        let labels: Vec<&str> = categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Seed", "Fertilizer", "Labor"]);
    }

    #[test]
    fn category_totals_exclude_zero_total_rows() {
        let rows = [
            detailed_row("Seed", dec!(2), dec!(100)),
            detailed_row("Fertilizer", dec!(0), dec!(100)),
        ];
        let worksheet = CostWorksheet::new(&rows);

        let categories = worksheet.category_totals(InputMethod::Detailed);

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Seed");
        assert_eq!(categories[0].total, dec!(200));
    }

    #[test]
    fn category_totals_label_blank_categories_as_unspecified() {
        let rows = [simple_row("", dec!(50))];
        let worksheet = CostWorksheet::new(&rows);

        let categories = worksheet.category_totals(InputMethod::Simple);

        assert_eq!(categories[0].label, "unspecified");
    }

    // =========================================================================
    // calculate: end-to-end scenarios
    // =========================================================================

    #[test]
    fn calculate_single_simple_row_in_total_mode() {
        // One 500-baht row, absolute totals, area 10 rai, yield 1 ton at
        // 12,000 baht/ton.
        let rows = [simple_row("Fertilizer", dec!(500))];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &full_params(),
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec!(500.00));
        assert_eq!(summary.cost_per_rai, Some(dec!(50.00)));
        assert_eq!(summary.cost_per_kg, Some(dec!(0.50)));
        assert_eq!(summary.revenue_total, Some(dec!(12000.00)));
        assert_eq!(summary.profit_total, Some(dec!(11500.00)));
        assert_eq!(summary.profit_per_rai, Some(dec!(1150.00)));
    }

    #[test]
    fn calculate_same_row_in_per_area_mode_scales_by_area() {
        let rows = [simple_row("Fertilizer", dec!(500))];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &full_params(),
                InputMethod::Simple,
                CalculationMode::PerArea,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec!(5000.00));
        assert_eq!(summary.cost_per_rai, Some(dec!(500.00)));
        // The breakdown carries absolute amounts as well.
        assert_eq!(summary.categories[0].total, dec!(5000.00));
    }

    #[test]
    fn calculate_per_area_without_area_fails_and_produces_nothing() {
        let rows = [simple_row("Fertilizer", dec!(500))];
        let worksheet = CostWorksheet::new(&rows);
        let params = GlobalParameters {
            area_rai: None,
            yield_tons: Some(dec!(1)),
            price_per_ton: Some(dec!(12000)),
        };

        let result = worksheet.calculate(
            &params,
            InputMethod::Simple,
            CalculationMode::PerArea,
            AnalysisMode::Basic,
        );

        assert_eq!(result, Err(CostWorksheetError::MissingArea));
    }

    #[test]
    fn calculate_detailed_rows_excludes_zero_quantity_from_breakdown() {
        let rows = [
            detailed_row("Seed", dec!(2), dec!(100)),
            detailed_row("Fertilizer", dec!(0), dec!(100)),
        ];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &GlobalParameters::default(),
                InputMethod::Detailed,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec!(200.00));
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].label, "Seed");
    }

    // =========================================================================
    // calculate: mode and availability behavior
    // =========================================================================

    #[test]
    fn calculate_total_mode_never_requires_area() {
        let rows = [simple_row("Seed", dec!(800))];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &GlobalParameters::default(),
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec!(800.00));
        assert_eq!(summary.cost_per_rai, None);
        assert_eq!(summary.cost_per_kg, None);
        assert_eq!(summary.break_even_price_per_kg, None);
        assert_eq!(summary.break_even_yield_tons, None);
        assert_eq!(summary.revenue_total, None);
        assert_eq!(summary.profit_total, None);
        assert_eq!(summary.profit_per_rai, None);
    }

    #[test]
    fn calculate_ignores_inactive_method_fields() {
        let mut row = simple_row("Seed", dec!(999));
        row.quantity = Some(dec!(3));
        row.unit_price = Some(dec!(10));
        let rows = [row];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &GlobalParameters::default(),
                InputMethod::Detailed,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec!(30.00));
    }

    #[test]
    fn calculate_break_even_metrics() {
        // 6,000 baht total, 2 tons expected, 8,000 baht/ton.
        let rows = [simple_row("Inputs", dec!(6000))];
        let worksheet = CostWorksheet::new(&rows);
        let params = GlobalParameters {
            area_rai: None,
            yield_tons: Some(dec!(2)),
            price_per_ton: Some(dec!(8000)),
        };

        let summary = worksheet
            .calculate(
                &params,
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        // 6000 / 2000 kg
        assert_eq!(summary.cost_per_kg, Some(dec!(3.00)));
        assert_eq!(summary.break_even_price_per_kg, summary.cost_per_kg);
        // 6000 / 8000 baht per ton
        assert_eq!(summary.break_even_yield_tons, Some(dec!(0.75)));
        assert_eq!(summary.revenue_total, Some(dec!(16000.00)));
        assert_eq!(summary.profit_total, Some(dec!(10000.00)));
    }

    #[test]
    fn calculate_negative_rows_contribute_nothing() {
        let rows = [
            simple_row("Seed", dec!(300)),
            simple_row("Rebate", dec!(-100)),
        ];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &GlobalParameters::default(),
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, dec!(300.00));
        assert_eq!(summary.categories.len(), 1);
    }

    #[test]
    fn calculate_empty_table_yields_zero_summary() {
        let rows: [RowEntry; 0] = [];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &full_params(),
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.total_cost, Decimal::ZERO);
        assert!(summary.categories.is_empty());
        assert_eq!(summary.cost_per_rai, Some(dec!(0.00)));
    }

    // =========================================================================
    // calculate: analysis mode
    // =========================================================================

    #[test]
    fn calculate_basic_mode_has_no_cost_split() {
        let rows = [simple_row("Seed", dec!(100))];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &GlobalParameters::default(),
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Basic,
            )
            .unwrap();

        assert_eq!(summary.cost_split, None);
    }

    #[test]
    fn calculate_advanced_mode_partitions_by_cost_type() {
        let mut land = simple_row("Land rent", dec!(2000));
        land.cost_type = CostType::Fixed;
        let rows = [
            land,
            simple_row("Fertilizer", dec!(1500)),
            simple_row("Labor", dec!(500)),
        ];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &GlobalParameters::default(),
                InputMethod::Simple,
                CalculationMode::Total,
                AnalysisMode::Advanced,
            )
            .unwrap();

        assert_eq!(
            summary.cost_split,
            Some(CostSplit {
                fixed: dec!(2000.00),
                variable: dec!(2000.00),
            })
        );
        assert_eq!(summary.total_cost, dec!(4000.00));
    }

    #[test]
    fn calculate_advanced_split_scales_with_area() {
        let mut land = simple_row("Land rent", dec!(200));
        land.cost_type = CostType::Fixed;
        let rows = [land, simple_row("Fertilizer", dec!(100))];
        let worksheet = CostWorksheet::new(&rows);

        let summary = worksheet
            .calculate(
                &full_params(),
                InputMethod::Simple,
                CalculationMode::PerArea,
                AnalysisMode::Advanced,
            )
            .unwrap();

        assert_eq!(
            summary.cost_split,
            Some(CostSplit {
                fixed: dec!(2000.00),
                variable: dec!(1000.00),
            })
        );
    }
}
