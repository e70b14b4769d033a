//! Text rendering of the cost table, the summary, and the exported report.
//!
//! The chart contract is deliberately thin: rendering accepts the category
//! labels and totals produced by the worksheet and draws their shares as
//! proportional horizontal bars, in table order so colors and legend
//! positions stay stable between recalculations.

use chrono::{DateTime, Local};
use paddy_core::CalculatorState;
use paddy_core::models::{
    AnalysisMode, CalculationMode, CategoryTotal, CostSummary, CostType, InputMethod,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::utils::{format_amount, format_quantity, opt_amount};

/// Width of the longest chart bar, in characters.
const BAR_WIDTH: usize = 24;

/// Errors that can occur while producing the exported report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Export was requested before any summary had been calculated.
    /// Nothing is produced; stale or empty results are never exported.
    #[error("nothing to export: no summary has been calculated yet, run `paddy calculate` first")]
    NotCalculated,
}

/// Renders the cost table, parameters, and mode selections.
pub fn render_table(state: &CalculatorState) -> String {
    let mut out = String::new();

    let values = match state.calculation_mode {
        CalculationMode::PerArea => "per-rai values",
        CalculationMode::Total => "absolute values",
    };
    out.push_str(&format!(
        "Cost table ({} entry, {}, {} analysis)\n",
        state.input_method.as_str(),
        values,
        state.analysis_mode.as_str(),
    ));

    for (index, row) in state.rows.iter().enumerate() {
        let number = index + 1;
        let fixed_marker = if state.analysis_mode == AnalysisMode::Advanced
            && row.cost_type == CostType::Fixed
        {
            "  (fixed)"
        } else {
            ""
        };
        match state.input_method {
            InputMethod::Simple => {
                out.push_str(&format!(
                    "{number:>4}  {:<24} {:>14}{fixed_marker}\n",
                    row.display_category(),
                    format_amount(row.total),
                ));
            }
            InputMethod::Detailed => {
                out.push_str(&format!(
                    "{number:>4}  {:<24} {:>10} {:<6} {:>12} {:>14}{fixed_marker}\n",
                    row.display_category(),
                    row.quantity.map(format_quantity).unwrap_or_else(|| "—".to_string()),
                    row.unit.as_deref().unwrap_or(""),
                    row.unit_price.map(format_amount).unwrap_or_else(|| "—".to_string()),
                    format_amount(row.total),
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&render_parameters(state));
    out
}

/// Renders the farm-level parameters block.
fn render_parameters(state: &CalculatorState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Area:   {}\n",
        opt_quantity(state.params.area_rai, "rai"),
    ));
    out.push_str(&format!(
        "Yield:  {}\n",
        opt_quantity(state.params.yield_tons, "tons"),
    ));
    out.push_str(&format!(
        "Price:  {}\n",
        opt_amount(state.params.price_per_ton, "baht/ton"),
    ));
    out
}

/// Renders the proportional chart of category totals.
pub fn render_chart(categories: &[CategoryTotal]) -> String {
    let max = categories.iter().map(|c| c.total).max();
    let Some(max) = max.filter(|m| *m > Decimal::ZERO) else {
        return "(no cost categories with a positive total)\n".to_string();
    };
    let sum: Decimal = categories.iter().map(|c| c.total).sum();

    let mut out = String::new();
    for category in categories {
        let bar_len = (category.total / max * Decimal::from(BAR_WIDTH))
            .round()
            .to_usize()
            .unwrap_or(0)
            .max(1);
        let percent = (category.total / sum * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        out.push_str(&format!(
            "{:<24} {:>14}  {:<width$}  {percent:>5.1}%\n",
            category.label,
            format_amount(category.total),
            "█".repeat(bar_len),
            width = BAR_WIDTH,
        ));
    }
    out
}

/// Renders the summary metrics block.
pub fn render_summary(summary: &CostSummary) -> String {
    let mut out = String::new();
    out.push_str("Summary\n");
    out.push_str(&metric("Total cost", Some(summary.total_cost), "baht"));
    if let Some(split) = &summary.cost_split {
        out.push_str(&metric("Fixed costs", Some(split.fixed), "baht"));
        out.push_str(&metric("Variable costs", Some(split.variable), "baht"));
    }
    out.push_str(&metric("Cost per rai", summary.cost_per_rai, "baht/rai"));
    out.push_str(&metric("Cost per kilogram", summary.cost_per_kg, "baht/kg"));
    out.push_str(&metric(
        "Break-even price",
        summary.break_even_price_per_kg,
        "baht/kg",
    ));
    out.push_str(&metric(
        "Break-even yield",
        summary.break_even_yield_tons,
        "tons",
    ));
    out.push_str(&metric("Revenue", summary.revenue_total, "baht"));
    out.push_str(&metric("Profit", summary.profit_total, "baht"));
    out.push_str(&metric("Profit per rai", summary.profit_per_rai, "baht/rai"));
    out
}

/// Renders the full exported report from the last computed summary.
///
/// # Errors
///
/// Returns [`ReportError::NotCalculated`] when the state holds no summary
/// (nothing has been calculated since the last edit). No partial output
/// is produced.
pub fn render_report(
    state: &CalculatorState,
    generated_at: DateTime<Local>,
) -> Result<String, ReportError> {
    let summary = state.summary.as_ref().ok_or(ReportError::NotCalculated)?;

    let mut out = String::new();
    out.push_str("Rice production cost report\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M"),
    ));
    out.push_str(&render_parameters(state));
    out.push('\n');
    out.push_str("Cost breakdown\n");
    out.push_str(&render_chart(&summary.categories));
    out.push('\n');
    out.push_str(&render_summary(summary));
    Ok(out)
}

fn metric(
    label: &str,
    value: Option<Decimal>,
    unit: &str,
) -> String {
    format!("  {label:<20} {:>24}\n", opt_amount(value, unit))
}

fn opt_quantity(
    value: Option<Decimal>,
    unit: &str,
) -> String {
    match value {
        Some(v) => format!("{} {unit}", format_quantity(v)),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use paddy_core::state::{CalculatorEvent, RowField};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn calculated_state() -> CalculatorState {
        let mut state = CalculatorState::default()
            .apply(CalculatorEvent::EditRow {
                index: 0,
                field: RowField::SimpleCost(Some(dec!(500))),
            })
            .apply(CalculatorEvent::SetCalculationMode(CalculationMode::Total))
            .apply(CalculatorEvent::SetArea(Some(dec!(10))))
            .apply(CalculatorEvent::SetYield(Some(dec!(1))))
            .apply(CalculatorEvent::SetPricePerTon(Some(dec!(12000))));
        state.calculate().unwrap();
        state
    }

    // =========================================================================
    // render_report tests
    // =========================================================================

    #[test]
    fn report_refuses_when_nothing_was_calculated() {
        let state = CalculatorState::default();

        let result = render_report(&state, Local::now());

        assert_eq!(result, Err(ReportError::NotCalculated));
    }

    #[test]
    fn report_contains_summary_and_breakdown() {
        let state = calculated_state();

        let report = render_report(&state, Local::now()).unwrap();

        assert!(report.contains("Rice production cost report"));
        assert!(report.contains("Generated: "));
        assert!(report.contains("Seed"));
        assert!(report.contains("500.00 baht"));
        assert!(report.contains("12,000.00 baht"));
        assert!(report.contains("Break-even price"));
    }

    #[test]
    fn report_refuses_after_an_invalidating_edit() {
        let state = calculated_state().apply(CalculatorEvent::SetArea(Some(dec!(20))));

        let result = render_report(&state, Local::now());

        assert_eq!(result, Err(ReportError::NotCalculated));
    }

    // =========================================================================
    // render_chart tests
    // =========================================================================

    #[test]
    fn chart_bars_are_proportional_to_the_largest_total() {
        let categories = vec![
            CategoryTotal {
                label: "Fertilizer".to_string(),
                total: dec!(400),
            },
            CategoryTotal {
                label: "Seed".to_string(),
                total: dec!(100),
            },
        ];

        let chart = render_chart(&categories);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 4);
        assert!(lines[0].contains("80.0%"));
        assert!(lines[1].contains("20.0%"));
    }

    #[test]
    fn chart_keeps_table_order() {
        let categories = vec![
            CategoryTotal {
                label: "Seed".to_string(),
                total: dec!(1),
            },
            CategoryTotal {
                label: "Labor".to_string(),
                total: dec!(99),
            },
        ];

        let chart = render_chart(&categories);

        let seed_pos = chart.find("Seed").unwrap();
        let labor_pos = chart.find("Labor").unwrap();
        assert!(seed_pos < labor_pos);
    }

    #[test]
    fn chart_handles_an_empty_breakdown() {
        let chart = render_chart(&[]);

        assert!(chart.contains("no cost categories"));
    }

    // =========================================================================
    // render_summary tests
    // =========================================================================

    #[test]
    fn summary_shows_unavailable_metrics_as_dash() {
        let mut state = CalculatorState::default()
            .apply(CalculatorEvent::EditRow {
                index: 0,
                field: RowField::SimpleCost(Some(dec!(500))),
            })
            .apply(CalculatorEvent::SetCalculationMode(CalculationMode::Total));
        let summary = state.calculate().unwrap();

        let text = render_summary(&summary);

        assert!(text.contains("Total cost"));
        assert!(text.contains("—"));
        assert!(!text.contains("Fixed costs"));
    }

    #[test]
    fn summary_includes_cost_split_under_advanced_analysis() {
        let mut state = calculated_state()
            .apply(CalculatorEvent::SetAnalysisMode(AnalysisMode::Advanced))
            .apply(CalculatorEvent::EditRow {
                index: 6,
                field: RowField::CostType(CostType::Fixed),
            })
            .apply(CalculatorEvent::EditRow {
                index: 6,
                field: RowField::SimpleCost(Some(dec!(2000))),
            });
        let summary = state.calculate().unwrap();

        let text = render_summary(&summary);

        assert!(text.contains("Fixed costs"));
        assert!(text.contains("2,000.00 baht"));
        assert!(text.contains("Variable costs"));
    }

    // =========================================================================
    // render_table tests
    // =========================================================================

    #[test]
    fn table_lists_rows_with_totals_under_simple_entry() {
        let state = calculated_state();

        let table = render_table(&state);

        assert!(table.contains("simple entry"));
        assert!(table.contains("Seed"));
        assert!(table.contains("500.00"));
        assert!(table.contains("Area:   10 rai"));
    }

    #[test]
    fn table_shows_detailed_columns_under_detailed_entry() {
        let state = CalculatorState::default()
            .apply(CalculatorEvent::SetInputMethod(InputMethod::Detailed))
            .apply(CalculatorEvent::EditRow {
                index: 0,
                field: RowField::Quantity(Some(dec!(40))),
            })
            .apply(CalculatorEvent::EditRow {
                index: 0,
                field: RowField::Unit(Some("kg".to_string())),
            })
            .apply(CalculatorEvent::EditRow {
                index: 0,
                field: RowField::UnitPrice(Some(dec!(20))),
            });

        let table = render_table(&state);

        assert!(table.contains("detailed entry"));
        assert!(table.contains("40"));
        assert!(table.contains("kg"));
        assert!(table.contains("800.00"));
    }
}
