//! Calculator state and its transition events.
//!
//! All user interaction is modeled as a single [`CalculatorState`] value
//! plus pure transition functions: `apply(state, event)` returns the next
//! state, and rendering is a projection of the state. The summary is the
//! one piece of derived state; any edit or mode change invalidates it, and
//! only an explicit [`CalculatorState::calculate`] call repopulates it.

use rust_decimal::Decimal;

use crate::calculations::{CostWorksheet, CostWorksheetError};
use crate::models::{
    AnalysisMode, CalculationMode, CostSummary, CostType, GlobalParameters, InputMethod, RowEntry,
};

/// Typical rice-farming cost categories, used to seed a fresh table.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Seed",
    "Fertilizer",
    "Pesticides",
    "Labor",
    "Water and electricity",
    "Equipment rental",
    "Land rent",
    "Harvest and transport",
    "Loan interest",
    "Other",
];

/// The full calculator state: cost table, farm parameters, mode
/// selections, and the last computed summary (if still valid).
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub rows: Vec<RowEntry>,
    pub params: GlobalParameters,
    pub input_method: InputMethod,
    pub calculation_mode: CalculationMode,
    pub analysis_mode: AnalysisMode,

    /// Last computed summary. `None` until [`Self::calculate`] succeeds,
    /// and cleared again by every state transition. Never persisted.
    pub summary: Option<CostSummary>,
}

impl Default for CalculatorState {
    /// The initial state: one row per predefined category, blank
    /// parameters, default mode selections.
    fn default() -> Self {
        Self {
            rows: DEFAULT_CATEGORIES.iter().copied().map(RowEntry::new).collect(),
            params: GlobalParameters::default(),
            input_method: InputMethod::default(),
            calculation_mode: CalculationMode::default(),
            analysis_mode: AnalysisMode::default(),
            summary: None,
        }
    }
}

/// A single editable field of a cost row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowField {
    Category(String),
    CostType(CostType),
    SimpleCost(Option<Decimal>),
    Quantity(Option<Decimal>),
    Unit(Option<String>),
    UnitPrice(Option<Decimal>),
}

/// State transitions triggered by user interaction.
///
/// Events with an out-of-range row index are ignored (the row may have
/// been deleted by the time the event arrives).
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorEvent {
    AddRow { category: String },
    RemoveRow { index: usize },
    EditRow { index: usize, field: RowField },
    SetArea(Option<Decimal>),
    SetYield(Option<Decimal>),
    SetPricePerTon(Option<Decimal>),
    SetInputMethod(InputMethod),
    SetCalculationMode(CalculationMode),
    SetAnalysisMode(AnalysisMode),
    Reset,
}

impl CalculatorState {
    /// Applies one event and returns the next state.
    ///
    /// Every transition invalidates the stored summary. Switching the
    /// input method preserves all raw row fields (switching is
    /// non-destructive) and recomputes every row total under the new
    /// method, so the total invariant holds at all times.
    pub fn apply(
        mut self,
        event: CalculatorEvent,
    ) -> Self {
        self.summary = None;

        match event {
            CalculatorEvent::AddRow { category } => {
                self.rows.push(RowEntry::new(category));
            }
            CalculatorEvent::RemoveRow { index } => {
                if index < self.rows.len() {
                    self.rows.remove(index);
                }
            }
            CalculatorEvent::EditRow { index, field } => {
                let method = self.input_method;
                if let Some(row) = self.rows.get_mut(index) {
                    let affects_total = match &field {
                        RowField::SimpleCost(_) => method == InputMethod::Simple,
                        RowField::Quantity(_) | RowField::UnitPrice(_) => {
                            method == InputMethod::Detailed
                        }
                        _ => false,
                    };
                    match field {
                        RowField::Category(value) => row.category = value,
                        RowField::CostType(value) => row.cost_type = value,
                        RowField::SimpleCost(value) => row.simple_cost = value,
                        RowField::Quantity(value) => row.quantity = value,
                        RowField::Unit(value) => row.unit = value,
                        RowField::UnitPrice(value) => row.unit_price = value,
                    }
                    if affects_total {
                        row.recompute_total(method);
                    }
                }
            }
            CalculatorEvent::SetArea(value) => self.params.area_rai = value,
            CalculatorEvent::SetYield(value) => self.params.yield_tons = value,
            CalculatorEvent::SetPricePerTon(value) => self.params.price_per_ton = value,
            CalculatorEvent::SetInputMethod(method) => {
                self.input_method = method;
                self.recompute_totals();
            }
            CalculatorEvent::SetCalculationMode(mode) => self.calculation_mode = mode,
            CalculatorEvent::SetAnalysisMode(mode) => self.analysis_mode = mode,
            CalculatorEvent::Reset => return Self::default(),
        }

        self
    }

    /// Runs the cost worksheet over the current state and stores the
    /// resulting summary.
    ///
    /// # Errors
    ///
    /// Returns [`CostWorksheetError`] on the per-area precondition
    /// failure. A failed calculate mutates nothing: rows, parameters, and
    /// any previously stored summary are left as they were.
    pub fn calculate(&mut self) -> Result<CostSummary, CostWorksheetError> {
        let summary = CostWorksheet::new(&self.rows).calculate(
            &self.params,
            self.input_method,
            self.calculation_mode,
            self.analysis_mode,
        )?;
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Appends bulk-loaded rows (snapshot restore, CSV import) and brings
    /// their totals in line with the current input method.
    pub fn append_rows(
        &mut self,
        rows: Vec<RowEntry>,
    ) {
        self.summary = None;
        self.rows.extend(rows);
        self.recompute_totals();
    }

    /// Recomputes every row total under the current input method.
    pub fn recompute_totals(&mut self) {
        for row in &mut self.rows {
            row.recompute_total(self.input_method);
        }
    }
}
