//! Versioned snapshot of the calculator state.
//!
//! The calculator persists into a single slot as a schema-tagged JSON
//! record. The contract is reject-don't-migrate: a snapshot written by any
//! other schema version, or any structurally unreadable blob, is
//! discarded as a whole and the caller falls back to the default state.
//! Partial recovery is deliberately not attempted; a version mismatch is
//! treated exactly like corrupt data.
//!
//! Row totals are derived state and are never stored or trusted: after a
//! successful restore they are recomputed from the raw fields under the
//! restored input method, so the total invariant holds even if the blob
//! was edited by hand.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    AnalysisMode, CalculationMode, CostType, GlobalParameters, InputMethod, RowEntry,
};
use crate::state::CalculatorState;

/// Schema tag written into every snapshot. Bump on any layout change.
pub const STATE_VERSION: &str = "5";

/// Serialized shape of one cost row. Mirrors the wire layout exactly;
/// every field is defensively optional, and the derived total is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRow {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cost_type: CostType,
    #[serde(default)]
    pub simple_cost: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

/// The full persisted record.
///
/// `version` is the only required field: a record without it does not
/// parse and is discarded. Everything else defaults when absent so that
/// same-version records with missing fields still restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub version: String,

    /// Analysis mode; historically named `mode` on the wire.
    #[serde(default)]
    pub mode: AnalysisMode,

    #[serde(default)]
    pub area: Option<Decimal>,
    #[serde(default, rename = "yield")]
    pub yield_tons: Option<Decimal>,
    #[serde(default)]
    pub price_per_ton: Option<Decimal>,

    #[serde(default)]
    pub calculation_mode: CalculationMode,
    #[serde(default)]
    pub input_method: InputMethod,

    #[serde(default)]
    pub rows: Vec<PersistedRow>,
}

impl PersistedState {
    /// Encodes the record as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Rebuilds a calculator state from this record, recomputing every
    /// row total under the restored input method. The summary always
    /// starts out empty; it is never persisted.
    fn into_state(self) -> CalculatorState {
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                let mut entry = RowEntry::new(row.category);
                entry.cost_type = row.cost_type;
                entry.simple_cost = row.simple_cost;
                entry.quantity = row.quantity;
                entry.unit = row.unit;
                entry.unit_price = row.unit_price;
                entry
            })
            .collect();

        let mut state = CalculatorState {
            rows,
            params: GlobalParameters {
                area_rai: self.area,
                yield_tons: self.yield_tons,
                price_per_ton: self.price_per_ton,
            },
            input_method: self.input_method,
            calculation_mode: self.calculation_mode,
            analysis_mode: self.mode,
            summary: None,
        };
        state.recompute_totals();
        state
    }
}

/// Serializes the current state into a versioned record.
///
/// Pure: reads the state, writes nothing. The ephemeral summary is not
/// part of the record.
pub fn snapshot(state: &CalculatorState) -> PersistedState {
    PersistedState {
        version: STATE_VERSION.to_string(),
        mode: state.analysis_mode,
        area: state.params.area_rai,
        yield_tons: state.params.yield_tons,
        price_per_ton: state.params.price_per_ton,
        calculation_mode: state.calculation_mode,
        input_method: state.input_method,
        rows: state
            .rows
            .iter()
            .map(|row| PersistedRow {
                category: row.category.clone(),
                cost_type: row.cost_type,
                simple_cost: row.simple_cost,
                quantity: row.quantity,
                unit: row.unit.clone(),
                unit_price: row.unit_price,
            })
            .collect(),
    }
}

/// Parses a persisted record and rebuilds the calculator state.
///
/// Returns `None` when the text does not parse, the version tag is
/// missing, or the tag does not match [`STATE_VERSION`]; the failure is
/// logged at debug level only, since this is silent recovery rather than
/// an error the user needs to see. The caller is expected to discard the
/// stored slot and start from [`CalculatorState::default`].
pub fn restore(raw: &str) -> Option<CalculatorState> {
    let persisted: PersistedState = match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(error) => {
            debug!(%error, "discarding unreadable saved state");
            return None;
        }
    };

    if persisted.version != STATE_VERSION {
        debug!(
            found = %persisted.version,
            expected = STATE_VERSION,
            "discarding saved state from a different schema version",
        );
        return None;
    }

    Some(persisted.into_state())
}
