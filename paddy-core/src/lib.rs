//! Core calculation and state engine for the rice production cost
//! calculator.
//!
//! The crate is organized leaf-first: [`models`] holds the plain data
//! types, [`calculations`] the cost worksheet, [`state`] the calculator
//! state with its pure event reducer, and [`persistence`] the versioned
//! snapshot contract. Presentation (rendering, storage transport, CLI)
//! lives in the `paddy-cli` crate.

pub mod calculations;
pub mod models;
pub mod persistence;
pub mod state;

pub use calculations::{CostWorksheet, CostWorksheetError};
pub use models::*;
pub use persistence::{PersistedRow, PersistedState, STATE_VERSION, restore, snapshot};
pub use state::{CalculatorEvent, CalculatorState, DEFAULT_CATEGORIES, RowField};
