mod global_params;
mod modes;
mod row_entry;
mod summary;

pub use global_params::GlobalParameters;
pub use modes::{AnalysisMode, CalculationMode, InputMethod};
pub use row_entry::{CostType, RowEntry, UNSPECIFIED_CATEGORY};
pub use summary::{CategoryTotal, CostSplit, CostSummary};
