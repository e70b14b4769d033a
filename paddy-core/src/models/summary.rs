use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of the proportional cost breakdown.
///
/// The breakdown keeps table insertion order so that chart coloring and
/// legend ordering stay stable across recalculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: Decimal,
}

/// Fixed/variable partition of the total cost, produced only under
/// advanced analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSplit {
    pub fixed: Decimal,
    pub variable: Decimal,
}

/// Result of a calculate request.
///
/// A summary is ephemeral: it is recomputed on every explicit calculate
/// request and is never persisted. Metrics whose inputs are absent or
/// non-positive are `None` ("unavailable") rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Absolute total production cost in baht.
    pub total_cost: Decimal,

    /// Fixed/variable partition of `total_cost`; advanced analysis only.
    pub cost_split: Option<CostSplit>,

    /// Cost per rai of cultivated area.
    pub cost_per_rai: Option<Decimal>,

    /// Cost per kilogram of expected yield.
    pub cost_per_kg: Option<Decimal>,

    /// Minimum sale price per kilogram at which revenue covers cost.
    /// Numerically equal to `cost_per_kg`; kept as its own field for
    /// domain clarity.
    pub break_even_price_per_kg: Option<Decimal>,

    /// Minimum yield in tons at which revenue covers cost, at the entered
    /// selling price.
    pub break_even_yield_tons: Option<Decimal>,

    /// Expected revenue in baht.
    pub revenue_total: Option<Decimal>,

    /// Expected profit in baht (revenue minus total cost).
    pub profit_total: Option<Decimal>,

    /// Expected profit per rai.
    pub profit_per_rai: Option<Decimal>,

    /// Positive-total categories in table order, for the proportional chart.
    pub categories: Vec<CategoryTotal>,
}
