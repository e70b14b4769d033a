use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::coerce;
use crate::models::InputMethod;

/// Label shown for rows whose category was left blank.
pub const UNSPECIFIED_CATEGORY: &str = "unspecified";

/// Classification of a cost line, used by advanced analysis to split the
/// total into fixed and variable components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostType {
    #[default]
    Variable,
    Fixed,
}

impl CostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "variable" => Some(Self::Variable),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// One cost-category line of the table.
///
/// The raw fields are stored independently of the active input method so
/// that switching methods never loses data. `total` is derived: it is
/// recomputed from the raw fields whenever a relevant field changes or the
/// input method switches, and is never authored directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEntry {
    /// User-entered label; not required to be unique, blank is allowed.
    pub category: String,

    /// Fixed/variable classification; only meaningful in advanced analysis.
    pub cost_type: CostType,

    /// Lump cost, used under [`InputMethod::Simple`].
    pub simple_cost: Option<Decimal>,

    /// Quantity, used under [`InputMethod::Detailed`].
    pub quantity: Option<Decimal>,

    /// Free-text unit for the quantity (kg, bags, hours). Display only.
    pub unit: Option<String>,

    /// Price per unit, used under [`InputMethod::Detailed`].
    pub unit_price: Option<Decimal>,

    /// Derived line total under the input method it was last computed for.
    pub total: Decimal,
}

impl RowEntry {
    /// Creates a row with the given category and no cost data.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            cost_type: CostType::default(),
            simple_cost: None,
            quantity: None,
            unit: None,
            unit_price: None,
            total: Decimal::ZERO,
        }
    }

    /// The category label with blank input mapped to [`UNSPECIFIED_CATEGORY`].
    pub fn display_category(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNSPECIFIED_CATEGORY
        } else {
            trimmed
        }
    }

    /// The line total under `method`, computed from the raw fields.
    ///
    /// Missing operands count as zero. Negative values are not rejected and
    /// propagate into the result.
    pub fn computed_total(
        &self,
        method: InputMethod,
    ) -> Decimal {
        match method {
            InputMethod::Simple => coerce(self.simple_cost),
            InputMethod::Detailed => coerce(self.quantity) * coerce(self.unit_price),
        }
    }

    /// Recomputes and stores `total` for the given input method.
    pub fn recompute_total(
        &mut self,
        method: InputMethod,
    ) {
        self.total = self.computed_total(method);
    }
}
