use serde::{Deserialize, Serialize};

/// How row costs are entered: one lump amount, or quantity times unit price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputMethod {
    #[default]
    Simple,
    Detailed,
}

impl InputMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "detailed" => Some(Self::Detailed),
            _ => None,
        }
    }
}

/// How table values are interpreted: per rai of cultivated area, or as
/// absolute totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationMode {
    #[default]
    PerArea,
    Total,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerArea => "perArea",
            Self::Total => "total",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "perArea" => Some(Self::PerArea),
            "total" => Some(Self::Total),
            _ => None,
        }
    }
}

/// Reporting depth: basic totals, or a fixed/variable cost-structure split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisMode {
    #[default]
    Basic,
    Advanced,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(Self::Basic),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}
