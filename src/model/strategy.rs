//! Pluggable projection strategies
//!
//! A strategy is a stateless formula for one node-year. Each variant validates
//! its own required drivers before computing; a missing driver is a named
//! error, never a silent zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Inputs available to a strategy for one target year
#[derive(Debug, Clone, Default)]
pub struct CalcContext {
    /// Target projection year
    pub year: i32,
    /// Previous year's value for this node
    pub last_value: f64,
    /// All historical values for this node
    pub history: BTreeMap<i32, f64>,
    /// Values supplied by attached driver nodes
    pub drivers: BTreeMap<String, f64>,
}

/// A forecasting algorithm for a single node
///
/// Serialized with its name so a stored model round-trips to the same variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Strategy {
    /// Value(t) = Value(t-1) * (1 + rate)
    #[serde(rename = "GrowthRate")]
    Growth { rate: f64 },

    /// Value = price driver * volume driver
    #[serde(rename = "PriceVolume")]
    PriceVolume,

    /// Value = volume driver * unit-cost driver
    #[serde(rename = "UnitCost")]
    UnitCost,

    /// Value = base driver * percent, e.g. COGS = revenue * (1 - gross margin)
    #[serde(rename = "Margin")]
    Margin { percent: f64, base_node_id: String },

    /// Value = sum of every attached driver value
    #[serde(rename = "Sum")]
    Sum,
}

impl Strategy {
    /// Strategy identifier used in serialized models and selector decisions
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Growth { .. } => "GrowthRate",
            Strategy::PriceVolume => "PriceVolume",
            Strategy::UnitCost => "UnitCost",
            Strategy::Margin { .. } => "Margin",
            Strategy::Sum => "Sum",
        }
    }

    /// Name-keyed construction with default parameters
    pub fn from_name(name: &str) -> Result<Self, ModelError> {
        match name {
            "GrowthRate" => Ok(Strategy::Growth { rate: 0.0 }),
            "PriceVolume" => Ok(Strategy::PriceVolume),
            "UnitCost" => Ok(Strategy::UnitCost),
            "Margin" => Ok(Strategy::Margin {
                percent: 0.0,
                base_node_id: "revenue".to_string(),
            }),
            "Sum" => Ok(Strategy::Sum),
            other => Err(ModelError::UnknownStrategy(other.to_string())),
        }
    }

    /// Driver node ids this strategy reads from the context
    ///
    /// Empty for Growth (history only) and Sum (consumes whatever is attached).
    pub fn required_drivers(&self) -> Vec<String> {
        match self {
            Strategy::Growth { .. } | Strategy::Sum => Vec::new(),
            Strategy::PriceVolume => vec!["price".to_string(), "volume".to_string()],
            Strategy::UnitCost => vec!["volume".to_string(), "unit_cost".to_string()],
            Strategy::Margin { base_node_id, .. } => vec![base_node_id.clone()],
        }
    }

    /// Check that the context carries everything this strategy needs
    pub fn validate(&self, ctx: &CalcContext) -> Result<(), ModelError> {
        match self {
            Strategy::Growth { .. } => {
                if ctx.last_value == 0.0 {
                    return Err(ModelError::MissingBaseline { strategy: self.name() });
                }
            }
            Strategy::Sum => {}
            _ => {
                for driver in self.required_drivers() {
                    if !ctx.drivers.contains_key(&driver) {
                        return Err(ModelError::MissingDriver {
                            strategy: self.name(),
                            driver,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Compute the projected value for the context's target year
    pub fn calculate(&self, ctx: &CalcContext) -> Result<f64, ModelError> {
        self.validate(ctx)?;
        let value = match self {
            Strategy::Growth { rate } => ctx.last_value * (1.0 + rate),
            Strategy::PriceVolume => ctx.drivers["price"] * ctx.drivers["volume"],
            Strategy::UnitCost => ctx.drivers["volume"] * ctx.drivers["unit_cost"],
            Strategy::Margin { percent, base_node_id } => ctx.drivers[base_node_id] * percent,
            Strategy::Sum => ctx.drivers.values().sum(),
        };
        Ok(value)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Growth { rate: 0.0 }
    }
}
