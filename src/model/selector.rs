//! Evidence-driven strategy selection
//!
//! After the disclosure scan, each skeleton node gets a decision: which
//! strategy to use, which drivers it needs, and which new driver nodes to
//! create. `select_strategy` is pure; `apply_decision` is the single mutation
//! point against the skeleton.

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::node::{Node, ACTOR_AI};
use super::skeleton::StandardSkeleton;
use super::strategy::Strategy;

/// Disclosure evidence gathered for one skeleton node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverDiscovery {
    /// e.g. "revenue"
    pub node_id: String,
    /// Tags for data found in the filings, e.g. ["revenue", "volume"]
    pub available_data: Vec<String>,
    /// Tags for metrics computed from the filings, e.g. ["asp"]
    pub derived_metrics: Vec<String>,
    /// Supporting quote from the source document
    pub source_evidence: String,
    /// 0-1
    pub confidence: f64,
}

/// Recommendation for one node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyDecision {
    pub node_id: String,
    pub recommended_strategy: String,
    pub required_drivers: Vec<String>,
    pub reasoning: String,
    pub confidence: f64,
    /// Driver nodes to create and attach alongside the strategy switch
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub new_drivers: Vec<Node>,
}

/// Maps discovered evidence to strategy assignments
#[derive(Debug, Clone, Default)]
pub struct StrategySelector;

impl StrategySelector {
    pub fn new() -> Self {
        Self
    }

    /// Pure decision procedure, priority order: revenue, cogs, everything else
    pub fn select_strategy(&self, discovery: &DriverDiscovery) -> StrategyDecision {
        let has_tag = |tag: &str| {
            discovery
                .available_data
                .iter()
                .chain(discovery.derived_metrics.iter())
                .any(|d| d.eq_ignore_ascii_case(tag))
        };
        let has_volume =
            has_tag("volume") || has_tag("units") || has_tag("deliveries") || has_tag("shipments");
        let has_price = has_tag("price") || has_tag("asp") || has_tag("average_selling_price");

        let mut decision = StrategyDecision {
            node_id: discovery.node_id.clone(),
            confidence: discovery.confidence,
            ..Default::default()
        };

        if discovery.node_id == "revenue" {
            if has_volume {
                decision.recommended_strategy = "PriceVolume".to_string();
                decision.required_drivers = vec!["price".to_string(), "volume".to_string()];
                decision.reasoning =
                    "Found volume/units data - can build price x volume model".to_string();
                decision.new_drivers = vec![
                    Node::driver("auto_price", "Average Selling Price", "$", ACTOR_AI),
                    Node::driver("auto_volume", "Units Sold", "units", ACTOR_AI),
                ];
                if !has_price {
                    decision.reasoning += " (ASP will be derived: revenue / volume)";
                }
                return decision;
            }

            decision.recommended_strategy = "GrowthRate".to_string();
            decision.reasoning = "No volume data found - using simple growth model".to_string();
            return decision;
        }

        if discovery.node_id == "cogs" {
            if has_volume {
                decision.recommended_strategy = "UnitCost".to_string();
                decision.required_drivers = vec!["volume".to_string(), "unit_cost".to_string()];
                decision.reasoning =
                    "Volume available from revenue - can build unit cost model".to_string();
                decision.new_drivers =
                    vec![Node::driver("auto_unit_cost", "Unit Cost", "$", ACTOR_AI)];
                return decision;
            }

            decision.recommended_strategy = "Margin".to_string();
            decision.required_drivers = vec!["revenue".to_string()];
            decision.reasoning = "Using margin % of revenue".to_string();
            return decision;
        }

        decision.recommended_strategy = "GrowthRate".to_string();
        decision.reasoning = "Default growth strategy".to_string();
        decision
    }

    /// Apply a decision to the skeleton: assign the strategy, attach any new
    /// driver nodes, and stamp the node as machine-updated.
    ///
    /// Fails on an unknown node id or strategy name; a failed driver attach
    /// surfaces the underlying structural error.
    pub fn apply_decision(
        &self,
        skeleton: &mut StandardSkeleton,
        decision: &StrategyDecision,
    ) -> Result<(), ModelError> {
        let strategy = Strategy::from_name(&decision.recommended_strategy)?;

        let node = skeleton
            .node_mut(&decision.node_id)
            .ok_or_else(|| ModelError::UnknownNode(decision.node_id.clone()))?;
        node.strategy = strategy;
        node.touch(ACTOR_AI);

        for driver in &decision.new_drivers {
            skeleton.attach_driver(&decision.node_id, driver.clone())?;
        }
        Ok(())
    }
}
