//! Addressable financial line-item nodes

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// Actor stamps for the audit trail
pub const ACTOR_SYSTEM: &str = "SYSTEM";
pub const ACTOR_AI: &str = "AI";
pub const ACTOR_USER: &str = "USER";

/// Distinguishes fixed skeleton nodes from dynamically attached drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Fixed at construction, never deleted at runtime
    Skeleton,
    /// Discovered from disclosures, can be attached/detached
    Driver,
}

/// A financial metric with a time series and a calculation strategy
///
/// Parent/child links are kept in the skeleton's adjacency map; a node only
/// records its own parent id. Attach/detach on the skeleton maintains both
/// sides together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier, unique within a skeleton, e.g. "revenue", "auto_price"
    pub id: String,
    /// Display name, e.g. "Total Revenue"
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// How this node's projected value is computed
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub strategy_params: BTreeMap<String, f64>,

    /// Set when attached under a skeleton parent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_id: Option<String>,
    /// Cross-references, e.g. a cost node reading revenue's volume driver
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub subscribes_to: Vec<String>,

    /// Year -> value time series
    pub values: BTreeMap<i32, f64>,

    /// "%", "$M", "units"
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub unit: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

impl Node {
    /// Create a skeleton node with the default growth strategy
    pub fn skeleton(id: &str, name: &str) -> Self {
        Self::new(id, name, NodeType::Skeleton, ACTOR_SYSTEM)
    }

    /// Create a detached driver node
    pub fn driver(id: &str, name: &str, unit: &str, actor: &str) -> Self {
        let mut node = Self::new(id, name, NodeType::Driver, actor);
        node.unit = unit.to_string();
        node
    }

    fn new(id: &str, name: &str, node_type: NodeType, actor: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            node_type,
            strategy: Strategy::default(),
            strategy_params: BTreeMap::new(),
            parent_id: None,
            subscribes_to: Vec::new(),
            values: BTreeMap::new(),
            unit: String::new(),
            updated_at: Utc::now(),
            updated_by: actor.to_string(),
        }
    }

    /// Record a value for a year and stamp the actor
    pub fn set_value(&mut self, year: i32, value: f64, actor: &str) {
        self.values.insert(year, value);
        self.touch(actor);
    }

    /// Update the audit fields
    pub fn touch(&mut self, actor: &str) {
        self.updated_at = Utc::now();
        self.updated_by = actor.to_string();
    }
}
