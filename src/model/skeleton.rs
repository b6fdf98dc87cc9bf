//! The fixed statement skeleton
//!
//! Every canonical line item of the model exists here from construction, so
//! no financial category can be orphaned by a bad driver decision. Collaborators
//! use `is_skeleton_id` to refuse deletion of structurally required nodes.

use std::collections::BTreeMap;

use super::error::ModelError;
use super::node::{Node, NodeType};
use super::strategy::CalcContext;

/// (id, display name) for every fixed node, in statement order
const SKELETON_NODES: &[(&str, &str)] = &[
    // Income statement
    ("revenue", "Total Revenue"),
    ("cogs", "Cost of Goods Sold"),
    ("gross_profit", "Gross Profit"),
    ("sga", "SG&A Expenses"),
    ("selling_marketing", "Selling & Marketing"),
    ("general_admin", "General & Admin"),
    ("rd", "R&D Expenses"),
    ("other_operating", "Other Operating Expenses"),
    ("operating_income", "Operating Income"),
    ("interest_expense", "Interest Expense"),
    ("other_non_op", "Other Non-Operating Inc/Exp"),
    ("income_before_tax", "Income Before Tax"),
    ("tax_expense", "Tax Expense"),
    ("minority_interest_expense", "Minority Interest Expense"),
    ("net_income", "Net Income"),
    ("depreciation", "Depreciation Expense"),
    // Balance sheet - assets
    ("cash", "Cash & Equivalents"),
    ("short_term_investments", "Short Term Investments"),
    ("accounts_receivable", "Accounts Receivable"),
    ("inventory", "Inventory"),
    ("other_current_assets", "Other Current Assets"),
    ("total_current_assets", "Total Current Assets"),
    ("ppe_at_cost", "PPE At Cost"),
    ("accumulated_depreciation", "Accumulated Depreciation"),
    ("ppe_net", "Net PPE"),
    ("goodwill", "Goodwill"),
    ("intangibles", "Intangible Assets"),
    ("long_term_investments", "Long Term Investments"),
    ("deferred_tax_assets", "Deferred Tax Assets"),
    ("other_non_current_assets", "Other Non-Current Assets"),
    ("total_non_current_assets", "Total Non-Current Assets"),
    ("total_assets", "Total Assets"),
    // Balance sheet - liabilities
    ("accounts_payable", "Accounts Payable"),
    ("accrued_liabilities", "Accrued Liabilities"),
    ("short_term_debt", "Short Term Debt"),
    ("other_current_liabilities", "Other Current Liabilities"),
    ("total_current_liabilities", "Total Current Liabilities"),
    ("long_term_debt", "Long Term Debt"),
    ("deferred_tax_liabilities", "Deferred Tax Liabilities"),
    ("other_non_current_liabilities", "Other Non-Current Liabilities"),
    ("total_non_current_liabilities", "Total Non-Current Liabilities"),
    ("total_liabilities", "Total Liabilities"),
    // Balance sheet - equity
    ("common_stock", "Common Stock & APIC"),
    ("preferred_stock", "Preferred Stock"),
    ("retained_earnings", "Retained Earnings"),
    ("treasury_stock", "Treasury Stock"),
    ("aoci", "Accum Other Comp Income"),
    ("minority_interest", "Minority Interest"),
    ("total_equity", "Total Equity"),
    // Working capital drivers
    ("dso", "Days Sales Outstanding"),
    ("dsi", "Days Sales Inventory"),
    ("dpo", "Days Payable Outstanding"),
    // CapEx
    ("capex", "Capital Expenditures"),
];

/// Arena of nodes addressed by id, with an explicit parent -> children map
///
/// Skeleton nodes are inserted once at construction and stay for the life of
/// the run. Driver nodes enter and leave only through `attach_driver` /
/// `detach_driver`, which keep the adjacency map and the drivers' parent
/// links consistent.
#[derive(Debug, Clone)]
pub struct StandardSkeleton {
    nodes: BTreeMap<String, Node>,
    children: BTreeMap<String, Vec<String>>,
}

impl StandardSkeleton {
    /// Build the full fixed node set, each with the default growth strategy
    pub fn new() -> Self {
        let nodes = SKELETON_NODES
            .iter()
            .map(|(id, name)| (id.to_string(), Node::skeleton(id, name)))
            .collect();
        Self {
            nodes,
            children: BTreeMap::new(),
        }
    }

    /// The reserved skeleton ids; driver nodes may not use these
    pub fn skeleton_ids() -> impl Iterator<Item = &'static str> {
        SKELETON_NODES.iter().map(|(id, _)| *id)
    }

    /// Membership test against the fixed id set
    pub fn is_skeleton_id(id: &str) -> bool {
        SKELETON_NODES.iter().any(|(s, _)| *s == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Ids of drivers currently attached under a parent
    pub fn drivers_of(&self, parent_id: &str) -> &[String] {
        self.children.get(parent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node in the arena, skeleton and driver alike
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Attach a driver node under a skeleton parent
    ///
    /// Fails unless the parent exists and is skeleton-typed, the incoming node
    /// is driver-typed, and its id is not already in use.
    pub fn attach_driver(&mut self, parent_id: &str, mut driver: Node) -> Result<(), ModelError> {
        let parent = self
            .nodes
            .get(parent_id)
            .ok_or_else(|| ModelError::UnknownNode(parent_id.to_string()))?;
        if parent.node_type != NodeType::Skeleton {
            return Err(ModelError::NotSkeleton(parent_id.to_string()));
        }
        if driver.node_type != NodeType::Driver {
            return Err(ModelError::NotDriver(driver.id));
        }
        if self.nodes.contains_key(&driver.id) {
            return Err(ModelError::DuplicateDriver(driver.id));
        }

        driver.parent_id = Some(parent_id.to_string());
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(driver.id.clone());
        self.nodes.insert(driver.id.clone(), driver);
        Ok(())
    }

    /// Detach a driver from its parent and remove it from the arena
    pub fn detach_driver(&mut self, parent_id: &str, driver_id: &str) -> Result<Node, ModelError> {
        let attached = self
            .children
            .get(parent_id)
            .map(|ids| ids.iter().any(|id| id == driver_id))
            .unwrap_or(false);
        if !attached {
            return Err(ModelError::DriverNotAttached {
                parent: parent_id.to_string(),
                driver: driver_id.to_string(),
            });
        }

        if let Some(ids) = self.children.get_mut(parent_id) {
            ids.retain(|id| id != driver_id);
        }
        let mut driver = self
            .nodes
            .remove(driver_id)
            .ok_or_else(|| ModelError::UnknownNode(driver_id.to_string()))?;
        driver.parent_id = None;
        Ok(driver)
    }

    /// Gather attached drivers' values for a year into a strategy context map
    pub fn driver_context(&self, parent_id: &str, year: i32) -> BTreeMap<String, f64> {
        self.drivers_of(parent_id)
            .iter()
            .filter_map(|id| {
                self.nodes
                    .get(id)
                    .and_then(|n| n.values.get(&year).map(|v| (id.clone(), *v)))
            })
            .collect()
    }

    /// Run a node's strategy against a calculation context
    pub fn evaluate(&self, node_id: &str, ctx: &CalcContext) -> Result<f64, ModelError> {
        let node = self
            .nodes
            .get(node_id)
            .ok_or_else(|| ModelError::UnknownNode(node_id.to_string()))?;
        node.strategy.calculate(ctx)
    }
}

impl Default for StandardSkeleton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::ACTOR_AI;
    use crate::model::strategy::Strategy;

    #[test]
    fn test_skeleton_is_stable() {
        let a: Vec<_> = StandardSkeleton::new().all_nodes().map(|n| n.id.clone()).collect();
        let b: Vec<_> = StandardSkeleton::new().all_nodes().map(|n| n.id.clone()).collect();
        assert_eq!(a, b);

        // Membership test agrees with the node map keys
        for id in &a {
            assert!(StandardSkeleton::is_skeleton_id(id), "missing id: {id}");
        }
        assert_eq!(a.len(), StandardSkeleton::skeleton_ids().count());
    }

    #[test]
    fn test_skeleton_defaults() {
        let skeleton = StandardSkeleton::new();
        let revenue = skeleton.node("revenue").unwrap();
        assert_eq!(revenue.node_type, NodeType::Skeleton);
        assert_eq!(revenue.strategy.name(), "GrowthRate");
        assert_eq!(revenue.updated_by, "SYSTEM");

        assert!(StandardSkeleton::is_skeleton_id("cogs"));
        assert!(!StandardSkeleton::is_skeleton_id("auto_price"));
    }

    #[test]
    fn test_attach_driver() {
        let mut skeleton = StandardSkeleton::new();
        let driver = Node::driver("auto_volume", "Units Sold", "units", ACTOR_AI);

        skeleton.attach_driver("revenue", driver).unwrap();

        assert_eq!(skeleton.drivers_of("revenue"), ["auto_volume"]);
        let attached = skeleton.node("auto_volume").unwrap();
        assert_eq!(attached.parent_id.as_deref(), Some("revenue"));
    }

    #[test]
    fn test_attach_driver_rejects_duplicates() {
        let mut skeleton = StandardSkeleton::new();
        let driver = Node::driver("auto_volume", "Units Sold", "units", ACTOR_AI);
        skeleton.attach_driver("revenue", driver.clone()).unwrap();

        let err = skeleton.attach_driver("revenue", driver).unwrap_err();
        assert_eq!(err, ModelError::DuplicateDriver("auto_volume".to_string()));
    }

    #[test]
    fn test_attach_driver_type_checks() {
        let mut skeleton = StandardSkeleton::new();

        // Driver may not serve as a parent
        let volume = Node::driver("auto_volume", "Units Sold", "units", ACTOR_AI);
        skeleton.attach_driver("revenue", volume).unwrap();
        let price = Node::driver("auto_price", "Average Selling Price", "$", ACTOR_AI);
        let err = skeleton.attach_driver("auto_volume", price).unwrap_err();
        assert_eq!(err, ModelError::NotSkeleton("auto_volume".to_string()));

        // Skeleton-typed node may not be attached as a driver
        let fake = Node::skeleton("shadow_revenue", "Shadow Revenue");
        let err = skeleton.attach_driver("cogs", fake).unwrap_err();
        assert_eq!(err, ModelError::NotDriver("shadow_revenue".to_string()));
    }

    #[test]
    fn test_detach_driver() {
        let mut skeleton = StandardSkeleton::new();
        let driver = Node::driver("auto_price", "Average Selling Price", "$", ACTOR_AI);
        skeleton.attach_driver("revenue", driver).unwrap();

        let detached = skeleton.detach_driver("revenue", "auto_price").unwrap();
        assert_eq!(detached.parent_id, None);
        assert!(skeleton.drivers_of("revenue").is_empty());
        assert!(skeleton.node("auto_price").is_none());

        let err = skeleton.detach_driver("revenue", "auto_price").unwrap_err();
        assert!(matches!(err, ModelError::DriverNotAttached { .. }));
    }

    #[test]
    fn test_driver_context_and_evaluate() {
        let mut skeleton = StandardSkeleton::new();
        let mut price = Node::driver("price", "Average Selling Price", "$", ACTOR_AI);
        price.set_value(2025, 50.0, ACTOR_AI);
        let mut volume = Node::driver("volume", "Units Sold", "units", ACTOR_AI);
        volume.set_value(2025, 1000.0, ACTOR_AI);

        skeleton.attach_driver("revenue", price).unwrap();
        skeleton.attach_driver("revenue", volume).unwrap();
        skeleton.node_mut("revenue").unwrap().strategy = Strategy::PriceVolume;

        let ctx = CalcContext {
            year: 2025,
            drivers: skeleton.driver_context("revenue", 2025),
            ..Default::default()
        };
        assert_eq!(skeleton.evaluate("revenue", &ctx).unwrap(), 50_000.0);
    }
}
