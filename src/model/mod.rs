//! Polymorphic node system: fixed skeleton, dynamic drivers
//!
//! Skeleton nodes are the canonical statement line items, created once and
//! never deleted. Driver nodes (price, volume, unit cost, ...) are discovered
//! from a company's disclosures and attached under skeleton parents. Each node
//! carries a pluggable strategy that computes its projected value for a year.

mod error;
mod node;
mod selector;
mod skeleton;
mod strategy;

pub use error::ModelError;
pub use node::{Node, NodeType, ACTOR_AI, ACTOR_SYSTEM, ACTOR_USER};
pub use selector::{DriverDiscovery, StrategyDecision, StrategySelector};
pub use skeleton::StandardSkeleton;
pub use strategy::{CalcContext, Strategy};
