//! Projection System - Three-statement financial projection engine
//!
//! This library provides:
//! - A fixed statement skeleton of canonical line-item nodes
//! - Pluggable projection strategies (growth, price-volume, unit-cost, margin, sum)
//! - Evidence-driven strategy selection with dynamic driver nodes
//! - Year-by-year articulation of Income Statement, Balance Sheet, and Cash Flow
//!   with a cash / short-term-debt plug so Assets = Liabilities + Equity always holds
//! - Multi-year forecast folding and parallel batch runs across companies

pub mod statements;
pub mod model;
pub mod assumptions;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::ProjectionAssumptions;
pub use model::{ModelError, Node, NodeType, StandardSkeleton, Strategy, StrategySelector};
pub use projection::{ProjectedFinancials, ProjectionEngine};
pub use scenario::{CompanyScenario, ScenarioRunner};
pub use statements::{BalanceSheet, CashFlowStatement, IncomeStatement, Segment};
