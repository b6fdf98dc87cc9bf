//! Statement articulation for projected years

mod engine;

use serde::{Deserialize, Serialize};

use crate::statements::{BalanceSheet, CashFlowStatement, IncomeStatement, Segment};

pub use engine::ProjectionEngine;

/// The articulated statements for one projected year
///
/// Immutable once produced; feeds downstream valuation and serves as the
/// prior-year input for the next `project_year` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedFinancials {
    pub year: i32,
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    pub cash_flow: CashFlowStatement,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub segments: Vec<Segment>,
}
