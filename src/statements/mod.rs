//! Financial statement data shapes, section totals, and JSON I/O
//!
//! Sign convention follows the source statements: expenses and contra-asset
//! lines (COGS, SG&A, accumulated depreciation, capex, treasury stock) are
//! carried as negative values. Missing historical fields deserialize to 0.0.

mod data;
mod totals;
pub mod loader;

pub use data::{
    BalanceSheet, CashFlowStatement, CashSummarySection, CurrentAssets, CurrentLiabilities,
    Equity, FinancingSection, GrossProfitSection, IncomeStatement, InvestingSection, LineItem,
    NetIncomeSection, NonOperatingSection, NoncurrentAssets, NoncurrentLiabilities,
    OperatingCostSection, OperatingSection, Segment, TaxSection,
};
pub use loader::HistoricalFinancials;
pub use totals::compute_balance_sheet_totals;
