//! Forward-looking assumption sets driving each projected year

pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Statement section a dynamic line-item driver lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementSection {
    GrossProfit,
    OperatingCost,
    NonOperating,
    Tax,
    CurrentAssets,
    NoncurrentAssets,
    CurrentLiabilities,
    NoncurrentLiabilities,
    Equity,
}

/// An ad hoc percent-of-revenue line item, addressed by section and label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemDriver {
    pub section: StatementSection,
    pub label: String,
    pub percent: f64,
}

/// All drivers for a single projected year
///
/// Rates and percents are decimals (0.05 = 5%). Zero means "not supplied";
/// the engine falls through to the next resolution step or a rollforward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionAssumptions {
    pub revenue_growth: f64,
    /// % of revenue
    pub cogs_percent: f64,

    // SG&A breakdown; granular percents take priority over the aggregate
    pub selling_marketing_percent: f64,
    pub general_admin_percent: f64,
    pub sga_percent: f64,

    pub rd_percent: f64,
    /// % of pre-tax income
    pub tax_rate: f64,

    // Working capital day counts
    pub dso: f64,
    pub dsi: f64,
    pub dpo: f64,

    /// % of revenue
    pub capex_percent: f64,

    // Depreciation: useful life takes priority, then percent of gross PPE,
    // then the engine's revenue-based fallback
    pub useful_life_forecast: f64,
    pub depreciation_percent: f64,

    /// Carried through for downstream terminal value models
    pub terminal_growth: f64,

    // WACC components, consumed downstream; pre-tax cost of debt doubles as
    // the interest rate fallback
    pub unlevered_beta: f64,
    pub risk_free_rate: f64,
    pub market_risk_premium: f64,
    pub pre_tax_cost_of_debt: f64,
    /// D/E ratio
    pub target_debt_equity: f64,

    /// % of revenue, add-back to equity and operating cash flow
    pub stock_based_comp_percent: f64,
    /// % of net income
    pub dividend_payout_ratio: f64,
    /// Rate earned on the prior cash balance
    pub cash_interest_rate: f64,
    /// Rate paid on the prior debt balance
    pub debt_interest_rate: f64,

    // Working capital, percent-of-revenue method (overrides day counts)
    pub receivables_percent: f64,
    pub inventory_percent: f64,
    pub accounts_payable_percent: f64,
    pub deferred_revenue_percent: f64,

    /// Millions; defaults to 100 in the engine when zero
    pub shares_outstanding: f64,

    /// Segment name -> growth rate, for sum-of-the-parts revenue
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub segment_growth: BTreeMap<String, f64>,

    /// Ad hoc percent-of-revenue line items injected into statement sections
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line_item_drivers: Vec<LineItemDriver>,
}

impl ProjectionAssumptions {
    /// Safe defaults for a generic company, used when no calibrated set exists
    pub fn baseline() -> Self {
        Self {
            revenue_growth: 0.05,
            cogs_percent: 0.40,
            sga_percent: 0.20,
            selling_marketing_percent: 0.10,
            general_admin_percent: 0.10,
            rd_percent: 0.05,
            tax_rate: 0.21,
            capex_percent: 0.05,
            terminal_growth: 0.02,
            unlevered_beta: 1.0,
            risk_free_rate: 0.04,
            market_risk_premium: 0.05,
            pre_tax_cost_of_debt: 0.05,
            target_debt_equity: 0.5,
            ..Default::default()
        }
    }
}
