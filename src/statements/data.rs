//! Statement structures for historical inputs and projected outputs

use serde::{Deserialize, Serialize};

/// A free-form line item appended to a statement section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub value: f64,
}

// =============================================================================
// INCOME STATEMENT
// =============================================================================

/// Revenue through gross profit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrossProfitSection {
    pub revenues: f64,
    /// Negative expense
    pub cost_of_goods_sold: f64,
    pub gross_profit: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
}

/// Operating expenses through operating income
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingCostSection {
    /// Aggregate SG&A (sum of selling/marketing and general/admin when granular)
    pub sga_expenses: f64,
    pub selling_marketing: f64,
    pub general_admin: f64,
    pub rd_expenses: f64,
    pub other_operating: f64,
    pub operating_income: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
}

/// Interest and other non-operating items through pre-tax income
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NonOperatingSection {
    /// Net interest: debt interest expense (negative) plus cash interest income
    pub interest_expense: f64,
    pub other_non_operating: f64,
    pub income_before_tax: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
}

/// Tax expense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSection {
    /// Negative expense
    pub income_tax_expense: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
}

/// Net income attribution and per-share figures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetIncomeSection {
    pub minority_interest_expense: f64,
    pub net_income_to_common: f64,
    pub eps_basic: f64,
    pub eps_diluted: f64,
    pub weighted_average_shares: f64,
}

/// Full income statement in waterfall order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatement {
    pub gross_profit_section: GrossProfitSection,
    pub operating_cost_section: OperatingCostSection,
    pub non_operating_section: NonOperatingSection,
    pub tax_section: TaxSection,
    pub net_income_section: NetIncomeSection,
}

// =============================================================================
// BALANCE SHEET
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentAssets {
    pub cash_and_equivalents: f64,
    pub short_term_investments: f64,
    pub accounts_receivable: f64,
    pub inventories: f64,
    pub other_current_assets: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
    pub calculated_total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoncurrentAssets {
    pub ppe_at_cost: f64,
    /// Stored negative (contra-asset)
    pub accumulated_depreciation: f64,
    pub ppe_net: f64,
    pub goodwill: f64,
    pub intangibles: f64,
    pub long_term_investments: f64,
    pub deferred_tax_assets: f64,
    pub other_noncurrent_assets: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
    pub calculated_total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentLiabilities {
    pub accounts_payable: f64,
    pub accrued_liabilities: f64,
    /// Revolver / current portion; the balancing plug
    pub short_term_debt: f64,
    pub deferred_revenue: f64,
    pub other_current_liabilities: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
    pub calculated_total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoncurrentLiabilities {
    pub long_term_debt: f64,
    pub deferred_tax_liabilities: f64,
    pub other_noncurrent_liabilities: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
    pub calculated_total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Equity {
    pub preferred_stock: f64,
    pub common_stock_apic: f64,
    pub retained_earnings: f64,
    /// Stored negative
    pub treasury_stock: f64,
    pub aoci: f64,
    pub minority_interest: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<LineItem>,
    pub calculated_total: f64,
}

/// Full balance sheet; totals are filled by `compute_balance_sheet_totals`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    pub current_assets: CurrentAssets,
    pub noncurrent_assets: NoncurrentAssets,
    pub current_liabilities: CurrentLiabilities,
    pub noncurrent_liabilities: NoncurrentLiabilities,
    pub equity: Equity,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub total_equity: f64,
}

impl BalanceSheet {
    /// Total debt across current and non-current lines
    pub fn total_debt(&self) -> f64 {
        self.current_liabilities.short_term_debt + self.noncurrent_liabilities.long_term_debt
    }
}

// =============================================================================
// CASH FLOW STATEMENT
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingSection {
    pub net_income: f64,
    pub depreciation_amortization: f64,
    pub stock_based_compensation: f64,
    /// Asset increases consume cash (negative delta)
    pub change_receivables: f64,
    pub change_inventory: f64,
    /// Liability increases release cash (positive delta)
    pub change_payables: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestingSection {
    /// Negative (cash outflow)
    pub capex: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingSection {
    /// Revolver draw from the balancing plug (inflow)
    pub debt_proceeds: f64,
    /// Positive amount paid out
    pub dividends_paid: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CashSummarySection {
    pub net_cash_operating: f64,
    pub net_cash_investing: f64,
    pub net_cash_financing: f64,
    pub net_change_in_cash: f64,
    pub cash_beginning: f64,
    pub cash_ending: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowStatement {
    pub operating_activities: OperatingSection,
    pub investing_activities: InvestingSection,
    pub financing_activities: FinancingSection,
    pub cash_summary: CashSummarySection,
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// A reportable segment for sum-of-the-parts revenue projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
    pub name: String,
    /// Product, Service, Geo, Hybrid
    pub segment_type: String,
    pub revenues: f64,
    pub operating_income: f64,
}
