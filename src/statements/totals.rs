//! Section total aggregation for the balance sheet
//!
//! Downstream consumers read section totals, so this must run after the
//! balance sheet is populated and before the projection is handed out.

use super::data::{BalanceSheet, LineItem};

fn sum_items(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.value).sum()
}

/// Fill `calculated_total` on every section plus the statement-level totals.
///
/// Net PP&E already nets gross against accumulated depreciation, so the
/// non-current asset total uses `ppe_net` and skips the gross/contra lines.
pub fn compute_balance_sheet_totals(bs: &mut BalanceSheet) {
    let ca = &mut bs.current_assets;
    ca.calculated_total = ca.cash_and_equivalents
        + ca.short_term_investments
        + ca.accounts_receivable
        + ca.inventories
        + ca.other_current_assets
        + sum_items(&ca.additional_items);

    let nca = &mut bs.noncurrent_assets;
    nca.calculated_total = nca.ppe_net
        + nca.goodwill
        + nca.intangibles
        + nca.long_term_investments
        + nca.deferred_tax_assets
        + nca.other_noncurrent_assets
        + sum_items(&nca.additional_items);

    let cl = &mut bs.current_liabilities;
    cl.calculated_total = cl.accounts_payable
        + cl.accrued_liabilities
        + cl.short_term_debt
        + cl.deferred_revenue
        + cl.other_current_liabilities
        + sum_items(&cl.additional_items);

    let ncl = &mut bs.noncurrent_liabilities;
    ncl.calculated_total = ncl.long_term_debt
        + ncl.deferred_tax_liabilities
        + ncl.other_noncurrent_liabilities
        + sum_items(&ncl.additional_items);

    let eq = &mut bs.equity;
    eq.calculated_total = eq.preferred_stock
        + eq.common_stock_apic
        + eq.retained_earnings
        + eq.treasury_stock
        + eq.aoci
        + eq.minority_interest
        + sum_items(&eq.additional_items);

    bs.total_assets = bs.current_assets.calculated_total + bs.noncurrent_assets.calculated_total;
    bs.total_liabilities =
        bs.current_liabilities.calculated_total + bs.noncurrent_liabilities.calculated_total;
    bs.total_equity = bs.equity.calculated_total;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_use_net_ppe() {
        let mut bs = BalanceSheet::default();
        bs.noncurrent_assets.ppe_at_cost = 1000.0;
        bs.noncurrent_assets.accumulated_depreciation = -400.0;
        bs.noncurrent_assets.ppe_net = 600.0;
        bs.noncurrent_assets.goodwill = 50.0;

        compute_balance_sheet_totals(&mut bs);

        assert_eq!(bs.noncurrent_assets.calculated_total, 650.0);
        assert_eq!(bs.total_assets, 650.0);
    }

    #[test]
    fn test_totals_include_additional_items() {
        let mut bs = BalanceSheet::default();
        bs.current_assets.cash_and_equivalents = 100.0;
        bs.current_assets.additional_items.push(LineItem {
            label: "Restricted Cash".to_string(),
            value: 25.0,
        });
        bs.equity.common_stock_apic = 100.0;
        bs.equity.additional_items.push(LineItem {
            label: "Warrants".to_string(),
            value: 25.0,
        });

        compute_balance_sheet_totals(&mut bs);

        assert_eq!(bs.current_assets.calculated_total, 125.0);
        assert_eq!(bs.total_equity, 125.0);
    }
}
