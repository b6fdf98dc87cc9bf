//! CSV-based assumption schedule loader
//!
//! One row per projection year, header-named scalar columns. Unknown columns
//! are ignored so a schedule can carry extra analyst notes. Segment growth and
//! line-item drivers do not fit a flat CSV row and are set in code or JSON.

use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::ProjectionAssumptions;

/// Load a per-year assumption schedule, sorted by year
pub fn load_schedule(path: &Path) -> Result<Vec<(i32, ProjectionAssumptions)>, Box<dyn Error>> {
    let file = File::open(path)?;
    read_schedule(file)
}

/// Parse a schedule from any reader (exposed for in-memory use)
pub fn read_schedule<R: Read>(reader: R) -> Result<Vec<(i32, ProjectionAssumptions)>, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut schedule = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let mut year: Option<i32> = None;
        let mut ass = ProjectionAssumptions::default();

        for (header, field) in headers.iter().zip(record.iter()) {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            if header == "year" {
                year = Some(field.parse()?);
                continue;
            }
            let value: f64 = field.parse()?;
            match header {
                "revenue_growth" => ass.revenue_growth = value,
                "cogs_percent" => ass.cogs_percent = value,
                "selling_marketing_percent" => ass.selling_marketing_percent = value,
                "general_admin_percent" => ass.general_admin_percent = value,
                "sga_percent" => ass.sga_percent = value,
                "rd_percent" => ass.rd_percent = value,
                "tax_rate" => ass.tax_rate = value,
                "dso" => ass.dso = value,
                "dsi" => ass.dsi = value,
                "dpo" => ass.dpo = value,
                "capex_percent" => ass.capex_percent = value,
                "useful_life_forecast" => ass.useful_life_forecast = value,
                "depreciation_percent" => ass.depreciation_percent = value,
                "terminal_growth" => ass.terminal_growth = value,
                "unlevered_beta" => ass.unlevered_beta = value,
                "risk_free_rate" => ass.risk_free_rate = value,
                "market_risk_premium" => ass.market_risk_premium = value,
                "pre_tax_cost_of_debt" => ass.pre_tax_cost_of_debt = value,
                "target_debt_equity" => ass.target_debt_equity = value,
                "stock_based_comp_percent" => ass.stock_based_comp_percent = value,
                "dividend_payout_ratio" => ass.dividend_payout_ratio = value,
                "cash_interest_rate" => ass.cash_interest_rate = value,
                "debt_interest_rate" => ass.debt_interest_rate = value,
                "receivables_percent" => ass.receivables_percent = value,
                "inventory_percent" => ass.inventory_percent = value,
                "accounts_payable_percent" => ass.accounts_payable_percent = value,
                "deferred_revenue_percent" => ass.deferred_revenue_percent = value,
                "shares_outstanding" => ass.shares_outstanding = value,
                _ => {} // Analyst columns pass through untouched
            }
        }

        let year = year.ok_or("schedule row missing 'year' column")?;
        schedule.push((year, ass));
    }

    schedule.sort_by_key(|(year, _)| *year);
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_schedule() {
        let csv = "\
year,revenue_growth,cogs_percent,tax_rate,analyst_note
2026,0.10,0.60,0.25,7
2025,0.12,0.58,0.25,3
";
        let schedule = read_schedule(csv.as_bytes()).unwrap();
        assert_eq!(schedule.len(), 2);

        // Sorted by year, unknown column ignored
        assert_eq!(schedule[0].0, 2025);
        assert_eq!(schedule[0].1.revenue_growth, 0.12);
        assert_eq!(schedule[1].0, 2026);
        assert_eq!(schedule[1].1.cogs_percent, 0.60);
        // Unset columns stay at the zero default
        assert_eq!(schedule[1].1.dso, 0.0);
    }

    #[test]
    fn test_read_schedule_requires_year() {
        let csv = "revenue_growth\n0.10\n";
        assert!(read_schedule(csv.as_bytes()).is_err());
    }
}
