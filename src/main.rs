//! Projection System CLI
//!
//! Demo run: seeds a sample company and prints a five-year forecast

use projection_system::{
    BalanceSheet, IncomeStatement, ProjectionAssumptions, ProjectionEngine, Segment,
    StandardSkeleton,
};
use projection_system::statements::HistoricalFinancials;
use projection_system::ScenarioRunner;

fn main() {
    env_logger::init();

    println!("Projection System v0.1.0");
    println!("========================\n");

    // Sample company: two segments, modest leverage
    let mut income_statement = IncomeStatement::default();
    income_statement.gross_profit_section.revenues = 1200.0;
    income_statement.gross_profit_section.cost_of_goods_sold = -720.0;
    income_statement.net_income_section.weighted_average_shares = 250.0;

    let mut balance_sheet = BalanceSheet::default();
    balance_sheet.current_assets.cash_and_equivalents = 150.0;
    balance_sheet.current_assets.accounts_receivable = 120.0;
    balance_sheet.current_assets.inventories = 80.0;
    balance_sheet.noncurrent_assets.ppe_at_cost = 900.0;
    balance_sheet.noncurrent_assets.accumulated_depreciation = -300.0;
    balance_sheet.noncurrent_assets.ppe_net = 600.0;
    balance_sheet.current_liabilities.accounts_payable = 70.0;
    balance_sheet.noncurrent_liabilities.long_term_debt = 350.0;
    balance_sheet.equity.common_stock_apic = 200.0;
    balance_sheet.equity.retained_earnings = 330.0;

    let segments = vec![
        Segment {
            name: "Products".to_string(),
            segment_type: "operating".to_string(),
            revenues: 900.0,
            operating_income: 180.0,
        },
        Segment {
            name: "Services".to_string(),
            segment_type: "operating".to_string(),
            revenues: 300.0,
            operating_income: 45.0,
        },
    ];

    let history = HistoricalFinancials {
        income_statement,
        balance_sheet,
        segments,
    };

    let mut assumptions = ProjectionAssumptions::baseline();
    assumptions.cogs_percent = 0.60;
    assumptions.sga_percent = 0.15;
    assumptions.dso = 36.0;
    assumptions.dsi = 40.0;
    assumptions.dpo = 35.0;
    assumptions.capex_percent = 0.06;
    assumptions.useful_life_forecast = 10.0;
    assumptions.debt_interest_rate = 0.05;
    assumptions.dividend_payout_ratio = 0.30;
    assumptions.shares_outstanding = 250.0;
    assumptions
        .segment_growth
        .insert("Products".to_string(), 0.04);
    assumptions
        .segment_growth
        .insert("Services".to_string(), 0.12);

    let schedule: Vec<_> = (2026..2031)
        .map(|year| (year, assumptions.clone()))
        .collect();

    let runner = ScenarioRunner::new();
    let forecast = runner.run(&history, &schedule);

    println!("Five-Year Forecast:");
    println!(
        "{:>6} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Year", "Revenue", "NetIncome", "Cash", "Revolver", "TotalAssets", "FCF"
    );
    println!("{}", "-".repeat(84));

    for projected in &forecast {
        let is = &projected.income_statement;
        let bs = &projected.balance_sheet;
        let cf = &projected.cash_flow;
        println!(
            "{:>6} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>12.1}",
            projected.year,
            is.gross_profit_section.revenues,
            is.net_income_section.net_income_to_common,
            bs.current_assets.cash_and_equivalents,
            bs.current_liabilities.short_term_debt,
            bs.total_assets,
            cf.cash_summary.net_cash_operating + cf.cash_summary.net_cash_investing,
        );
    }

    let last = forecast.last().expect("non-empty forecast");
    let bs = &last.balance_sheet;
    println!("\nTerminal Year Balance Check:");
    println!("  Total Assets:      {:>12.2}", bs.total_assets);
    println!("  Total Liabilities: {:>12.2}", bs.total_liabilities);
    println!("  Total Equity:      {:>12.2}", bs.total_equity);
    println!(
        "  Gap:               {:>12.6}",
        bs.total_assets - (bs.total_liabilities + bs.total_equity)
    );

    // Per-segment detail for the terminal year
    if !last.segments.is_empty() {
        println!("\nSegment Revenue ({}):", last.year);
        for segment in &last.segments {
            println!("  {:<12} {:>12.1}", segment.name, segment.revenues);
        }
    }

    // Show the skeleton is available for driver-level modeling
    let skeleton = StandardSkeleton::new();
    let engine = ProjectionEngine::new(skeleton);
    println!(
        "\nModel skeleton: {} canonical nodes",
        engine.skeleton().all_nodes().count()
    );
}
