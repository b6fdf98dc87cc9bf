//! Run a multi-year forecast from historical statements on disk
//!
//! Reads one or more historical statement JSON files and a shared assumption
//! schedule CSV, projects each company in parallel, and writes the forecasts
//! back out as JSON.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use projection_system::assumptions::loader::load_schedule;
use projection_system::statements::loader::{load_historical, write_forecast};
use projection_system::{CompanyScenario, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "run_forecast", about = "Project financial statements forward")]
struct Args {
    /// Historical statement JSON files, one per company
    #[arg(required = true)]
    statements: Vec<PathBuf>,

    /// Assumption schedule CSV (one row per projection year)
    #[arg(short, long)]
    schedule: PathBuf,

    /// Output directory for forecast JSON (defaults to alongside each input)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let schedule = load_schedule(&args.schedule)
        .map_err(|e| anyhow!("reading schedule {}: {e}", args.schedule.display()))?;
    if schedule.is_empty() {
        bail!("schedule {} has no projection years", args.schedule.display());
    }

    let mut companies = Vec::with_capacity(args.statements.len());
    for path in &args.statements {
        let history = load_historical(path)
            .map_err(|e| anyhow!("reading statements {}: {e}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "company".to_string());
        companies.push(CompanyScenario {
            name,
            history,
            schedule: schedule.clone(),
        });
    }

    let runner = ScenarioRunner::new();
    let forecasts = runner.run_batch(&companies);

    for (company, forecast) in companies.iter().zip(&forecasts) {
        let out_path = match &args.out_dir {
            Some(dir) => dir.join(format!("{}_forecast.json", company.name)),
            None => PathBuf::from(format!("{}_forecast.json", company.name)),
        };
        write_forecast(&out_path, forecast)
            .map_err(|e| anyhow!("writing {}: {e}", out_path.display()))?;

        let last = forecast
            .last()
            .ok_or_else(|| anyhow!("empty forecast for {}", company.name))?;
        println!(
            "{}: {} years projected, {} revenue {:.1}, written to {}",
            company.name,
            forecast.len(),
            last.year,
            last.income_statement.gross_profit_section.revenues,
            out_path.display()
        );
    }

    Ok(())
}
