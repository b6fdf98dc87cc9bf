//! JSON-based statement loader
//!
//! Historical statements arrive from the extraction layer as JSON; projected
//! statements are written back out the same way.

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::data::{BalanceSheet, IncomeStatement, Segment};
use crate::projection::ProjectedFinancials;

/// One company's prior-year statements as supplied by the extraction layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalFinancials {
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<Segment>,
}

/// Load prior-year statements from a JSON file
pub fn load_historical(path: &Path) -> Result<HistoricalFinancials, Box<dyn Error>> {
    let file = File::open(path)?;
    let history = serde_json::from_reader(BufReader::new(file))?;
    Ok(history)
}

/// Write a projected forecast to a JSON file
pub fn write_forecast(path: &Path, forecast: &[ProjectedFinancials]) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), forecast)?;
    Ok(())
}
