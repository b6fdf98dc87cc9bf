//! Multi-year forecast runner
//!
//! A forecast is a sequential fold: year T's projected statements are year
//! T+1's prior-year input, so years for one company never run in parallel.
//! Independent companies share no state and are batched with rayon, each with
//! its own engine and skeleton.

use log::debug;
use rayon::prelude::*;

use crate::assumptions::ProjectionAssumptions;
use crate::model::StandardSkeleton;
use crate::projection::{ProjectedFinancials, ProjectionEngine};
use crate::statements::HistoricalFinancials;

/// One company's inputs for a batch run
#[derive(Debug, Clone)]
pub struct CompanyScenario {
    pub name: String,
    pub history: HistoricalFinancials,
    /// (target year, assumptions), applied in order
    pub schedule: Vec<(i32, ProjectionAssumptions)>,
}

/// Runs forecast horizons over one or many companies
#[derive(Debug, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Fold a schedule over one company's history
    pub fn run(
        &self,
        history: &HistoricalFinancials,
        schedule: &[(i32, ProjectionAssumptions)],
    ) -> Vec<ProjectedFinancials> {
        let engine = ProjectionEngine::new(StandardSkeleton::new());
        let mut forecast: Vec<ProjectedFinancials> = Vec::with_capacity(schedule.len());

        for (year, assumptions) in schedule {
            let projected = match forecast.last() {
                Some(prior) => engine.project_year(
                    &prior.income_statement,
                    &prior.balance_sheet,
                    &prior.segments,
                    assumptions,
                    *year,
                ),
                None => engine.project_year(
                    &history.income_statement,
                    &history.balance_sheet,
                    &history.segments,
                    assumptions,
                    *year,
                ),
            };
            forecast.push(projected);
        }

        debug!("forecast complete: {} years", forecast.len());
        forecast
    }

    /// Project independent companies in parallel
    pub fn run_batch(&self, companies: &[CompanyScenario]) -> Vec<Vec<ProjectedFinancials>> {
        companies
            .par_iter()
            .map(|company| self.run(&company.history, &company.schedule))
            .collect()
    }
}
