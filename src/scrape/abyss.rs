// src/scrape/abyss.rs
//
// Period catalog assembly for the abyss schedule.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScrapeError;
use crate::schedule::{self, PeriodCatalog};
use crate::specs::abyss::AbyssPage;

/// One configured period: the human-readable label the catalog is keyed by,
/// and the anchor id of its section on the schedule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodConfig {
    pub period: String,
    pub period_key: String,
}

// Periods tracked by default, newest last. Override with --periods.
const DEFAULT_PERIODS: &str = include_str!("periods.json");

/// Load the period list from a config file, or the built-in default.
pub fn load_periods(path: Option<&Path>) -> Result<Vec<PeriodConfig>, ScrapeError> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => s!(DEFAULT_PERIODS),
    };
    Ok(serde_json::from_str(&text)?)
}

/// Decode every configured period against one already-fetched page.
/// Catalog order follows configuration order, and every configured label is
/// present: a period that fails to decode fails the whole build.
pub fn build_catalog(
    page: &AbyssPage,
    periods: &[PeriodConfig],
) -> Result<PeriodCatalog, ScrapeError> {
    let mut catalog = PeriodCatalog::default();
    for config in periods {
        info!(period = %config.period, "decoding period");
        let rows = page.period_rows(&config.period_key)?;
        catalog.push(config.period.clone(), schedule::decode(&rows)?);
    }
    Ok(catalog)
}

/// Full pipeline: one page fetch shared by all configured periods.
pub fn collect_abyss(periods: &[PeriodConfig]) -> Result<PeriodCatalog, ScrapeError> {
    let page = AbyssPage::fetch()?;
    build_catalog(&page, periods)
}
