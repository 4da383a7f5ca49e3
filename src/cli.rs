// src/cli.rs

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::error::ScrapeError;
use crate::{json, scrape, specs};

#[derive(Debug, Parser)]
#[command(name = "gw_scrape", version, about = "Genshin Impact wiki scraper")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconciled character records from both wikis, ordered by release date
    Characters {
        /// Write the JSON artifact here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Spiral Abyss schedule catalog for the configured periods
    Abyss {
        /// Period config file (JSON array of {period, periodKey})
        #[arg(long, value_name = "FILE")]
        periods: Option<PathBuf>,
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Base elemental resistances of one enemy page
    Resistance {
        /// Biligame enemy page URL, e.g. https://wiki.biligame.com/ys/大型水史莱姆
        url: String,
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<(), ScrapeError> {
    match cli.command {
        Command::Characters { out } => write_artifact(&scrape::collect_characters()?, out),
        Command::Abyss { periods, out } => {
            let periods = scrape::abyss::load_periods(periods.as_deref())?;
            write_artifact(&scrape::collect_abyss(&periods)?, out)
        }
        Command::Resistance { url, out } => {
            write_artifact(&specs::resistance::fetch_base_resistance(&url)?, out)
        }
    }
}

fn write_artifact<T: Serialize>(value: &T, out: Option<PathBuf>) -> Result<(), ScrapeError> {
    let text = json::to_pretty(value)?;
    match out {
        Some(path) => {
            fs::write(&path, &text)?;
            info!(path = %path.display(), bytes = text.len(), "artifact written");
        }
        None => println!("{text}"),
    }
    Ok(())
}
