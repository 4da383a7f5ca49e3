// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod core;
pub mod error;
pub mod json;
pub mod params;
pub mod records;
pub mod release;
pub mod schedule;
pub mod scrape;
pub mod specs;
