// src/error.rs

use std::io;

use thiserror::Error;

/// Error type for the whole extraction pipeline.
///
/// Structural and date errors are fatal by design: both mean the source page
/// layout changed, and any recovery attempt risks silently wrong data.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page structure mismatch in {what}: {details}")]
    StructuralMismatch { what: &'static str, details: String },
    #[error("unparseable release date: {0}")]
    DateParse(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub(crate) fn structural(what: &'static str, details: impl Into<String>) -> ScrapeError {
    ScrapeError::StructuralMismatch { what, details: details.into() }
}
