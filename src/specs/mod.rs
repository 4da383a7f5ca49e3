// src/specs/mod.rs
//! # Page-reading specs
//!
//! Each spec encodes *where the ground truth lives* in one wiki page family
//! and *how to extract it*: selector choice, row-header markers, and light
//! shaping into record sets or row sequences.
//!
//! ## Conventions
//! - Parse functions take an already-parsed document, so every spec is
//!   testable offline against captured HTML fixtures.
//! - Network round trips live only in each spec's provider/page type
//!   (`CnWiki`, `EnWiki`, `AbyssPage`), via `core::net`.
//! - Wanted-signal filtering is silent (e.g. links whose title and text
//!   disagree); a missing structural element is fatal. The first is signal
//!   extraction, the second a layout-change alarm.
//!
//! ## What does not live here
//! - Cross-source merging and release ordering (`scrape::characters`).
//! - Positional schedule decoding (`schedule`).
//! - Artifact serialization (`json`).

pub mod abyss;
pub mod characters_cn;
pub mod characters_en;
pub mod resistance;
