// src/scrape/characters.rs
//
// Cross-wiki character reconciliation.
//
// Both wikis are partial views of the same roster: the CN wiki owns names,
// titles and visions in Chinese plus page URLs; the EN wiki owns the English
// title, the release date and its own page URLs. Each source yields a record
// set keyed by the Chinese name (the EN source re-keys itself), so combining
// them is a single union-merge followed by release ordering.

use tracing::info;

use crate::core::merge::merge_by_key;
use crate::error::ScrapeError;
use crate::records::{AttrMap, RecordProvider, RecordSet};
use crate::release::{self, MonthTable};
use crate::specs::characters_cn::CnWiki;
use crate::specs::characters_en::EnWiki;

/// Merge two providers' record sets into one unified set.
/// Pure combination over already-produced sets; no fetch I/O of its own.
pub fn reconcile(
    first: &dyn RecordProvider,
    second: &dyn RecordProvider,
) -> Result<RecordSet, ScrapeError> {
    Ok(merge_by_key(&first.records()?, &second.records()?))
}

/// The unified set's records, ordered by release date then Chinese name.
pub fn ordered(unified: RecordSet, months: &MonthTable) -> Result<Vec<AttrMap>, ScrapeError> {
    release::order_by_release(unified.into_values(), months)
}

/// Full pipeline: both wikis, reconciled and ordered.
pub fn collect_characters() -> Result<Vec<AttrMap>, ScrapeError> {
    let unified = reconcile(&CnWiki, &EnWiki)?;
    info!(characters = unified.len(), "reconciled character records");
    ordered(unified, &MonthTable::english())
}
