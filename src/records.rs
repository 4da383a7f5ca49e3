// src/records.rs
//
// Character record model shared by both wiki sources.
//
// A record is a flat attribute map; a record set keys records by the
// canonical identity string (the character's Chinese name). Attribute sets
// differ per source and partial records are expected: a character present on
// only one wiki simply carries that wiki's attributes.

use std::collections::BTreeMap;

use crate::error::{ScrapeError, structural};

pub type AttrMap = BTreeMap<String, String>;
pub type RecordSet = BTreeMap<String, AttrMap>;

// Attribute names as they appear in the produced JSON.
pub const NAME_CN: &str = "nameCn";
pub const TITLE_CN: &str = "titleCn";
pub const VISION_CN: &str = "visionCn";
pub const BILIGAME_URL: &str = "biligameUrl";
pub const NAME_EN: &str = "nameEn";
pub const TITLE_EN: &str = "titleEn";
pub const FANDOM_URL: &str = "fandomUrl";
pub const RELEASE_DATE: &str = "releaseDate";

/// A source of per-character records, keyed by the canonical identity space.
///
/// This is the seam between the reconciler and the page-specific specs: all
/// network round trips happen behind it, and the contract only requires a
/// complete set per call.
pub trait RecordProvider {
    fn records(&self) -> Result<RecordSet, ScrapeError>;
}

/// Bidirectional English-name ↔ Chinese-name lookup.
///
/// The two wikis name characters in different identity spaces. Translation
/// between them is its own small step, built from the EN character pages and
/// kept outside the generic merge so the merge stays identity-space-agnostic.
#[derive(Debug, Default)]
pub struct IdentityMap {
    en_to_cn: BTreeMap<String, String>,
    cn_to_en: BTreeMap<String, String>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name_en: impl Into<String>, name_cn: impl Into<String>) {
        let (en, cn) = (name_en.into(), name_cn.into());
        self.cn_to_en.insert(cn.clone(), en.clone());
        self.en_to_cn.insert(en, cn);
    }

    pub fn cn(&self, name_en: &str) -> Option<&str> {
        self.en_to_cn.get(name_en).map(String::as_str)
    }

    pub fn en(&self, name_cn: &str) -> Option<&str> {
        self.cn_to_en.get(name_cn).map(String::as_str)
    }

    /// Re-key an EN-keyed record set into the CN identity space.
    /// A key with no translation is fatal: it means a character page changed
    /// under us between the listing pass and the page pass.
    pub fn rekey_to_cn(&self, records: RecordSet) -> Result<RecordSet, ScrapeError> {
        let mut out = RecordSet::new();
        for (name_en, attrs) in records {
            let name_cn = self
                .cn(&name_en)
                .ok_or_else(|| structural("identity map", format!("no Chinese name for {name_en:?}")))?;
            out.insert(s!(name_cn), attrs);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_map_is_bidirectional() {
        let mut ids = IdentityMap::new();
        ids.insert("Amber", "安柏");
        assert_eq!(ids.cn("Amber"), Some("安柏"));
        assert_eq!(ids.en("安柏"), Some("Amber"));
        assert_eq!(ids.cn("Hu Tao"), None);
    }

    #[test]
    fn rekey_moves_records_into_cn_space() {
        let mut ids = IdentityMap::new();
        ids.insert("Amber", "安柏");

        let mut records = RecordSet::new();
        records.insert(s!("Amber"), attrs! { NAME_EN => "Amber" });

        let rekeyed = ids.rekey_to_cn(records).unwrap();
        assert_eq!(rekeyed.keys().collect::<Vec<_>>(), ["安柏"]);
        assert_eq!(rekeyed["安柏"][NAME_EN], "Amber");
    }

    #[test]
    fn rekey_without_translation_is_fatal() {
        let ids = IdentityMap::new();
        let mut records = RecordSet::new();
        records.insert(s!("Amber"), AttrMap::new());
        assert!(matches!(
            ids.rekey_to_cn(records),
            Err(ScrapeError::StructuralMismatch { .. })
        ));
    }
}
