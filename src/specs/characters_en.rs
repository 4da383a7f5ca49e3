// src/specs/characters_en.rs
//
// Fandom (EN) character pages.
//
// Only the first article-table on the listing page has the finalized
// per-character layout; later tables list upcoming or variant entries.
// Character pages are infobox-driven: the secondary title, the release
// date, and the Chinese name (which feeds the EN→CN identity map) all sit
// behind stable data attributes.

use scraper::Html;
use tracing::debug;

use crate::core::{dom, merge::merge_by_key, net};
use crate::error::{ScrapeError, structural};
use crate::params::{EN_CHARACTER_LISTING_URL, EN_WIKI_BASE};
use crate::records::{self, AttrMap, IdentityMap, RecordProvider, RecordSet};

/// EN-wiki record source: one listing fetch plus one fetch per character.
/// Returned records are re-keyed into the CN identity space.
pub struct EnWiki;

impl RecordProvider for EnWiki {
    fn records(&self) -> Result<RecordSet, ScrapeError> {
        let listing = dom::parse(&net::http_get(EN_CHARACTER_LISTING_URL)?);
        let urls = character_page_urls(&listing)?;
        let names = character_names(&urls);

        let mut metadata = RecordSet::new();
        let mut identities = IdentityMap::new();
        for (name, attrs) in &urls {
            let Some(url) = attrs.get(records::FANDOM_URL) else { continue };
            debug!(character = %name, %url, "fetching EN character page");
            let page = dom::parse(&net::http_get(url)?);

            let mut meta = AttrMap::new();
            meta.insert(s!(records::TITLE_EN), character_title(&page)?);
            if let Some(date) = release_date(&page) {
                meta.insert(s!(records::RELEASE_DATE), date);
            }
            metadata.insert(name.clone(), meta);
            identities.insert(name.clone(), chinese_name(&page)?);
        }

        let merged = merge_by_key(&merge_by_key(&names, &metadata), &urls);
        identities.rekey_to_cn(merged)
    }
}

/// English name → `{fandomUrl}` from the first listing table.
pub fn character_page_urls(listing: &Html) -> Result<RecordSet, ScrapeError> {
    let table = listing
        .select(&dom::selector("table.article-table.sortable.alternating-colors-table"))
        .next()
        .ok_or_else(|| structural("EN character listing", s!("no article-table found")))?;

    let tr = dom::selector("tr");
    let td = dom::selector("td");
    let a = dom::selector("a");

    let mut urls = RecordSet::new();
    for row in table.select(&tr).skip(1) {
        let cells: Vec<_> = row.select(&td).collect();
        let Some(name_cell) = cells.get(1) else { continue };
        let name = dom::text_of(*name_cell);
        if name.is_empty() {
            continue;
        }
        // rows without a link are placeholders for unannounced characters
        let Some(href) = name_cell.select(&a).next().and_then(|l| l.value().attr("href"))
        else {
            continue;
        };
        let mut attrs = AttrMap::new();
        attrs.insert(s!(records::FANDOM_URL), format!("{EN_WIKI_BASE}{href}"));
        urls.insert(name, attrs);
    }
    Ok(urls)
}

/// English name → `{nameEn}` for every listed character.
pub fn character_names(urls: &RecordSet) -> RecordSet {
    urls.keys()
        .map(|name| (name.clone(), attrs! { records::NAME_EN => name.as_str() }))
        .collect()
}

/// The character's secondary title, e.g. "Gliding Champion".
pub fn character_title(page: &Html) -> Result<String, ScrapeError> {
    page.select(&dom::selector(r#"h2[data-item-name="secondary_title"]"#))
        .next()
        .map(dom::text_of)
        .ok_or_else(|| structural("EN character page", s!("no secondary title header")))
}

/// The release date line, e.g. "September 28, 2020".
///
/// Absent for announced-but-unreleased characters; that is a partial record,
/// not an error, so the attribute is simply omitted.
pub fn release_date(page: &Html) -> Option<String> {
    page.select(&dom::selector(r#"div[data-source="releaseDate"] > div"#))
        .next()
        .and_then(dom::first_text_line)
}

/// The Chinese name shown in the infobox, used to translate identity spaces.
pub fn chinese_name(page: &Html) -> Result<String, ScrapeError> {
    page.select(&dom::selector(r#"span[lang="zh-Hans"]"#))
        .next()
        .map(dom::text_of)
        .ok_or_else(|| structural("EN character page", s!("no zh-Hans name span")))
}
