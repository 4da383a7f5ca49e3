// src/specs/characters_cn.rs
//
// Biligame (CN) character pages.
//
// The listing page carries one row per character in the #CardSelectTr table;
// the second column holds the Chinese name and a link to the character's own
// page. Each character page has a wikitable whose row headers identify the
// title (称号) and vision (元素属性) rows.

use scraper::Html;
use tracing::debug;

use crate::core::{dom, merge::merge_by_key, net, sanitize};
use crate::error::{ScrapeError, structural};
use crate::params::{CN_CHARACTER_LISTING_URL, CN_WIKI_BASE, TITLE_ROW_MARKER, VISION_ROW_MARKER};
use crate::records::{self, AttrMap, RecordProvider, RecordSet};

/// CN-wiki record source: one listing fetch plus one fetch per character.
pub struct CnWiki;

impl RecordProvider for CnWiki {
    fn records(&self) -> Result<RecordSet, ScrapeError> {
        let listing = dom::parse(&net::http_get(CN_CHARACTER_LISTING_URL)?);
        let urls = character_page_urls(&listing)?;
        let names = character_names(&urls);

        let mut identities = RecordSet::new();
        for (name, attrs) in &urls {
            let Some(url) = attrs.get(records::BILIGAME_URL) else { continue };
            debug!(character = %name, %url, "fetching CN character page");
            let page = dom::parse(&net::http_get(url)?);
            identities.insert(name.clone(), identity_info(&page));
        }

        Ok(merge_by_key(&merge_by_key(&names, &identities), &urls))
    }
}

/// Chinese name → `{biligameUrl}` from the listing page. URLs are
/// percent-decoded so the Chinese page paths stay readable.
pub fn character_page_urls(listing: &Html) -> Result<RecordSet, ScrapeError> {
    let table = listing
        .select(&dom::selector("#CardSelectTr"))
        .next()
        .ok_or_else(|| structural("CN character listing", s!("no #CardSelectTr table")))?;

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
        let Some(href) = name_cell.select(&a).next().and_then(|l| l.value().attr("href"))
        else {
            continue;
        };
        let mut attrs = AttrMap::new();
        attrs.insert(
            s!(records::BILIGAME_URL),
            sanitize::unquote(&format!("{CN_WIKI_BASE}{href}")),
        );
        urls.insert(name, attrs);
    }
    Ok(urls)
}

/// Chinese name → `{nameCn}` for every listed character.
pub fn character_names(urls: &RecordSet) -> RecordSet {
    urls.keys()
        .map(|name| (name.clone(), attrs! { records::NAME_CN => name.as_str() }))
        .collect()
}

/// Title and vision from one character page's wikitable rows.
/// The vision cell reads like "水元素"; only the element character is kept.
pub fn identity_info(page: &Html) -> AttrMap {
    let row = dom::selector("table.wikitable tr");
    let th = dom::selector("th");
    let td = dom::selector("td");

    let mut info = AttrMap::new();
    for r in page.select(&row) {
        let Some(header) = r.select(&th).next().map(dom::text_of) else { continue };
        let Some(cell) = r.select(&td).next() else { continue };
        if header.contains(TITLE_ROW_MARKER) {
            info.insert(s!(records::TITLE_CN), dom::text_of(cell));
        }
        if header.contains(VISION_ROW_MARKER) {
            if let Some(element) = dom::text_of(cell).chars().next() {
                info.insert(s!(records::VISION_CN), element.to_string());
            }
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <table id="CardSelectTr"><tbody>
            <tr><th>图</th><th>名</th><th>属性</th></tr>
            <tr>
                <td><img src="amber.png"></td>
                <td><a href="/ys/%E5%AE%89%E6%9F%8F">安柏</a></td>
                <td>火</td>
            </tr>
            <tr>
                <td><img src="hutao.png"></td>
                <td><a href="/ys/%E8%83%A1%E6%A1%83">胡桃</a></td>
                <td>火</td>
            </tr>
            <tr><td colspan="3">占位</td></tr>
        </tbody></table>
    "#;

    #[test]
    fn listing_yields_names_and_decoded_urls() {
        let urls = character_page_urls(&dom::parse(LISTING)).unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(
            urls["安柏"][records::BILIGAME_URL],
            "https://wiki.biligame.com/ys/安柏"
        );

        let names = character_names(&urls);
        assert_eq!(names["胡桃"][records::NAME_CN], "胡桃");
    }

    #[test]
    fn missing_listing_table_is_fatal() {
        let listing = dom::parse("<table id='other'></table>");
        assert!(matches!(
            character_page_urls(&listing),
            Err(ScrapeError::StructuralMismatch { .. })
        ));
    }

    #[test]
    fn identity_info_reads_title_and_vision_rows() {
        let page = dom::parse(
            r#"
            <table class="wikitable"><tbody>
                <tr><th>称号</th><td> 飞行冠军 </td></tr>
                <tr><th>元素属性</th><td>火元素</td></tr>
                <tr><th>武器</th><td>弓</td></tr>
            </tbody></table>
        "#,
        );
        let info = identity_info(&page);
        assert_eq!(info, attrs! { "titleCn" => "飞行冠军", "visionCn" => "火" });
    }

    #[test]
    fn identity_info_tolerates_absent_rows() {
        let page = dom::parse("<table class=\"wikitable\"><tr><th>武器</th><td>弓</td></tr></table>");
        assert!(identity_info(&page).is_empty());
    }
}
