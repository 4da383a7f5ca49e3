// src/specs/resistance.rs
//
// Base elemental resistances from a CN enemy page.
//
// The page carries several gw-table-kd wikitables; the resistance one is
// identified by its first-row heading (抗性). Inside it, the second row
// holds the element names and the third row the values, column-aligned.

use std::collections::BTreeMap;

use scraper::Html;

use crate::core::{dom, net};
use crate::error::{ScrapeError, structural};
use crate::params::RESISTANCE_MARKER;

/// Element name → base resistance value, e.g. `"水" → "∞"`.
pub type ResistanceInfo = BTreeMap<String, String>;

pub fn fetch_base_resistance(enemy_page_url: &str) -> Result<ResistanceInfo, ScrapeError> {
    base_resistance(&dom::parse(&net::http_get(enemy_page_url)?))
}

pub fn base_resistance(page: &Html) -> Result<ResistanceInfo, ScrapeError> {
    let tbody = dom::selector("table.wikitable.gw-table-kd tbody");
    let tr = dom::selector("tr");
    let th = dom::selector("th");
    let td = dom::selector("td");

    for body in page.select(&tbody) {
        let heading = body
            .select(&tr)
            .next()
            .and_then(|r| r.select(&th).next())
            .map(dom::text_of);
        if !heading.is_some_and(|h| h.contains(RESISTANCE_MARKER)) {
            continue;
        }

        let mut types = Vec::new();
        let mut values = Vec::new();
        for (idx, row) in body.select(&tr).enumerate() {
            if idx == 1 {
                types = row.select(&th).map(dom::text_of).collect();
            }
            if idx == 2 {
                values = row.select(&td).map(dom::text_of).collect();
            }
        }
        return Ok(types.into_iter().zip(values).collect());
    }

    Err(structural("enemy page", s!("no resistance table (抗性) found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <table class="wikitable gw-table-kd"><tbody>
            <tr><th colspan="9">基础信息</th></tr>
        </tbody></table>
        <table class="wikitable gw-table-kd"><tbody>
            <tr><th colspan="8">抗性<sup>[2]</sup></th></tr>
            <tr>
                <th><img alt="物理.png"> 物理</th>
                <th><img alt="火.png"> <span style="color:red">火</span></th>
                <th><img alt="水.png"> <span>水</span></th>
            </tr>
            <tr>
                <td>10%</td>
                <td>10%</td>
                <td><span style="color:#FF2323">∞</span></td>
            </tr>
            <tr style="display:none"><td colspan="9"></td></tr>
        </tbody></table>
    "#;

    #[test]
    fn resistance_table_zips_types_and_values() {
        let info = base_resistance(&dom::parse(PAGE)).unwrap();
        assert_eq!(info, attrs! { "物理" => "10%", "火" => "10%", "水" => "∞" });
    }

    #[test]
    fn missing_resistance_table_is_fatal() {
        let page = dom::parse("<table class=\"wikitable\"><tr><th>抗性</th></tr></table>");
        assert!(matches!(
            base_resistance(&page),
            Err(ScrapeError::StructuralMismatch { .. })
        ));
    }
}
