// src/schedule.rs
//
// Spiral Abyss schedule decoding.
//
// One period of the schedule page renders as a flat run of wikitable rows in
// which row order is the only encoding of structure: floors appear in order
// 9..12, chambers 1..3 within each floor, and within a chamber the level row
// and the two half rows are interleaved with presentation rows. The decoder
// collects the three positional lists (levels, first halves, second halves),
// demands exactly 12 of each, and zips them back into the floor/chamber
// hierarchy. Any count mismatch means the wiki changed its layout and is
// fatal; nothing partial is ever returned.

use std::collections::HashSet;

use scraper::{ElementRef, Selector};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::core::{dom, sanitize};
use crate::error::{ScrapeError, structural};
use crate::params::{
    CN_WIKI_BASE, ENEMY_LEVEL_MARKER, ENEMY_LEVEL_PREFIX, FIRST_HALF_MARKER, SECOND_HALF_MARKER,
};

pub const FLOOR_COUNT: usize = 4;
pub const CHAMBER_COUNT: usize = 3;
pub const FIRST_FLOOR: usize = 9;
pub const SLOT_COUNT: usize = FLOOR_COUNT * CHAMBER_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnemyStub {
    #[serde(rename = "nameCn")]
    pub name_cn: String,
    #[serde(rename = "biligameUrl")]
    pub biligame_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HalfLineup {
    pub enemies: Vec<EnemyStub>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChamberRecord {
    pub enemy_level: u32,
    pub first_half: HalfLineup,
    pub second_half: HalfLineup,
}

/// One decoded period: always exactly 4 floors × 3 chambers, stored flat in
/// slot order (slot `i` → floor `9 + i/3`, chamber `1 + i%3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRecord {
    chambers: Vec<ChamberRecord>,
}

impl PeriodRecord {
    /// Look up a chamber by its in-game numbering (floors 9..=12,
    /// chambers 1..=3).
    pub fn chamber(&self, floor: usize, chamber: usize) -> Option<&ChamberRecord> {
        let floor_ix = floor.checked_sub(FIRST_FLOOR)?;
        let chamber_ix = chamber.checked_sub(1)?;
        if floor_ix >= FLOOR_COUNT || chamber_ix >= CHAMBER_COUNT {
            return None;
        }
        self.chambers.get(floor_ix * CHAMBER_COUNT + chamber_ix)
    }
}

// Serializes as {"floor9": {"chamber1": {...}, ...}, ..., "floor12": {...}}.
impl Serialize for PeriodRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct FloorView<'a>(&'a [ChamberRecord]);

        impl Serialize for FloorView<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (i, chamber) in self.0.iter().enumerate() {
                    map.serialize_entry(&format!("chamber{}", i + 1), chamber)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(FLOOR_COUNT))?;
        for (i, floor) in self.chambers.chunks(CHAMBER_COUNT).enumerate() {
            map.serialize_entry(&format!("floor{}", FIRST_FLOOR + i), &FloorView(floor))?;
        }
        map.end()
    }
}

/// Period label → decoded record, in configuration order.
#[derive(Debug, Default)]
pub struct PeriodCatalog {
    entries: Vec<(String, PeriodRecord)>,
}

impl PeriodCatalog {
    pub fn push(&mut self, label: impl Into<String>, record: PeriodRecord) {
        self.entries.push((label.into(), record));
    }

    pub fn get(&self, label: &str) -> Option<&PeriodRecord> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, r)| r)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PeriodCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(label, record)| (label, record)))
    }
}

/// Decode the row sequence of one period into its `PeriodRecord`.
pub fn decode(rows: &[ElementRef<'_>]) -> Result<PeriodRecord, ScrapeError> {
    let levels = enemy_levels(rows)?;
    let first = half_lineups(rows, FIRST_HALF_MARKER);
    let second = half_lineups(rows, SECOND_HALF_MARKER);
    assemble(levels, first, second)
}

/// Zip the three positional lists into the floor/chamber hierarchy.
/// Exposed separately from [`decode`] so the positional contract is testable
/// without any HTML.
pub fn assemble(
    levels: Vec<u32>,
    first: Vec<HalfLineup>,
    second: Vec<HalfLineup>,
) -> Result<PeriodRecord, ScrapeError> {
    expect_slot_count("enemy level rows", levels.len())?;
    expect_slot_count("first-half cells", first.len())?;
    expect_slot_count("second-half cells", second.len())?;

    // Levels grow as the floors deepen; a decrease means rows came out of order.
    if let Some(pair) = levels.windows(2).find(|pair| pair[0] > pair[1]) {
        return Err(structural(
            "enemy level rows",
            format!("levels decrease from {} to {}", pair[0], pair[1]),
        ));
    }

    let chambers = levels
        .into_iter()
        .zip(first)
        .zip(second)
        .map(|((enemy_level, first_half), second_half)| ChamberRecord {
            enemy_level,
            first_half,
            second_half,
        })
        .collect();
    Ok(PeriodRecord { chambers })
}

fn expect_slot_count(what: &'static str, got: usize) -> Result<(), ScrapeError> {
    if got == SLOT_COUNT {
        Ok(())
    } else {
        Err(structural(what, format!("expected {SLOT_COUNT}, got {got}")))
    }
}

fn row_header(row: ElementRef<'_>, th: &Selector) -> Option<String> {
    row.select(th).next().map(dom::text_of)
}

/// Ordered enemy levels, one per marker row ("Lv.72" → 72).
pub fn enemy_levels(rows: &[ElementRef<'_>]) -> Result<Vec<u32>, ScrapeError> {
    let th = dom::selector("th");
    let td = dom::selector("td");

    let mut levels = Vec::new();
    for row in rows {
        let Some(header) = row_header(*row, &th) else { continue };
        if !header.contains(ENEMY_LEVEL_MARKER) {
            continue;
        }
        let cell = row
            .select(&td)
            .next()
            .ok_or_else(|| structural("enemy level rows", s!("marker row without a data cell")))?;
        let text = dom::text_of(cell);
        let level = text
            .strip_prefix(ENEMY_LEVEL_PREFIX)
            .and_then(|n| n.trim().parse().ok())
            .ok_or_else(|| {
                structural("enemy level rows", format!("expected \"Lv.<n>\", got {text:?}"))
            })?;
        levels.push(level);
    }
    Ok(levels)
}

/// Data cells of the rows headed by the given half marker, in row order.
/// Rows without a data cell are presentation variants and skipped; the slot
/// count check in [`assemble`] still catches real losses.
pub fn half_cells<'a>(rows: &[ElementRef<'a>], marker: &str) -> Vec<ElementRef<'a>> {
    let th = dom::selector("th");
    let td = dom::selector("td");

    rows.iter()
        .filter(|row| row_header(**row, &th).is_some_and(|h| h.contains(marker)))
        .filter_map(|row| row.select(&td).next())
        .collect()
}

pub fn half_lineups(rows: &[ElementRef<'_>], marker: &str) -> Vec<HalfLineup> {
    half_cells(rows, marker)
        .into_iter()
        .map(|cell| HalfLineup { enemies: enemies_in_cell(cell) })
        .collect()
}

/// Enemy stubs linked from one half cell, first occurrence of each name wins.
///
/// Entity links carry a `title` equal to their visible text; everything else
/// in the cell (wave labels, icon links) fails that test and is dropped.
/// That filtering is intentional signal extraction, not error recovery.
pub fn enemies_in_cell(cell: ElementRef<'_>) -> Vec<EnemyStub> {
    let link = dom::selector("a");

    let mut seen = HashSet::new();
    let mut enemies = Vec::new();
    for a in cell.select(&link) {
        let Some(title) = a.value().attr("title") else { continue };
        if title != dom::raw_text(a) {
            continue;
        }
        let Some(href) = a.value().attr("href") else { continue };
        if !seen.insert(s!(title)) {
            continue;
        }
        enemies.push(EnemyStub {
            name_cn: s!(title),
            biligame_url: sanitize::unquote(&format!("{CN_WIKI_BASE}{href}")),
        });
    }
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [u32; 12] = [72, 74, 76, 80, 82, 85, 88, 90, 92, 95, 98, 100];

    fn lineup(names: &[&str]) -> HalfLineup {
        HalfLineup {
            enemies: names
                .iter()
                .map(|n| EnemyStub {
                    name_cn: s!(*n),
                    biligame_url: format!("{CN_WIKI_BASE}/ys/{n}"),
                })
                .collect(),
        }
    }

    fn twelve_lineups(prefix: &str) -> Vec<HalfLineup> {
        (0..SLOT_COUNT).map(|i| lineup(&[&format!("{prefix}{i}")])).collect()
    }

    #[test]
    fn slots_map_to_floors_and_chambers_in_order() {
        let record =
            assemble(LEVELS.to_vec(), twelve_lineups("上"), twelve_lineups("下")).unwrap();

        assert_eq!(record.chamber(9, 1).unwrap().enemy_level, 72);
        assert_eq!(record.chamber(10, 3).unwrap().enemy_level, 85);
        assert_eq!(record.chamber(12, 3).unwrap().enemy_level, 100);

        // slot 5 is floor 10 chamber 3
        assert_eq!(record.chamber(10, 3).unwrap().first_half, lineup(&["上5"]));
        assert!(record.chamber(8, 1).is_none());
        assert!(record.chamber(12, 4).is_none());
    }

    #[test]
    fn missing_level_row_is_fatal() {
        let err = assemble(
            LEVELS[..11].to_vec(),
            twelve_lineups("上"),
            twelve_lineups("下"),
        )
        .unwrap_err();
        assert!(matches!(err, ScrapeError::StructuralMismatch { .. }));
        assert!(err.to_string().contains("expected 12, got 11"));
    }

    #[test]
    fn short_half_list_is_fatal() {
        let mut first = twelve_lineups("上");
        first.pop();
        assert!(assemble(LEVELS.to_vec(), first, twelve_lineups("下")).is_err());
    }

    #[test]
    fn decreasing_levels_are_fatal() {
        let mut levels = LEVELS.to_vec();
        levels.swap(0, 11);
        assert!(assemble(levels, twelve_lineups("上"), twelve_lineups("下")).is_err());
    }

    #[test]
    fn equal_neighboring_levels_are_accepted() {
        let mut levels = LEVELS.to_vec();
        levels[1] = levels[0];
        assert!(assemble(levels, twelve_lineups("上"), twelve_lineups("下")).is_ok());
    }

    #[test]
    fn cell_links_filter_and_dedup() {
        let html = r#"<table><tr><td>
            <b>第一波：</b><br>
            <a href="/ys/风丘丘萨满" title="风丘丘萨满">风丘丘萨满</a>
            <a href="/ys/File:icon.png" title="风丘丘萨满">
                <img src="icon.png">
            </a>
            <a href="/ys/大型水史莱姆" title="大型水史莱姆">大型水史莱姆</a>
            <b>第二波：</b><br>
            <a href="/ys/%E9%A3%8E%E4%B8%98%E4%B8%98%E8%90%A8%E6%BB%A1" title="风丘丘萨满">风丘丘萨满</a>
        </td></tr></table>"#;
        let doc = dom::parse(html);
        let cell = doc.select(&dom::selector("td")).next().unwrap();

        let enemies = enemies_in_cell(cell);
        assert_eq!(
            enemies,
            vec![
                EnemyStub {
                    name_cn: s!("风丘丘萨满"),
                    biligame_url: s!("https://wiki.biligame.com/ys/风丘丘萨满"),
                },
                EnemyStub {
                    name_cn: s!("大型水史莱姆"),
                    biligame_url: s!("https://wiki.biligame.com/ys/大型水史莱姆"),
                },
            ]
        );
    }

    #[test]
    fn serializes_to_the_nested_floor_chamber_shape() {
        let record =
            assemble(LEVELS.to_vec(), twelve_lineups("上"), twelve_lineups("下")).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["floor9"]["chamber1"]["enemyLevel"], 72);
        assert_eq!(value["floor10"]["chamber3"]["enemyLevel"], 85);
        assert_eq!(
            value["floor12"]["chamber3"]["secondHalf"]["enemies"][0]["nameCn"],
            "下11"
        );
        assert!(value.get("floor13").is_none());
    }

    #[test]
    fn catalog_keeps_insertion_order() {
        let mut catalog = PeriodCatalog::default();
        let record =
            assemble(LEVELS.to_vec(), twelve_lineups("上"), twelve_lineups("下")).unwrap();
        catalog.push("second period", record.clone());
        catalog.push("first period", record);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.labels().collect::<Vec<_>>(),
            ["second period", "first period"]
        );
        assert!(catalog.get("first period").is_some());
        assert!(catalog.get("third period").is_none());
    }
}
