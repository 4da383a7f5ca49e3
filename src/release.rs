// src/release.rs
//
// Release-date ordering for reconciled character records.
//
// Dates come from the EN wiki as text like "September 28, 2020" and are
// converted to local-midnight Unix timestamps. A record with no release date
// is an announced-but-unreleased character; it gets the max sentinel so it
// sorts after everything dated.

use std::collections::BTreeMap;

use chrono::{Local, TimeZone};

use crate::error::ScrapeError;
use crate::records::{AttrMap, NAME_CN, RELEASE_DATE};

/// Sentinel timestamp for records without a release date.
pub const UNRELEASED: i64 = i64::MAX;

/// English month-name → month-number lookup, built once at startup and
/// passed to the parser explicitly.
#[derive(Debug, Clone)]
pub struct MonthTable(BTreeMap<String, u32>);

impl MonthTable {
    pub fn english() -> Self {
        const MONTHS: [&str; 12] = [
            "January", "February", "March", "April", "May", "June",
            "July", "August", "September", "October", "November", "December",
        ];
        Self(
            MONTHS
                .iter()
                .enumerate()
                .map(|(i, name)| (s!(*name), i as u32 + 1))
                .collect(),
        )
    }

    pub fn number(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }
}

/// Local-midnight Unix timestamp of a record's release date, or the
/// [`UNRELEASED`] sentinel when the attribute is absent.
///
/// A malformed date string is fatal, never mapped to the sentinel: it means
/// the EN wiki changed its page layout.
pub fn release_stamp(record: &AttrMap, months: &MonthTable) -> Result<i64, ScrapeError> {
    match record.get(RELEASE_DATE) {
        Some(date) => parse_stamp(date, months),
        None => Ok(UNRELEASED),
    }
}

/// Parse `"<MonthName> <Day>, <Year>"` into a local-midnight timestamp.
/// The day token may carry trailing punctuation ("28," is common).
fn parse_stamp(date: &str, months: &MonthTable) -> Result<i64, ScrapeError> {
    let mut parts = date.split_whitespace();
    let (Some(month), Some(day), Some(year)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ScrapeError::DateParse(format!("{date:?} is not \"Month Day, Year\"")));
    };

    let month = months
        .number(month)
        .ok_or_else(|| ScrapeError::DateParse(format!("unknown month name in {date:?}")))?;
    let day: u32 = day
        .trim_end_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .map_err(|_| ScrapeError::DateParse(format!("bad day number in {date:?}")))?;
    let year: i32 = year
        .parse()
        .map_err(|_| ScrapeError::DateParse(format!("bad year in {date:?}")))?;

    Local
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .map(|midnight| midnight.timestamp())
        .ok_or_else(|| ScrapeError::DateParse(format!("{date:?} is not a valid calendar date")))
}

/// Order records by ascending release timestamp, ties broken by ascending
/// Chinese name (code-point order). Unreleased records come last.
pub fn order_by_release(
    records: impl IntoIterator<Item = AttrMap>,
    months: &MonthTable,
) -> Result<Vec<AttrMap>, ScrapeError> {
    let mut groups: BTreeMap<i64, Vec<AttrMap>> = BTreeMap::new();
    for record in records {
        groups.entry(release_stamp(&record, months)?).or_default().push(record);
    }

    let mut ordered = Vec::new();
    for (_, mut group) in groups {
        group.sort_by(|a, b| a.get(NAME_CN).cmp(&b.get(NAME_CN)));
        ordered.extend(group);
    }
    Ok(ordered)
}
