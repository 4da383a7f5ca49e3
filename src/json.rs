// src/json.rs
//
// JSON artifact rendering: 4-space indent, non-ASCII kept literal so
// Chinese/Japanese text stays readable in the output files.

use serde::Serialize;

use crate::error::ScrapeError;

pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, ScrapeError> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8(buf).expect("serde_json output is UTF-8"))
}
