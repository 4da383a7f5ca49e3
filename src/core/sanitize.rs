// src/core/sanitize.rs

use percent_encoding::percent_decode_str;

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Percent-decode a URL so Chinese page paths stay human-readable,
/// e.g. `/ys/%E5%AE%89%E6%9F%8F` → `/ys/安柏`.
pub fn unquote(url: &str) -> String {
    percent_decode_str(url).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  Lv.72\n "), "Lv.72");
        assert_eq!(normalize_ws("a\t b\n\nc"), "a b c");
    }

    #[test]
    fn unquote_decodes_utf8_paths() {
        assert_eq!(
            unquote("https://wiki.biligame.com/ys/%E5%AE%89%E6%9F%8F"),
            "https://wiki.biligame.com/ys/安柏"
        );
        // already-plain URLs pass through
        assert_eq!(unquote("https://example.com/a_b"), "https://example.com/a_b");
    }
}
