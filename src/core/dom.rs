// src/core/dom.rs

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compile a selector literal. All call sites pass compile-time constants,
/// so a parse failure is a programming error, not input-dependent.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Whitespace-normalized text content of an element and its descendants.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Exact text content, no normalization. Used where markup whitespace is
/// significant, e.g. comparing link text against a title attribute.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// First non-empty trimmed text fragment, e.g. the date line of an infobox
/// cell that also carries footnote markup.
pub fn first_text_line(el: ElementRef<'_>) -> Option<String> {
    el.text().map(str::trim).find(|t| !t.is_empty()).map(String::from)
}
