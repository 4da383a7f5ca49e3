// src/specs/abyss.rs
//
// The Spiral Abyss schedule page.
//
// All periods live on one page. A period's section is anchored by a heading
// span whose id is the period key; the four floors of that period are the
// next four div.visible-xs blocks in document order (the -md/-sm/-lg
// variants render the same tables differently and are ignored). Row order
// within the floors' wikitables is the only structure the decoder gets.

use scraper::{ElementRef, Html};

use crate::core::{dom, net};
use crate::error::{ScrapeError, structural};
use crate::params::ABYSS_SCHEDULE_URL;
use crate::schedule::FLOOR_COUNT;

/// The schedule page, fetched once and reused for every period decode.
pub struct AbyssPage {
    doc: Html,
}

impl AbyssPage {
    pub fn fetch() -> Result<Self, ScrapeError> {
        Ok(Self::from_html(&net::http_get(ABYSS_SCHEDULE_URL)?))
    }

    pub fn from_html(html: &str) -> Self {
        Self { doc: dom::parse(html) }
    }

    /// Ordered wikitable rows of one period's four floors.
    ///
    /// A missing anchor span is fatal: the period was configured but the
    /// page no longer carries it.
    pub fn period_rows(&self, period_key: &str) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
        let mut after_anchor = false;
        let mut floors = Vec::with_capacity(FLOOR_COUNT);

        for node in self.doc.root_element().descendants() {
            let Some(el) = ElementRef::wrap(node) else { continue };
            if !after_anchor {
                if el.value().name() == "span" && el.value().id() == Some(period_key) {
                    after_anchor = true;
                }
            } else if el.value().name() == "div"
                && el.value().classes().any(|c| c == "visible-xs")
            {
                floors.push(el);
                if floors.len() == FLOOR_COUNT {
                    break;
                }
            }
        }

        if !after_anchor {
            return Err(structural(
                "abyss schedule page",
                format!("no period anchor span with id {period_key:?}"),
            ));
        }

        let row = dom::selector("table.wikitable tr");
        Ok(floors.iter().flat_map(|floor| floor.select(&row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> AbyssPage {
        AbyssPage::from_html(
            r#"
            <span id="period-a"></span>
            <div class="visible-md"><table class="wikitable"><tr><th>md 版</th></tr></table></div>
            <div class="visible-xs"><table class="wikitable">
                <tr><th>9层</th></tr>
                <tr><th>怪物等级</th><td><center>Lv.72</center></td></tr>
            </table></div>
            <div class="visible-xs"><table class="wikitable"><tr><th>10层</th></tr></table></div>
            <div class="visible-xs"><table class="wikitable"><tr><th>11层</th></tr></table></div>
            <div class="visible-xs"><table class="wikitable"><tr><th>12层</th></tr></table></div>
            <span id="period-b"></span>
            <div class="visible-xs"><table class="wikitable"><tr><th>b 的 9层</th></tr></table></div>
        "#,
        )
    }

    #[test]
    fn rows_come_from_the_next_four_xs_divs_only() {
        let page = page();
        let rows = page.period_rows("period-a").unwrap();
        let headers: Vec<_> = rows
            .iter()
            .filter_map(|r| r.select(&dom::selector("th")).next().map(dom::text_of))
            .collect();
        assert_eq!(headers, ["9层", "怪物等级", "10层", "11层", "12层"]);
    }

    #[test]
    fn a_later_period_does_not_swallow_earlier_floors() {
        let page = page();
        let rows = page.period_rows("period-b").unwrap();
        let headers: Vec<_> = rows
            .iter()
            .filter_map(|r| r.select(&dom::selector("th")).next().map(dom::text_of))
            .collect();
        assert_eq!(headers, ["b 的 9层"]);
    }

    #[test]
    fn missing_anchor_is_fatal() {
        let page = page();
        assert!(matches!(
            page.period_rows("period-c"),
            Err(ScrapeError::StructuralMismatch { .. })
        ));
    }
}
