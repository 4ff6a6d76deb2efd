//! Library Genesis search scraper.
//!
//! The classic `search.php` page renders results as table rows with
//! `valign="top"`. The third cell holds the title text and the anchor to the
//! book page; rows with fewer cells (headers, pagers) are skipped.

use crate::error::ParseError;
use crate::models::{Source, SourceRecord};
use crate::sources::{SourceExtractor, encode, trim_base};
use crate::utils::{clean_text, resolve_link};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"tr[valign="top"]"#).unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

#[derive(Debug, Clone)]
pub struct LibGen {
    base_url: String,
}

impl LibGen {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }
}

impl SourceExtractor for LibGen {
    fn source(&self) -> Source {
        Source::LibGen
    }

    fn build_url(&self, query: &str) -> String {
        format!(
            "{}/search.php?req={}&res=100&column=def",
            self.base_url,
            encode(query)
        )
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let mut records = Vec::new();
        for row in document.select(&ROW_SELECTOR) {
            let Some(cell) = row.select(&CELL_SELECTOR).nth(2) else {
                continue;
            };
            let link = cell
                .select(&ANCHOR_SELECTOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve_link(&self.base_url, href));
            let Some(link) = link else {
                debug!("LibGen row without a title link; skipping");
                continue;
            };
            let title = clean_text(&cell.text().collect::<String>());
            if title.is_empty() {
                continue;
            }
            records.push(SourceRecord::new(title, link));
        }
        Ok(records)
    }
}
