//! Google Scholar result scraper.
//!
//! Scrapes the public Scholar results page. Each hit is an `h3.gs_rt`
//! heading; the title and link come from the anchor inside it. Citation-only
//! entries (`[CITATION]`) have no anchor and are skipped.

use crate::error::ParseError;
use crate::models::{Source, SourceRecord};
use crate::sources::{SourceExtractor, encode, trim_base};
use crate::utils::{clean_text, resolve_link};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.gs_rt").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

#[derive(Debug, Clone)]
pub struct Scholar {
    base_url: String,
}

impl Scholar {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }
}

impl SourceExtractor for Scholar {
    fn source(&self) -> Source {
        Source::GoogleScholar
    }

    fn build_url(&self, query: &str) -> String {
        format!("{}/scholar?q={}", self.base_url, encode(query))
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let mut records = Vec::new();
        for heading in document.select(&RESULT_SELECTOR) {
            let Some(anchor) = heading.select(&ANCHOR_SELECTOR).next() else {
                debug!("Scholar result without anchor; skipping");
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                debug!("Scholar anchor without href; skipping");
                continue;
            };
            let Some(link) = resolve_link(&self.base_url, href) else {
                debug!(href, "Unresolvable Scholar link; skipping");
                continue;
            };
            let title = clean_text(&anchor.text().collect::<String>());
            if title.is_empty() {
                continue;
            }
            records.push(SourceRecord::new(title, link));
        }
        Ok(records)
    }
}
