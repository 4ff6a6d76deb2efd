//! PDFDrive search scraper.

use crate::error::ParseError;
use crate::models::{Source, SourceRecord};
use crate::sources::{SourceExtractor, encode, trim_base};
use crate::utils::{clean_text, resolve_link};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.file-right").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.ai-search").unwrap());

#[derive(Debug, Clone)]
pub struct PdfDrive {
    base_url: String,
}

impl PdfDrive {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }
}

impl SourceExtractor for PdfDrive {
    fn source(&self) -> Source {
        Source::PdfDrive
    }

    fn build_url(&self, query: &str) -> String {
        format!("{}/search?q={}", self.base_url, encode(query))
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let mut records = Vec::new();
        for file in document.select(&RESULT_SELECTOR) {
            let Some(anchor) = file.select(&TITLE_SELECTOR).next() else {
                continue;
            };
            let Some(link) = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_link(&self.base_url, href))
            else {
                debug!("PDFDrive result without usable href; skipping");
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
