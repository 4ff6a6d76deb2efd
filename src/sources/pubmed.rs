//! PubMed search results scraper.
//!
//! Each hit on the results page is an `article.full-docsum`; the title and
//! the relative article path come from its `a.docsum-title` anchor.

use crate::error::ParseError;
use crate::models::{Source, SourceRecord};
use crate::sources::{SourceExtractor, encode, trim_base};
use crate::utils::{clean_text, resolve_link};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.full-docsum").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.docsum-title").unwrap());

#[derive(Debug, Clone)]
pub struct PubMed {
    base_url: String,
}

impl PubMed {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }
}

impl SourceExtractor for PubMed {
    fn source(&self) -> Source {
        Source::PubMed
    }

    fn build_url(&self, query: &str) -> String {
        format!("{}/?term={}", self.base_url, encode(query))
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let mut records = Vec::new();
        for article in document.select(&RESULT_SELECTOR) {
            let Some(anchor) = article.select(&TITLE_SELECTOR).next() else {
                continue;
            };
            let Some(link) = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_link(&self.base_url, href))
            else {
                debug!("PubMed docsum without usable href; skipping");
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

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body><div class="search-results-chunk">
  <article class="full-docsum" data-rel-pos="1">
    <div class="docsum-wrap"><div class="docsum-content">
      <a class="docsum-title" href="/31452104/" data-article-id="31452104">
        CRISPR-Cas9 <b>gene</b> editing:
        a review
      </a>
    </div></div>
  </article>
  <article class="full-docsum" data-rel-pos="2">
    <div class="docsum-content"><span>No title anchor</span></div>
  </article>
  <article class="full-docsum" data-rel-pos="3">
    <a class="docsum-title">Missing href</a>
  </article>
  <article class="full-docsum" data-rel-pos="4">
    <a class="docsum-title" href="/28000000/">Second paper</a>
  </article>
</div></body></html>
"#;

    #[test]
    fn test_build_url() {
        let p = PubMed::new("https://pubmed.ncbi.nlm.nih.gov/");
        assert_eq!(
            p.build_url("crispr"),
            "https://pubmed.ncbi.nlm.nih.gov/?term=crispr"
        );
    }

    #[test]
    fn test_parse_docsums() {
        let p = PubMed::new("https://pubmed.ncbi.nlm.nih.gov");
        let records = p.parse(PAGE.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                SourceRecord::new(
                    "CRISPR-Cas9 gene editing: a review",
                    "https://pubmed.ncbi.nlm.nih.gov/31452104/"
                ),
                SourceRecord::new(
                    "Second paper",
                    "https://pubmed.ncbi.nlm.nih.gov/28000000/"
                ),
            ]
        );
    }
}
