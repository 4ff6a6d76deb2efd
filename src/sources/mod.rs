//! Search sources and the extractors that normalize their responses.
//!
//! Each source implements [`SourceExtractor`]: it knows how to build a query
//! URL and how to turn the response body into [`SourceRecord`]s. The shared
//! [`extract`] driver fetches the URL and never fails; fetch and
//! document-level parse errors are logged and yield an empty list.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Query URL |
//! |--------|--------|--------|-----------|
//! | Google Scholar | [`scholar`] | HTML scraping | `/scholar?q=` |
//! | Project Gutenberg | [`gutendex`] | Gutendex JSON API | `/books/?search=` |
//! | LibGen | [`libgen`] | HTML scraping | `/search.php?req=` |
//! | PubMed | [`pubmed`] | HTML scraping | `/?term=` |
//! | PDFDrive | [`pdfdrive`] | HTML scraping | `/search?q=` |
//! | Open Library | [`open_library`] | Search JSON API | `/search.json?q=` |
//!
//! # Malformed Records
//!
//! A result entry missing an expected element, attribute or field is skipped
//! and the rest of the response is still processed.

use crate::config::Endpoints;
use crate::error::ParseError;
use crate::fetch::Fetcher;
use crate::models::{Source, SourceRecord};
use crate::utils::truncate_for_log;
use tracing::{info, instrument, warn};

pub mod gutendex;
pub mod libgen;
pub mod open_library;
pub mod pdfdrive;
pub mod pubmed;
pub mod scholar;

/// A search endpoint that can build a query URL and parse its response.
pub trait SourceExtractor: Send + Sync {
    /// Which source this extractor serves.
    fn source(&self) -> Source;

    /// Full query URL for `query`. The query is percent-encoded.
    fn build_url(&self, query: &str) -> String;

    /// Parse a response body into records.
    ///
    /// Malformed individual records are skipped. An error is returned only
    /// when the document as a whole cannot be read.
    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError>;
}

/// All six extractors, in run order.
pub fn all(endpoints: &Endpoints) -> Vec<Box<dyn SourceExtractor>> {
    vec![
        Box::new(scholar::Scholar::new(&endpoints.scholar)),
        Box::new(gutendex::Gutendex::new(&endpoints.gutendex, &endpoints.gutenberg)),
        Box::new(libgen::LibGen::new(&endpoints.libgen)),
        Box::new(pubmed::PubMed::new(&endpoints.pubmed)),
        Box::new(pdfdrive::PdfDrive::new(&endpoints.pdfdrive)),
        Box::new(open_library::OpenLibrary::new(&endpoints.openlibrary)),
    ]
}

/// Fetch and parse one query against one source.
///
/// Never fails: a fetch error or an unreadable document is logged and
/// produces an empty list.
#[instrument(level = "info", skip(extractor, fetcher), fields(source = %extractor.source()))]
pub async fn extract(
    extractor: &dyn SourceExtractor,
    fetcher: &Fetcher,
    query: &str,
) -> Vec<SourceRecord> {
    let url = extractor.build_url(query);

    let body = match fetcher.fetch(&url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(%url, error = %e, "Fetch failed; source contributes no results");
            return Vec::new();
        }
    };

    match extractor.parse(&body) {
        Ok(records) => {
            info!(count = records.len(), "Extracted records");
            records
        }
        Err(e) => {
            warn!(
                %url,
                error = %e,
                body_preview = %truncate_for_log(&String::from_utf8_lossy(&body), 300),
                "Unreadable response; source contributes no results"
            );
            Vec::new()
        }
    }
}

/// Percent-encode a query for use as a URL parameter value. `/` is left
/// as-is.
pub(crate) fn encode(query: &str) -> String {
    urlencoding::encode(query).replace("%2F", "/")
}

pub(crate) fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchSettings;
    use mockito::Server;

    #[test]
    fn test_registry_order_matches_source_order() {
        let extractors = all(&Endpoints::default());
        let order: Vec<Source> = extractors.iter().map(|e| e.source()).collect();
        assert_eq!(order, Source::ALL.to_vec());
    }

    #[test]
    fn test_encode_percent_encodes_spaces_and_symbols() {
        assert_eq!(encode("quantum gravity"), "quantum%20gravity");
        assert_eq!(encode("c++ & rust"), "c%2B%2B%20%26%20rust");
    }

    #[test]
    fn test_encode_keeps_slashes() {
        assert_eq!(encode("TCP/IP networking"), "TCP/IP%20networking");
    }

    #[tokio::test]
    async fn test_extract_swallows_fetch_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/books/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let extractor = gutendex::Gutendex::new(&server.url(), "https://www.gutenberg.org");
        let fetcher = Fetcher::new(&FetchSettings::default()).unwrap();
        let records = extract(&extractor, &fetcher, "dickens").await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_extract_swallows_unreadable_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let extractor = open_library::OpenLibrary::new(&server.url());
        let fetcher = Fetcher::new(&FetchSettings::default()).unwrap();
        let records = extract(&extractor, &fetcher, "tolkien").await;
        assert!(records.is_empty());
    }
}
