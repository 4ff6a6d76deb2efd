//! Project Gutenberg search via the [Gutendex](https://gutendex.com) JSON API.
//!
//! Gutendex returns `{"results": [{"id": 1342, "title": "...", ...}]}`. Links
//! point at the ebook page on gutenberg.org, built from the numeric `id`.

use crate::error::ParseError;
use crate::models::{Source, SourceRecord};
use crate::sources::{SourceExtractor, encode, trim_base};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Book {
    id: u64,
    title: String,
}

#[derive(Debug, Clone)]
pub struct Gutendex {
    api_url: String,
    ebook_base_url: String,
}

impl Gutendex {
    /// `api_url` is the Gutendex base; `ebook_base_url` is the Gutenberg
    /// site used to build `/ebooks/{id}` links.
    pub fn new(api_url: &str, ebook_base_url: &str) -> Self {
        Self {
            api_url: trim_base(api_url),
            ebook_base_url: trim_base(ebook_base_url),
        }
    }
}

impl SourceExtractor for Gutendex {
    fn source(&self) -> Source {
        Source::ProjectGutenberg
    }

    fn build_url(&self, query: &str) -> String {
        format!("{}/books/?search={}", self.api_url, encode(query))
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError> {
        let response: SearchResponse = serde_json::from_slice(body)?;

        let records = response
            .results
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Book>(entry) {
                Ok(book) => Some(SourceRecord {
                    title: book.title,
                    link: format!("{}/ebooks/{}", self.ebook_base_url, book.id),
                }),
                Err(e) => {
                    debug!(error = %e, "Malformed Gutendex entry; skipping");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gutendex() -> Gutendex {
        Gutendex::new("https://gutendex.com", "https://www.gutenberg.org")
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            gutendex().build_url("pride prejudice"),
            "https://gutendex.com/books/?search=pride%20prejudice"
        );
    }

    #[test]
    fn test_parse_single_book() {
        let records = gutendex()
            .parse(br#"{"results":[{"id":7,"title":"T"}]}"#)
            .unwrap();
        assert_eq!(
            records,
            vec![SourceRecord::new("T", "https://www.gutenberg.org/ebooks/7")]
        );
    }

    #[test]
    fn test_parse_skips_malformed_entries() {
        let body = br#"{
            "count": 4,
            "results": [
                {"id": 1342, "title": "Pride and Prejudice", "authors": []},
                {"title": "No id here"},
                {"id": "not-a-number", "title": "Bad id"},
                {"id": 84, "title": "Frankenstein"}
            ]
        }"#;
        let records = gutendex().parse(body).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Pride and Prejudice", "Frankenstein"]);
        assert_eq!(records[1].link, "https://www.gutenberg.org/ebooks/84");
    }

    #[test]
    fn test_parse_missing_results_is_error() {
        assert!(gutendex().parse(br#"{"detail":"oops"}"#).is_err());
        assert!(gutendex().parse(b"not json").is_err());
    }
}
