//! Open Library search via its `search.json` API.
//!
//! Documents carry an optional `title` and a `key` such as `/works/OL45804W`.
//! A missing title becomes `"No title"`; a missing key links to the site root.

use crate::error::ParseError;
use crate::models::{Source, SourceRecord};
use crate::sources::{SourceExtractor, encode, trim_base};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const UNTITLED: &str = "No title";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    docs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    title: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenLibrary {
    base_url: String,
}

impl OpenLibrary {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base(base_url),
        }
    }
}

impl SourceExtractor for OpenLibrary {
    fn source(&self) -> Source {
        Source::OpenLibrary
    }

    fn build_url(&self, query: &str) -> String {
        format!("{}/search.json?q={}", self.base_url, encode(query))
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<SourceRecord>, ParseError> {
        let response: SearchResponse = serde_json::from_slice(body)?;

        let records = response
            .docs
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Doc>(entry) {
                Ok(doc) => Some(SourceRecord {
                    title: doc.title.unwrap_or_else(|| UNTITLED.to_string()),
                    link: format!("{}{}", self.base_url, doc.key.unwrap_or_default()),
                }),
                Err(e) => {
                    debug!(error = %e, "Malformed Open Library doc; skipping");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}
