//! Data models for search requests and their aggregated results.
//!
//! - [`SearchRequest`]: keywords and [`SearchMode`] for one run
//! - [`Source`]: the six fixed search endpoints, in run order
//! - [`SourceRecord`]: a normalized `{title, link}` result
//! - [`ResultSet`]: records grouped by source
//! - [`Progress`]: completed/total fetch counter

use crate::error::InputError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How keywords are turned into queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Each keyword is queried separately against every source.
    #[default]
    Broad,
    /// All keywords are joined into one query.
    Narrow,
}

/// An immutable search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keywords: Vec<String>,
    mode: SearchMode,
}

impl SearchRequest {
    /// Build a request from already-split keywords. Each keyword is trimmed;
    /// keywords that become empty are kept.
    pub fn new<I, S>(keywords: I, mode: SearchMode) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .collect();
        if keywords.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self { keywords, mode })
    }

    /// Build a request from comma-separated user input.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let req = SearchRequest::parse("quantum, gravity", SearchMode::Narrow)?;
    /// assert_eq!(req.queries(), vec!["quantum gravity"]);
    /// ```
    pub fn parse(input: &str, mode: SearchMode) -> Result<Self, InputError> {
        if input.trim().is_empty() {
            return Err(InputError::Empty);
        }
        Self::new(input.split(','), mode)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// The query strings a run iterates over: every keyword in Broad mode,
    /// a single space-joined query in Narrow mode.
    pub fn queries(&self) -> Vec<String> {
        match self.mode {
            SearchMode::Broad => self.keywords.clone(),
            SearchMode::Narrow => vec![self.keywords.iter().join(" ")],
        }
    }
}

/// One of the six fixed search endpoints. Declaration order is run order
/// and [`ResultSet`] iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Google Scholar")]
    GoogleScholar,
    #[serde(rename = "Project Gutenberg")]
    ProjectGutenberg,
    #[serde(rename = "LibGen")]
    LibGen,
    #[serde(rename = "PubMed")]
    PubMed,
    #[serde(rename = "PDFDrive")]
    PdfDrive,
    #[serde(rename = "Open Library")]
    OpenLibrary,
}

impl Source {
    pub const ALL: [Source; 6] = [
        Source::GoogleScholar,
        Source::ProjectGutenberg,
        Source::LibGen,
        Source::PubMed,
        Source::PdfDrive,
        Source::OpenLibrary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Source::GoogleScholar => "Google Scholar",
            Source::ProjectGutenberg => "Project Gutenberg",
            Source::LibGen => "LibGen",
            Source::PubMed => "PubMed",
            Source::PdfDrive => "PDFDrive",
            Source::OpenLibrary => "Open Library",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub title: String,
    pub link: String,
}

impl SourceRecord {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Records grouped by source. All six sources are always present; a source
/// with no results maps to an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(BTreeMap<Source, Vec<SourceRecord>>);

impl Default for ResultSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSet {
    pub fn new() -> Self {
        Self(Source::ALL.iter().map(|s| (*s, Vec::new())).collect())
    }

    /// Append records to a source, keeping discovery order.
    pub fn extend(&mut self, source: Source, records: Vec<SourceRecord>) {
        self.0.entry(source).or_default().extend(records);
    }

    #[cfg(test)]
    pub fn get(&self, source: Source) -> &[SourceRecord] {
        self.0.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate sources in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Source, &[SourceRecord])> {
        self.0.iter().map(|(s, r)| (*s, r.as_slice()))
    }

    #[cfg(test)]
    pub fn sources(&self) -> usize {
        self.0.len()
    }

    pub fn total_records(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Fetch counter for a run. Every extractor call counts once, whether it
/// produced records or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    completed: usize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { completed: 0, total }
    }

    /// Record one finished extractor call and return the new percentage.
    pub fn step(&mut self) -> u8 {
        self.completed = (self.completed + 1).min(self.total);
        self.percent()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// `completed * 100 / total`, integer division.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.completed * 100 / self.total) as u8
    }
}
