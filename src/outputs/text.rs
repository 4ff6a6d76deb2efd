//! Plain-text rendering of search results.
//!
//! Each source gets a header, then one title/link pair per record, then a
//! separator line. Sources with no records still get a header.

use crate::models::ResultSet;
use std::fmt::Write;

const SEPARATOR: &str = "-------------------------------------------------";

/// Render a [`ResultSet`] for display.
pub fn render(results: &ResultSet) -> String {
    let mut out = String::new();
    for (source, records) in results.iter() {
        writeln!(out, "\nResults from {source}:\n").unwrap();
        for record in records {
            writeln!(out, "Title: {}", record.title).unwrap();
            writeln!(out, "Link: {}\n", record.link).unwrap();
        }
        writeln!(out, "{SEPARATOR}").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Source, SourceRecord};

    #[test]
    fn test_render_lists_every_source() {
        let out = render(&ResultSet::new());
        for source in Source::ALL {
            assert!(out.contains(&format!("Results from {source}:")));
        }
        assert_eq!(out.matches(SEPARATOR).count(), 6);
        assert!(!out.contains("Title:"));
    }

    #[test]
    fn test_render_records_under_their_source() {
        let mut results = ResultSet::new();
        results.extend(
            Source::OpenLibrary,
            vec![SourceRecord::new("The Hobbit", "https://openlibrary.org/works/OL262758W")],
        );
        let out = render(&results);
        let header = out.find("Results from Open Library:").unwrap();
        let title = out.find("Title: The Hobbit").unwrap();
        assert!(header < title);
        assert!(out.contains("Link: https://openlibrary.org/works/OL262758W"));
    }
}
