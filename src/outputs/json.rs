//! JSON rendering of search results.
//!
//! The output is an object with one key per source, in run order, each
//! holding an array of `{"title", "link"}` objects:
//!
//! ```text
//! {
//!   "Google Scholar": [{"title": "...", "link": "https://..."}],
//!   "Project Gutenberg": [],
//!   ...
//! }
//! ```

use crate::models::ResultSet;
use tracing::instrument;

/// Serialize a [`ResultSet`] as pretty-printed JSON.
#[instrument(level = "debug", skip_all, fields(records = results.total_records()))]
pub fn render(results: &ResultSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
