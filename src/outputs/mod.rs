//! Rendering of a finished [`ResultSet`](crate::models::ResultSet).
//!
//! # Submodules
//!
//! - [`text`]: the per-source listing shown to a reader
//! - [`json`]: a JSON object keyed by source name, for piping into other tools
//!
//! Rendering happens on the caller's side after the result arrives; the
//! background run never writes to the output.

pub mod json;
pub mod text;
