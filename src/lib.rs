//! folio: typed content loading for a CMS-backed portfolio site.
//!
//! Module map:
//! - `schema`     validated document types and the diagnostics they produce
//! - `normalize`  route, link, and rich text normalizers
//! - `preview`    listing-page projections of validated documents
//! - `source`     content sources: live repository client and fixtures
//! - `loader`     the fetch-validate-fallback facade
//! - `config`     `folio.toml` parsing and validation
//! - `cli`        the `folio` command line

pub mod cli;
pub mod config;
pub mod loader;
pub mod logger;
pub mod normalize;
pub mod preview;
pub mod schema;
pub mod source;
