//! Tool implementations and their parameter types.
//!
//! Each tool is an async method returning the final string for the host:
//! a JSON document, a markdown document, a "no results" notice, or an
//! `Error:` message. Nothing here fails with a Rust error.

pub mod catalog;
pub mod params;
pub mod solar;

pub use catalog::CatalogTools;
pub use params::*;
pub use solar::SolarTools;
