//! Dual rendering: the same records as a JSON envelope or a markdown document.
//!
//! The JSON side is [`Envelope`]; the markdown side is built from
//! [`Document`] and per-record [`Block`]s. Domain-specific record layouts live
//! in [`catalog`] and [`solar`].

pub mod catalog;
pub mod envelope;
pub mod markdown;
pub mod solar;

pub use envelope::{Envelope, OffsetWindow};
pub use markdown::{heading, Block, Document};
