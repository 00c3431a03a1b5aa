//! Shared test data for the strika crates.
//!
//! Real font binaries are awkward to keep in a repository and even more
//! awkward to read in a failing test, so fixtures here are built
//! programmatically with [`bebuffer::BeBuffer`] and annotated field by
//! field. This crate should only ever be a dev-dependency.

pub mod bebuffer;
pub mod cmap;
pub mod fonts;
pub mod glyf;

pub use bebuffer::BeBuffer;
