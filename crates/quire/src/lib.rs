//! quire: search-query compilation and result annotation.
//!
//! quire sits between a structured search form and a full-text search backend. It compiles
//! per-field filter entries into a boolean query string, and turns the text and entity
//! annotations that come back into highlighted, label-colored segments for display.
//!
//! The library work lives in the `quire-*` crates; this crate is the command-line driver.

#![warn(missing_docs)]

pub mod cli;
