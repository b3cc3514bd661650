//! Boolean query compilation for quire.
//!
//! This crate turns structured per-field filter input into the boolean query
//! syntax consumed by a field-indexed search backend:
//!
//! - **Terms**: `title:"treaty"` - one quoted literal per filter entry
//! - **AND / OR**: entries are grouped by their operator, or kept in typed order
//! - **Negation**: `NOT (author:"Kant" OR author:"Hume")`
//! - **Date ranges**: `date:[2020-01-01T00:00:00Z TO 2020-12-31T23:59:59Z]`
//!
//! Every query is produced in two forms from the same clause tree: a readable
//! one for display and a percent-encoded one for transport.
//!
//! # Example
//!
//! ```
//! use quire_query::{CompileRequest, FilterEntry, FilterMap, compile};
//!
//! let mut filters = FilterMap::new();
//! filters.push("title", FilterEntry::and("treaty"));
//! filters.push("author", FilterEntry::and("Kant"));
//!
//! let query = compile(&CompileRequest::new(&filters));
//! assert_eq!(query, r#"title:"treaty" AND author:"Kant""#);
//! ```

#![warn(missing_docs)]

mod ast;
mod compile;
mod error;
mod filter;

pub use ast::{Clause, Encoding};
pub use compile::{
    CompileRequest, DEFAULT_DATE_FIELD, QueryMode, build_clause, compile, compile_encoded,
};
pub use error::QueryError;
pub use filter::{DateRange, FilterEntry, FilterMap, MAX_DATE_KEY, MIN_DATE_KEY, Operator};
