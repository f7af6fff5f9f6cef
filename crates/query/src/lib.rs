//! climatch query layer.
//!
//! Turns a free-text data request ("ssp2 gdp|ppp india 2020 2050 annual")
//! into a structured [`Query`] that the matcher scores providers against.
//!
//! ## What we do
//!
//! - Lower-case and split on whitespace
//! - Classify every token by the first matching rule: scenario, piped
//!   variable, region, granularity, year, bare variable
//! - Drop everything else without complaint
//!
//! ## Pure function guarantee
//!
//! No I/O and no shared state. The same text always yields the same query.
//! Parsing never fails; an empty or unrecognised request produces
//! `Query::default()`, which downstream code treats as "nothing to match".
//!
//! Duplicates are kept on purpose: a request that names `gdp` twice weighs
//! it twice when the matcher averages per-token similarities.

mod parser;
mod types;
pub mod vocab;

pub use crate::parser::{classify_token, parse_query, TokenClass};
pub use crate::types::Query;
