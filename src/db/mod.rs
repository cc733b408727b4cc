//! Database Client Module
//!
//! Thin client over the MongoDB driver. Index maintenance, TTL expiry and
//! query planning all happen inside the server; this module only issues
//! commands and decodes the replies.

mod client;
mod collection;
mod filter;
mod index;

pub use client::{Client, Database, DEFAULT_TIMEOUT};
pub use collection::Collection;
pub use filter::Filter;
pub use index::{Direction, IndexSpec};
