//! Output sinks for the final record set.
//!
//! Both sinks consume the same record sequence and are deterministic given
//! the same input: identical records in, byte-identical files out.
//!
//! # Submodules
//!
//! - [`csv`]: Tabular representation with a fixed column order
//! - [`json`]: Structured representation as a pretty-printed JSON array

pub mod csv;
pub mod json;
