//! Deterministic textual projections of green trees: ordered JSON and
//! S-expressions.
//!
//! Both writers walk the tree with an explicit stack, so arbitrarily deep
//! trees serialize without growing the call stack.

mod config;
mod error;
mod json;
mod sexpr;

pub use crate::config::{JsonConfig, JsonStyle, SexprConfig};
pub use crate::error::SerializeError;
pub use crate::json::{generate_json, generate_json_with, write_json};
pub use crate::sexpr::{to_sexpr, to_sexpr_with, write_sexpr};

/// Runs an in-memory writer. A `Vec<u8>` sink cannot fail and both writers
/// only emit UTF-8, so an error here is a bug in the writer.
fn in_memory(write: impl FnOnce(&mut Vec<u8>) -> Result<(), SerializeError>) -> String {
    let mut out = Vec::new();
    write(&mut out)
        .and_then(|()| Ok(String::from_utf8(out)?))
        .unwrap_or_else(|error| unreachable!("in-memory serialization failed: {error}"))
}
