//! Parse-level and engine-level error types.
//!
//! `ParseError` is a grammar-level outcome: "this input doesn't match this
//! grammar", reported as an ordinary value from `Engine::parse`. `RuntimeError`
//! is a engine-safety trip (recursion limit) one layer further out — not a
//! parse failure, a refusal to keep parsing.

use thiserror::Error;

/// Points at the deepest position the parse failed to get past.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("parse error at {line}:{column} (position {position}) in {non_terminal_name}")]
pub struct ParseError {
    pub position: usize,
    pub line: u32,
    pub column: u32,
    pub non_terminal_name: String,
}

/// Engine-level faults that abort a parse before it can produce a
/// `ParseError` value, distinct from ordinary grammar-level failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("recursion limit exceeded: depth {depth} >= max_depth {max_depth}")]
    RecursionLimitExceeded { depth: u32, max_depth: u32 },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
