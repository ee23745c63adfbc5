//! The character-source contract the engine parses against.

use crate::ast::ExtendedData;

/// A positionable character source with an optional extended-data payload.
///
/// `peek`/`consume` return `None` for EOF rather than a sentinel character,
/// since `char` has no natural "outside the domain" value to reuse — `Option`
/// is the idiomatic rendering of that contract in Rust.
///
/// Positions are `usize`, so "negative positions clamp to zero" from the
/// abstract contract holds structurally: callers cannot construct one.
pub trait Input {
    /// Character at the cursor, without advancing. Idempotent.
    fn peek(&self) -> Option<char>;

    /// Character at the cursor, advancing the cursor by one.
    fn consume(&mut self) -> Option<char>;

    fn position(&self) -> usize;

    /// Move the cursor. Implementations must make `set_position` followed
    /// by `peek` deterministic.
    fn set_position(&mut self, pos: usize);

    /// Opaque payload owned by the host, not interpreted by this crate.
    fn extended_data(&self) -> Option<ExtendedData>;

    fn set_extended_data(&mut self, data: Option<ExtendedData>);
}

/// Reference `Input` implementation over an in-memory string.
///
/// Indexes by `char`, not by byte, so positions are stable non-terminal
/// boundaries for any Unicode text without the host needing to reason about
/// UTF-8 encoding lengths.
#[derive(Debug)]
pub struct StrInput {
    chars: Vec<char>,
    pos: usize,
    extended: Option<ExtendedData>,
}

impl StrInput {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            extended: None,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Reconstruct the substring covered by `span`.
    pub fn slice(&self, span: (usize, usize)) -> String {
        self.chars[span.0..span.1].iter().collect()
    }
}

impl Input for StrInput {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn extended_data(&self) -> Option<ExtendedData> {
        self.extended.clone()
    }

    fn set_extended_data(&mut self, data: Option<ExtendedData>) {
        self.extended = data;
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
