//! Type-tag name registry.
//!
//! The grammar compiler (external to this crate) assigns every automaton a
//! [`TypeTag`] and registers a human-readable non-terminal name for it.
//! The engine never branches on the name itself — only on `TypeTag` equality
//! against the configured sentinel tags — but needs the name for error
//! messages and tracing.

use std::collections::HashMap;

/// Opaque handle identifying one non-terminal (or a sentinel role such as
/// "char" or "positive predicate") within a compiled grammar.
///
/// Comparing two tags is O(1). Tags carry no ordering meaning beyond identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeTag(u32);

impl TypeTag {
    /// Construct a tag from its raw index. Used by the grammar compiler when
    /// assembling an automata vector; this crate never manufactures tags itself.
    #[inline]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Raw index, for serialization or debugging.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Maps [`TypeTag`]s to their declared non-terminal names.
///
/// Built once by the grammar compiler's output and treated as read-only
/// for the lifetime of a parse.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    names: HashMap<TypeTag, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display name for a tag. Re-registering a tag overwrites
    /// its previous name.
    pub fn register(&mut self, tag: TypeTag, name: impl Into<String>) {
        self.names.insert(tag, name.into());
    }

    /// Resolve a tag to its registered name.
    ///
    /// # Panics
    /// Panics if `tag` was never registered — this indicates the grammar
    /// compiler produced an automata vector inconsistent with its own type
    /// registrations, a host programming error this crate cannot recover from.
    pub fn name(&self, tag: TypeTag) -> &str {
        self.names.get(&tag).unwrap_or_else(|| {
            panic!(
                "TypeRegistry: tag {} has no registered name (grammar compiler bug)",
                tag.as_u32()
            )
        })
    }

    /// Resolve a tag to its registered name, without panicking.
    pub fn try_name(&self, tag: TypeTag) -> Option<&str> {
        self.names.get(&tag).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
