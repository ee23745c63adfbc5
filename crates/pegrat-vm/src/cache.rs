//! Packrat memoization cache.
//!
//! Keyed by `(automaton_index, start_pos)`, not `(state_index, pos)`:
//! `match_edge` prepends its head onto the child list returned by the
//! recursive `match_state` call it wraps, so a state-level cache would need
//! to clone that list on every hit to avoid one hit's prepend corrupting
//! another's — memoizing at the automaton boundary avoids the problem
//! entirely, since a fresh `Vec` is only ever handed back once per entry.

use std::collections::HashMap;

use pegrat_core::{Ast, ExtendedData};

/// Memoized match result. `Failed` is a distinct, cacheable state — not the
/// absence of an entry — since a grammar can legitimately require re-probing
/// "this automaton fails to match starting here" many times.
#[derive(Clone, Debug)]
pub enum CachedOutcome {
    Matched(Vec<Ast>),
    Failed,
}

impl CachedOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, CachedOutcome::Failed)
    }
}

/// Cursor and error-tracking state to restore verbatim on a cache hit, so a
/// hit is observably identical to re-running the match.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub result: CachedOutcome,
    pub end_pos: usize,
    pub end_extended: Option<ExtendedData>,
    pub end_line: u32,
    pub end_column: u32,
    pub end_last_cr: bool,
}

/// One parse's memo table. Never shared across parses: its keys embed
/// positions meaningful only for the input instance that produced them.
#[derive(Debug, Default)]
pub struct Cache {
    entries: HashMap<(usize, usize), CacheEntry>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, automaton_index: usize, start_pos: usize) -> Option<&CacheEntry> {
        self.entries.get(&(automaton_index, start_pos))
    }

    pub fn insert(&mut self, automaton_index: usize, start_pos: usize, entry: CacheEntry) {
        self.entries.insert((automaton_index, start_pos), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
