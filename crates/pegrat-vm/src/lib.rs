//! Packrat-memoizing PEG parse engine.
//!
//! Consumes a grammar compiled elsewhere — a `&[Automaton]` from
//! `pegrat-core` — against an `Input` stream, producing an AST or a
//! structured deepest-failure `ParseError`.

pub mod cache;
pub mod engine;
pub mod error;
pub mod trace;

pub use cache::{Cache, CacheEntry, CachedOutcome};
pub use engine::{Engine, EngineBuilder, ParseResult, PreParsedCallback};
pub use error::{ParseError, RuntimeError};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
