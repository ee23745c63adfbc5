//! Core data structures for the pegrat PEG runtime.
//!
//! This crate is pure data: the automaton/transition/AST shapes the engine
//! (`pegrat-vm`) walks, plus the `Input` contract it walks them against.
//! It has no parsing logic of its own.

pub mod ast;
pub mod automaton;
pub mod charset;
pub mod input;
pub mod registry;

pub use ast::{Ast, ExtendedData, Span};
pub use automaton::{Automaton, Edge, Mode, State, Transition, TypeRole, TypeTags};
pub use charset::{CharSet, CharSetBuilder};
pub use input::{Input, StrInput};
pub use registry::{TypeRegistry, TypeTag};
