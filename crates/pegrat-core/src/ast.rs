//! Parse tree output.

use std::any::Any;
use std::sync::Arc;

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::registry::TypeTag;

/// Input-position interval `[start, end)`.
pub type Span = (usize, usize);

/// Opaque extended-data payload carried by pre-parsed non-terminal nodes.
///
/// Boxed behind `Arc` because the same payload may be cheaply shared between
/// the input's extended-data slot and the AST node captured from it.
pub type ExtendedData = Arc<dyn Any + Send + Sync>;

/// One node of a parsed tree.
#[derive(Clone)]
pub enum Ast {
    /// A node carrying no content: void-mode automata, successful
    /// predicates, and pruned automata with zero children all produce this.
    Empty(TypeTag),
    /// A single matched character, with the position just past it.
    Char(char, TypeTag, usize),
    /// An ordinary non-terminal match.
    Branch(TypeTag, Vec<Ast>, Span),
    /// A span recognized by the host's pre-parsed-non-terminal callback,
    /// opaque to this engine.
    PreParsed(TypeTag, String, Span, Option<ExtendedData>),
}

/// Hand-written because `ExtendedData` wraps `dyn Any`, which has no `Debug`
/// impl to derive against — the payload prints as a placeholder instead.
impl std::fmt::Debug for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ast::Empty(tag) => f.debug_tuple("Empty").field(tag).finish(),
            Ast::Char(c, tag, end) => f.debug_tuple("Char").field(c).field(tag).field(end).finish(),
            Ast::Branch(tag, children, span) => {
                f.debug_tuple("Branch").field(tag).field(children).field(span).finish()
            }
            Ast::PreParsed(tag, name, span, extended) => f
                .debug_tuple("PreParsed")
                .field(tag)
                .field(name)
                .field(span)
                .field(&extended.as_ref().map(|_| "<extended>"))
                .finish(),
        }
    }
}

impl Ast {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Ast::Empty(t) => *t,
            Ast::Char(_, t, _) => *t,
            Ast::Branch(t, _, _) => *t,
            Ast::PreParsed(t, _, _, _) => *t,
        }
    }

    /// Span covered by this node, if it covers one. `Empty` covers none.
    pub fn span(&self) -> Option<Span> {
        match self {
            Ast::Empty(_) => None,
            Ast::Char(_, _, end) => Some((end - 1, *end)),
            Ast::Branch(_, _, span) => Some(*span),
            Ast::PreParsed(_, _, span, _) => Some(*span),
        }
    }

    pub fn is_empty_node(&self) -> bool {
        matches!(self, Ast::Empty(_))
    }

    /// Children of a `Branch`, or an empty slice otherwise.
    pub fn children(&self) -> &[Ast] {
        match self {
            Ast::Branch(_, children, _) => children,
            _ => &[],
        }
    }
}

/// Serializes the shape (not the `TypeTag`, which is meaningless without the
/// registry that named it) — callers who need names should resolve them via
/// a [`crate::registry::TypeRegistry`] before serializing, or wrap nodes in
/// their own named representation.
impl Serialize for Ast {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Ast::Empty(tag) => {
                let mut s = serializer.serialize_struct("Empty", 1)?;
                s.serialize_field("type", &tag.as_u32())?;
                s.end()
            }
            Ast::Char(c, tag, end) => {
                let mut s = serializer.serialize_struct("Char", 3)?;
                s.serialize_field("type", &tag.as_u32())?;
                s.serialize_field("char", c)?;
                s.serialize_field("end", end)?;
                s.end()
            }
            Ast::Branch(tag, children, span) => {
                let mut s = serializer.serialize_struct("Branch", 3)?;
                s.serialize_field("type", &tag.as_u32())?;
                s.serialize_field("span", &[span.0, span.1])?;
                struct Children<'a>(&'a [Ast]);
                impl Serialize for Children<'_> {
                    fn serialize<S2: Serializer>(&self, s: S2) -> Result<S2::Ok, S2::Error> {
                        let mut seq = s.serialize_seq(Some(self.0.len()))?;
                        for child in self.0 {
                            seq.serialize_element(child)?;
                        }
                        seq.end()
                    }
                }
                s.serialize_field("children", &Children(children))?;
                s.end()
            }
            Ast::PreParsed(tag, name, span, _extended) => {
                let mut s = serializer.serialize_struct("PreParsed", 3)?;
                s.serialize_field("type", &tag.as_u32())?;
                s.serialize_field("name", name)?;
                s.serialize_field("span", &[span.0, span.1])?;
                s.end()
            }
        }
    }
}

#[cfg(test)]
#[path = "ast_tests.rs"]
mod tests;
