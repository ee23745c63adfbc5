//! The packrat-memoizing PEG matcher.
//!
//! This module holds the whole recursive descent: `match_automaton` walks
//! one non-terminal's states, `match_state`/`match_edges`/`match_edge` walk
//! its edges, and transition matching handles the four leaf cases. Every
//! layer is plain recursion — the only thing standing between a pathological
//! grammar and a native stack overflow is `max_depth`.

use pegrat_core::{Ast, Automaton, Edge, Input, Mode, Transition, TypeRegistry, TypeRole, TypeTag, TypeTags};

use crate::cache::{Cache, CacheEntry, CachedOutcome};
use crate::error::{ParseError, RuntimeError};
use crate::trace::{NoopTracer, Tracer};

/// Host callback recognizing a pre-parsed non-terminal span by name.
///
/// Returns the number of characters matched (`>= 0`), or a negative value
/// for "no match" — the C-like sign convention is kept verbatim so any
/// negative value, not just `-1`, is honored as failure.
pub type PreParsedCallback = dyn Fn(&str, &mut dyn Input) -> i64;

/// `Engine::parse`'s happy-path output: exactly one of AST or error, never
/// both.
pub type ParseResult = Result<Ast, ParseError>;

/// Builds an [`Engine`] with sensible defaults: EOF-checked, a 4096-frame
/// recursion cap, no pre-parsed-NT callback, and a no-op tracer.
pub struct EngineBuilder {
    automata: Vec<Automaton>,
    tags: TypeTags,
    registry: TypeRegistry,
    start_index: usize,
    eof_check: bool,
    max_depth: u32,
    pre_parsed_callback: Option<Box<PreParsedCallback>>,
    tracer: Box<dyn Tracer>,
}

impl EngineBuilder {
    pub fn new(automata: Vec<Automaton>, tags: TypeTags, registry: TypeRegistry) -> Self {
        Self {
            automata,
            tags,
            registry,
            start_index: 0,
            eof_check: true,
            max_depth: 4096,
            pre_parsed_callback: None,
            tracer: Box::new(NoopTracer),
        }
    }

    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    pub fn eof_check(mut self, eof_check: bool) -> Self {
        self.eof_check = eof_check;
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn pre_parsed_callback(
        mut self,
        callback: impl Fn(&str, &mut dyn Input) -> i64 + 'static,
    ) -> Self {
        self.pre_parsed_callback = Some(Box::new(callback));
        self
    }

    pub fn tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Box::new(tracer);
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            automata: self.automata,
            tags: self.tags,
            registry: self.registry,
            start_index: self.start_index,
            eof_check: self.eof_check,
            max_depth: self.max_depth,
            pre_parsed_callback: self.pre_parsed_callback,
            tracer: self.tracer,
        }
    }
}

/// A compiled grammar bound to a runnable configuration.
///
/// Owns its automata vector rather than borrowing it: builders hand a
/// grammar to an `Engine` once and keep re-running `parse` against it, so
/// ownership here avoids threading a grammar lifetime through every caller.
pub struct Engine {
    automata: Vec<Automaton>,
    tags: TypeTags,
    registry: TypeRegistry,
    start_index: usize,
    eof_check: bool,
    max_depth: u32,
    pre_parsed_callback: Option<Box<PreParsedCallback>>,
    tracer: Box<dyn Tracer>,
}

impl Engine {
    pub fn builder(automata: Vec<Automaton>, tags: TypeTags, registry: TypeRegistry) -> EngineBuilder {
        EngineBuilder::new(automata, tags, registry)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Parse `input` against this grammar.
    ///
    /// The outer `Result` is engine-level: `Err` only for resource
    /// exhaustion (`max_depth`). The inner `Result` is the ordinary
    /// grammar-level outcome.
    pub fn parse(&mut self, input: &mut dyn Input) -> Result<ParseResult, RuntimeError> {
        let mut ctx = Ctx {
            automata: &self.automata,
            tags: self.tags,
            registry: &self.registry,
            max_depth: self.max_depth,
            pre_parsed_callback: self.pre_parsed_callback.as_deref(),
            tracer: &mut *self.tracer,
            cache: Cache::new(),
            stack: Vec::new(),
            depth: 0,
            line: 1,
            column: 0,
            last_cr: false,
            error_pos: 0,
            error_line: 1,
            error_column: 0,
            error_nt: String::new(),
        };

        let outcome = ctx.match_automaton(input, self.start_index)?;

        let result = match outcome {
            CachedOutcome::Failed => Err(ctx.make_error()),
            CachedOutcome::Matched(mut children) => {
                let ast = children.pop().expect("automaton always yields one node");
                if self.eof_check && input.peek().is_some() {
                    Err(ctx.make_error())
                } else {
                    Ok(ast)
                }
            }
        };

        Ok(result)
    }
}

/// Cursor snapshot, restored verbatim on backtrack or cache hit.
struct Snapshot {
    pos: usize,
    extended: Option<pegrat_core::ExtendedData>,
    line: u32,
    column: u32,
    last_cr: bool,
}

/// Transient per-parse state: cache, call stack, cursor tracking, deepest
/// error. Constructed fresh in `Engine::parse` and dropped at its end —
/// nothing here outlives one parse.
struct Ctx<'a> {
    automata: &'a [Automaton],
    tags: TypeTags,
    registry: &'a TypeRegistry,
    max_depth: u32,
    pre_parsed_callback: Option<&'a PreParsedCallback>,
    tracer: &'a mut dyn Tracer,
    cache: Cache,
    stack: Vec<TypeTag>,
    depth: u32,
    line: u32,
    column: u32,
    last_cr: bool,
    error_pos: usize,
    error_line: u32,
    error_column: u32,
    error_nt: String,
}

impl<'a> Ctx<'a> {
    fn snapshot(&self, input: &dyn Input) -> Snapshot {
        Snapshot {
            pos: input.position(),
            extended: input.extended_data(),
            line: self.line,
            column: self.column,
            last_cr: self.last_cr,
        }
    }

    fn restore(&mut self, input: &mut dyn Input, snap: &Snapshot) {
        input.set_position(snap.pos);
        input.set_extended_data(snap.extended.clone());
        self.line = snap.line;
        self.column = snap.column;
        self.last_cr = snap.last_cr;
        self.tracer.backtrack(snap.pos);
    }

    fn make_error(&self) -> ParseError {
        ParseError {
            position: self.error_pos,
            line: self.error_line,
            column: self.error_column,
            non_terminal_name: self.error_nt.clone(),
        }
    }

    fn update_error(&mut self, input: &dyn Input, automaton_idx: usize) {
        let pos = input.position();
        if pos > self.error_pos {
            let name = self
                .registry
                .name(self.automata[automaton_idx].type_tag)
                .to_owned();
            self.error_pos = pos;
            self.error_line = self.line;
            self.error_column = self.column;
            self.tracer
                .error_updated(pos, self.line, self.column, &name);
            self.error_nt = name;
        }
    }

    fn update_line_col(&mut self, c: char) {
        match c {
            '\r' => {
                self.line += 1;
                self.column = 0;
                self.last_cr = true;
            }
            '\n' => {
                if !self.last_cr {
                    self.line += 1;
                    self.column = 0;
                }
                self.last_cr = false;
            }
            _ => {
                self.column += 1;
                self.last_cr = false;
            }
        }
    }

    fn match_automaton(
        &mut self,
        input: &mut dyn Input,
        index: usize,
    ) -> Result<CachedOutcome, RuntimeError> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::RecursionLimitExceeded {
                depth: self.depth,
                max_depth: self.max_depth,
            });
        }

        let automaton = &self.automata[index];
        let name = self.registry.try_name(automaton.type_tag).unwrap_or("?");
        self.tracer.enter_automaton(index, name, input.position());

        let start = self.snapshot(input);

        if let Some(entry) = self.cache.get(index, start.pos) {
            let entry = entry.clone();
            input.set_position(entry.end_pos);
            input.set_extended_data(entry.end_extended.clone());
            self.line = entry.end_line;
            self.column = entry.end_column;
            self.last_cr = entry.end_last_cr;
            self.tracer
                .cache_hit(index, start.pos, entry.result.is_failed());
            return Ok(entry.result);
        }

        self.stack.push(automaton.type_tag);
        self.depth += 1;
        let res = self.match_state(input, index, 0)?;
        self.depth -= 1;
        self.stack.pop();

        let role = self.tags.role_of(automaton.type_tag);
        let outcome = match role {
            TypeRole::PositivePredicate => {
                self.restore(input, &start);
                if res.is_failed() {
                    CachedOutcome::Failed
                } else {
                    CachedOutcome::Matched(vec![Ast::Empty(automaton.type_tag)])
                }
            }
            TypeRole::NegativePredicate => {
                self.restore(input, &start);
                if res.is_failed() {
                    CachedOutcome::Matched(vec![Ast::Empty(automaton.type_tag)])
                } else {
                    self.update_error(input, index);
                    CachedOutcome::Failed
                }
            }
            TypeRole::Ordinary => match res {
                CachedOutcome::Failed => {
                    self.update_error(input, index);
                    CachedOutcome::Failed
                }
                CachedOutcome::Matched(children) => {
                    CachedOutcome::Matched(vec![self.build_node(automaton, children, start.pos, input.position())])
                }
            },
        };

        let entry = CacheEntry {
            result: outcome.clone(),
            end_pos: input.position(),
            end_extended: input.extended_data(),
            end_line: self.line,
            end_column: self.column,
            end_last_cr: self.last_cr,
        };
        self.cache.insert(index, start.pos, entry);

        Ok(outcome)
    }

    fn build_node(&self, automaton: &Automaton, children: Vec<Ast>, start_pos: usize, end_pos: usize) -> Ast {
        match automaton.mode {
            Mode::Void => Ast::Empty(automaton.type_tag),
            Mode::Prune => match children.len() {
                0 => Ast::Empty(automaton.type_tag),
                1 => children.into_iter().next().unwrap(),
                _ => Ast::Branch(automaton.type_tag, children, (start_pos, end_pos)),
            },
            Mode::Normal => Ast::Branch(automaton.type_tag, children, (start_pos, end_pos)),
        }
    }

    fn match_state(
        &mut self,
        input: &mut dyn Input,
        automaton_idx: usize,
        state_index: usize,
    ) -> Result<CachedOutcome, RuntimeError> {
        let state = &self.automata[automaton_idx].states[state_index];
        let edges_result = self.match_edges(input, automaton_idx, &state.edges, 0)?;
        if !edges_result.is_failed() {
            return Ok(edges_result);
        }
        if state.is_match {
            Ok(CachedOutcome::Matched(Vec::new()))
        } else {
            Ok(CachedOutcome::Failed)
        }
    }

    fn match_edges(
        &mut self,
        input: &mut dyn Input,
        automaton_idx: usize,
        edges: &[Edge],
        i: usize,
    ) -> Result<CachedOutcome, RuntimeError> {
        if i >= edges.len() {
            return Ok(CachedOutcome::Failed);
        }
        self.tracer.try_edge(automaton_idx, i);
        let res = self.match_edge(input, automaton_idx, &edges[i])?;
        if res.is_failed() {
            self.tracer.edge_failed(automaton_idx, i);
            self.match_edges(input, automaton_idx, edges, i + 1)
        } else {
            Ok(res)
        }
    }

    fn match_edge(
        &mut self,
        input: &mut dyn Input,
        automaton_idx: usize,
        edge: &Edge,
    ) -> Result<CachedOutcome, RuntimeError> {
        let start = self.snapshot(input);

        let head = match self.match_transition(input, automaton_idx, &edge.transition)? {
            None => return Ok(CachedOutcome::Failed),
            Some(head) => head,
        };

        let tail = self.match_state(input, automaton_idx, edge.next_state)?;
        let mut children = match tail {
            CachedOutcome::Failed => {
                self.restore(input, &start);
                return Ok(CachedOutcome::Failed);
            }
            CachedOutcome::Matched(children) => children,
        };

        // Suppression is driven solely by `edge.voided` — the fixed
        // convention (see DESIGN.md) treats a predicate's `Empty` head as a
        // real node that belongs in the parent's child list, not as an
        // automatic no-op the way a bare `None` head would be.
        if edge.voided {
            Ok(CachedOutcome::Matched(children))
        } else {
            children.insert(0, head);
            Ok(CachedOutcome::Matched(children))
        }
    }

    fn match_transition(
        &mut self,
        input: &mut dyn Input,
        automaton_idx: usize,
        transition: &Transition,
    ) -> Result<Option<Ast>, RuntimeError> {
        match transition {
            Transition::Char(set) => match input.peek() {
                Some(c) if set.contains(c) => {
                    input.consume();
                    self.update_line_col(c);
                    let pos = input.position();
                    self.tracer.char_matched(c, pos);
                    Ok(Some(Ast::Char(c, self.tags.char, pos)))
                }
                _ => {
                    self.update_error(input, automaton_idx);
                    Ok(None)
                }
            },
            Transition::Wildcard => match input.peek() {
                Some(c) => {
                    input.consume();
                    self.update_line_col(c);
                    let pos = input.position();
                    self.tracer.char_matched(c, pos);
                    Ok(Some(Ast::Char(c, self.tags.char, pos)))
                }
                None => {
                    self.update_error(input, automaton_idx);
                    Ok(None)
                }
            },
            Transition::Automaton(idx) => match self.match_automaton(input, *idx)? {
                CachedOutcome::Failed => Ok(None),
                CachedOutcome::Matched(mut children) => {
                    Ok(Some(children.pop().expect("automaton always yields one node")))
                }
            },
            Transition::PreParsedNonTerminal(name) => {
                let start_pos = input.position();
                let start_extended = input.extended_data();
                let Some(callback) = self.pre_parsed_callback else {
                    self.update_error(input, automaton_idx);
                    return Ok(None);
                };
                let skip = callback(name, input);
                if skip < 0 {
                    self.update_error(input, automaton_idx);
                    Ok(None)
                } else {
                    let end_pos = start_pos + skip as usize;
                    input.set_position(end_pos);
                    Ok(Some(Ast::PreParsed(
                        self.tags.pre_parsed_non_terminal,
                        name.clone(),
                        (start_pos, end_pos),
                        start_extended,
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
