//! Debug tracing: the engine's stand-in for a logging framework.
//!
//! `Tracer` is statically dispatched so the default [`NoopTracer`] compiles
//! away entirely; [`PrintTracer`] is the opt-in implementation wired up when
//! the `debug` configuration knob is set.

use std::io::Write;

/// Observer invoked at each engine decision point.
///
/// All methods have no-op default bodies, so implementers only override the
/// events they care about.
pub trait Tracer {
    fn enter_automaton(&mut self, _index: usize, _name: &str, _pos: usize) {}
    fn cache_hit(&mut self, _index: usize, _pos: usize, _failed: bool) {}
    fn try_edge(&mut self, _state_index: usize, _edge_index: usize) {}
    fn edge_failed(&mut self, _state_index: usize, _edge_index: usize) {}
    fn char_matched(&mut self, _c: char, _pos: usize) {}
    fn backtrack(&mut self, _pos: usize) {}
    fn error_updated(&mut self, _pos: usize, _line: u32, _column: u32, _non_terminal: &str) {}
}

/// Default, zero-cost tracer. Every call is an empty function the optimizer
/// removes entirely.
#[derive(Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Verbosity gate for [`PrintTracer`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Verbosity {
    /// Only cache hits, backtracks, and error updates.
    Summary,
    /// Everything, including every edge attempt.
    Verbose,
}

/// Writes one line per traced event to an arbitrary sink.
pub struct PrintTracer<W: Write> {
    sink: W,
    verbosity: Verbosity,
}

impl<W: Write> PrintTracer<W> {
    pub fn new(sink: W, verbosity: Verbosity) -> Self {
        Self { sink, verbosity }
    }

    fn writeln(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.sink, "{}", line.as_ref());
    }
}

impl<W: Write> Tracer for PrintTracer<W> {
    fn enter_automaton(&mut self, index: usize, name: &str, pos: usize) {
        if self.verbosity >= Verbosity::Verbose {
            self.writeln(format!("enter #{index} ({name}) @ {pos}"));
        }
    }

    fn cache_hit(&mut self, index: usize, pos: usize, failed: bool) {
        self.writeln(format!(
            "cache hit #{index} @ {pos} -> {}",
            if failed { "failed" } else { "matched" }
        ));
    }

    fn try_edge(&mut self, state_index: usize, edge_index: usize) {
        if self.verbosity >= Verbosity::Verbose {
            self.writeln(format!("try edge state={state_index} edge={edge_index}"));
        }
    }

    fn edge_failed(&mut self, state_index: usize, edge_index: usize) {
        if self.verbosity >= Verbosity::Verbose {
            self.writeln(format!("edge failed state={state_index} edge={edge_index}"));
        }
    }

    fn char_matched(&mut self, c: char, pos: usize) {
        if self.verbosity >= Verbosity::Verbose {
            self.writeln(format!("char {c:?} matched @ {pos}"));
        }
    }

    fn backtrack(&mut self, pos: usize) {
        self.writeln(format!("backtrack to {pos}"));
    }

    fn error_updated(&mut self, pos: usize, line: u32, column: u32, non_terminal: &str) {
        self.writeln(format!(
            "deepest error now {pos} ({line}:{column}) in {non_terminal}"
        ));
    }
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
