//! Hand-assembled demonstration grammars.
//!
//! No grammar compiler exists in this workspace — these build `Automaton`
//! vectors directly as data, which is exactly the input contract the engine
//! expects from one. Each sample returns its automata, sentinel tags,
//! display-name registry, and starting automaton index.

use pegrat_core::{Automaton, CharSetBuilder, Edge, Mode, State, Transition, TypeRegistry, TypeTag, TypeTags};

/// Sentinel tags shared by every sample: grammar-specific tags start at 10.
fn sentinel_tags() -> TypeTags {
    TypeTags {
        empty: TypeTag::from_raw(0),
        char: TypeTag::from_raw(1),
        pre_parsed_non_terminal: TypeTag::from_raw(2),
        positive_predicate: TypeTag::from_raw(3),
        negative_predicate: TypeTag::from_raw(4),
    }
}

fn char_edge(set: pegrat_core::CharSet, next: usize) -> Edge {
    Edge::new(Transition::Char(set), next, false)
}

fn call_edge(automaton_index: usize, next: usize) -> Edge {
    Edge::new(Transition::Automaton(automaton_index), next, false)
}

/// One compiled sample: automata, tags, registry, and the entry point.
pub struct Sample {
    pub automata: Vec<Automaton>,
    pub tags: TypeTags,
    pub registry: TypeRegistry,
    pub start_index: usize,
}

/// `Expr <- Term (AddOp Term)*`, `Term <- Factor (MulOp Factor)*`,
/// `Factor <- Number / '(' Expr ')'`, `Number <- [0-9]+`.
pub fn arithmetic() -> Sample {
    let tags = sentinel_tags();
    let digit = || CharSetBuilder::new().range('0', '9').build();
    let add_op = || CharSetBuilder::new().char('+').char('-').build();
    let mul_op = || CharSetBuilder::new().char('*').char('/').build();

    let expr = Automaton::new(
        TypeTag::from_raw(10),
        Mode::Normal,
        vec![
            State::new(vec![call_edge(1, 1)], false),
            State::new(vec![call_edge(4, 2)], true),
            State::new(vec![call_edge(1, 1)], false),
        ],
    );
    let term = Automaton::new(
        TypeTag::from_raw(11),
        Mode::Normal,
        vec![
            State::new(vec![call_edge(2, 1)], false),
            State::new(vec![call_edge(5, 2)], true),
            State::new(vec![call_edge(2, 1)], false),
        ],
    );
    let factor = Automaton::new(
        TypeTag::from_raw(12),
        Mode::Normal,
        vec![
            State::new(
                vec![
                    call_edge(3, 3),
                    char_edge(CharSetBuilder::new().char('(').build(), 1),
                ],
                false,
            ),
            State::new(vec![call_edge(0, 2)], false),
            State::new(vec![char_edge(CharSetBuilder::new().char(')').build(), 3)], false),
            State::new(vec![], true),
        ],
    );
    let number = Automaton::new(
        TypeTag::from_raw(13),
        Mode::Normal,
        vec![
            State::new(vec![char_edge(digit(), 1)], false),
            State::new(vec![char_edge(digit(), 1)], true),
        ],
    );
    let add_op_automaton = Automaton::new(
        TypeTag::from_raw(14),
        Mode::Prune,
        vec![
            State::new(vec![char_edge(add_op(), 1)], false),
            State::new(vec![], true),
        ],
    );
    let mul_op_automaton = Automaton::new(
        TypeTag::from_raw(15),
        Mode::Prune,
        vec![
            State::new(vec![char_edge(mul_op(), 1)], false),
            State::new(vec![], true),
        ],
    );

    let mut registry = TypeRegistry::new();
    registry.register(TypeTag::from_raw(10), "Expr");
    registry.register(TypeTag::from_raw(11), "Term");
    registry.register(TypeTag::from_raw(12), "Factor");
    registry.register(TypeTag::from_raw(13), "Number");
    registry.register(TypeTag::from_raw(14), "AddOp");
    registry.register(TypeTag::from_raw(15), "MulOp");
    registry.register(tags.char, "char");

    Sample {
        automata: vec![expr, term, factor, number, add_op_automaton, mul_op_automaton],
        tags,
        registry,
        start_index: 0,
    }
}

/// `Doc <- Pair (',' Pair)*`, `Pair <- Key ':' Value`,
/// `Key <- [a-zA-Z_]+`, `Value <- [a-zA-Z0-9_]+`.
pub fn key_value() -> Sample {
    let tags = sentinel_tags();
    let key_set = || {
        CharSetBuilder::new()
            .range('a', 'z')
            .range('A', 'Z')
            .char('_')
            .build()
    };
    let value_set = || {
        CharSetBuilder::new()
            .range('a', 'z')
            .range('A', 'Z')
            .range('0', '9')
            .char('_')
            .build()
    };

    let doc = Automaton::new(
        TypeTag::from_raw(20),
        Mode::Normal,
        vec![
            State::new(vec![call_edge(1, 1)], false),
            State::new(vec![char_edge(CharSetBuilder::new().char(',').build(), 2)], true),
            State::new(vec![call_edge(1, 1)], false),
        ],
    );
    let pair = Automaton::new(
        TypeTag::from_raw(21),
        Mode::Normal,
        vec![
            State::new(vec![call_edge(2, 1)], false),
            State::new(vec![char_edge(CharSetBuilder::new().char(':').build(), 2)], false),
            State::new(vec![call_edge(3, 3)], false),
            State::new(vec![], true),
        ],
    );
    let key = Automaton::new(
        TypeTag::from_raw(22),
        Mode::Normal,
        vec![
            State::new(vec![char_edge(key_set(), 1)], false),
            State::new(vec![char_edge(key_set(), 1)], true),
        ],
    );
    let value = Automaton::new(
        TypeTag::from_raw(23),
        Mode::Normal,
        vec![
            State::new(vec![char_edge(value_set(), 1)], false),
            State::new(vec![char_edge(value_set(), 1)], true),
        ],
    );

    let mut registry = TypeRegistry::new();
    registry.register(TypeTag::from_raw(20), "Doc");
    registry.register(TypeTag::from_raw(21), "Pair");
    registry.register(TypeTag::from_raw(22), "Key");
    registry.register(TypeTag::from_raw(23), "Value");
    registry.register(tags.char, "char");

    Sample {
        automata: vec![doc, pair, key, value],
        tags,
        registry,
        start_index: 0,
    }
}

#[cfg(test)]
#[path = "samples_tests.rs"]
mod tests;
