use super::*;
use pegrat_core::StrInput;
use pegrat_vm::Engine;

#[test]
fn arithmetic_parses_nested_expression() {
    let sample = arithmetic();
    let mut engine = Engine::builder(sample.automata, sample.tags, sample.registry)
        .start_index(sample.start_index)
        .build();
    let mut input = StrInput::new("1+2*(3-4)");
    assert!(engine.parse(&mut input).unwrap().is_ok());
}

#[test]
fn key_value_parses_two_pairs() {
    let sample = key_value();
    let mut engine = Engine::builder(sample.automata, sample.tags, sample.registry)
        .start_index(sample.start_index)
        .build();
    let mut input = StrInput::new("name:pegrat,kind:parser");
    assert!(engine.parse(&mut input).unwrap().is_ok());
}

#[test]
fn key_value_rejects_missing_colon() {
    let sample = key_value();
    let mut engine = Engine::builder(sample.automata, sample.tags, sample.registry)
        .start_index(sample.start_index)
        .build();
    let mut input = StrInput::new("name-pegrat");
    assert!(engine.parse(&mut input).unwrap().is_err());
}
