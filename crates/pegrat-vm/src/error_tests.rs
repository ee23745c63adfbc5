use super::*;

#[test]
fn parse_error_display_includes_location() {
    let err = ParseError {
        position: 4,
        line: 2,
        column: 1,
        non_terminal_name: "Expr".to_owned(),
    };
    let msg = err.to_string();
    assert!(msg.contains("2:1"));
    assert!(msg.contains("Expr"));
}

#[test]
fn runtime_error_display_includes_depths() {
    let err = RuntimeError::RecursionLimitExceeded {
        depth: 10,
        max_depth: 10,
    };
    assert!(err.to_string().contains('1'));
}
