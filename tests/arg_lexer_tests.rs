// tests/arg_lexer_tests.rs

use std::rc::Rc;

use argtree::{Arg, ArgLexer, Parameter, ParseError, ParseOptions};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn lex(text: &str) -> Arg {
    Arg::parse(text).unwrap()
}

fn params(pairs: &[(&str, &str)]) -> Vec<Parameter> {
    pairs.iter().map(|&(d, v)| Parameter::new(d, v)).collect()
}

// ============================================================================
// Names
// ============================================================================

#[rstest]
#[case("name", "name")]
#[case("name.some", "name")]
#[case("name-it.some", "name-it")]
#[case("`test`", "test")]
#[case("`name different`.x", "name different")]
#[case(".a", "")]
#[case("", "")]
fn test_name(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(lex(input).name, expected);
}

#[test]
fn test_quoted_name_keeps_reserved_characters() {
    let arg = lex("`a.b {c}`:d");
    assert_eq!(arg.name, "a.b {c}");
    assert_eq!(arg.parameters, params(&[(":", "d")]));
}

// ============================================================================
// Parameters
// ============================================================================

#[rstest]
#[case("name", &[])]
#[case("`test`.test", &[(".", "test")])]
#[case("`test`.1.2", &[(".", "1"), (".", "2")])]
#[case("test.`1.5`.2", &[(".", "1.5"), (".", "2")])]
#[case("`test`.1:2", &[(".", "1"), (":", "2")])]
#[case("a.b:c@d", &[(".", "b"), (":", "c"), ("@", "d")])]
#[case("test.", &[(".", "")])]
#[case(".", &[(".", "")])]
#[case("a..b", &[(".", ""), (".", "b")])]
#[case("t.p4.m-2", &[(".", "p4"), (".", "m-2")])]
fn test_parameters(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
    assert_eq!(lex(input).parameters, params(expected));
}

#[test]
fn test_values_may_contain_non_name_characters() {
    let arg = lex("w.1/2:#fff");
    assert_eq!(arg.parameters, params(&[(".", "1/2"), (":", "#fff")]));
}

#[test]
fn test_custom_delimiters() {
    let options = Rc::new(ParseOptions::default().with_delimiters(["#", "."]));
    let arg = ArgLexer::new("test.1#2", options).parse().unwrap();

    assert_eq!(arg.name, "test");
    assert_eq!(arg.parameters, params(&[(".", "1"), ("#", "2")]));
}

#[test]
fn test_multi_character_delimiters() {
    let options = Rc::new(ParseOptions::default().with_delimiters(["=>", "."]));
    let arg = Arg::parse_with("a=>b.c=>d", options).unwrap();

    assert_eq!(arg.parameters, params(&[("=>", "b"), (".", "c"), ("=>", "d")]));
}

#[test]
fn test_custom_quotes() {
    let options = Rc::new(ParseOptions::default().with_quotes('[', ']'));
    let arg = Arg::parse_with("[a b].[1.5]", options).unwrap();

    assert_eq!(arg.name, "a b");
    assert_eq!(arg.parameters, params(&[(".", "1.5")]));
}

#[test]
fn test_arg_keeps_its_options() {
    let options = Rc::new(ParseOptions::default().with_delimiters(["#"]));
    let arg = Arg::parse_with("a#b", Rc::clone(&options)).unwrap();
    assert_eq!(arg.options(), options.as_ref());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_quoted_name() {
    let err = Arg::parse("`abc").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedLiteral {
            text: "`abc".into(),
            position: 0,
        }
    );
}

#[test]
fn test_unterminated_quoted_value() {
    let err = Arg::parse("a.`bc").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedLiteral {
            text: "a.`bc".into(),
            position: 2,
        }
    );
}

#[test]
fn test_missing_delimiter_after_name() {
    let err = Arg::parse("a_b").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingDelimiter {
            text: "a_b".into(),
            position: 1,
            after: "name",
        }
    );
}

#[test]
fn test_missing_delimiter_after_quoted_value() {
    let err = Arg::parse("a.`b`c").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingDelimiter {
            text: "a.`b`c".into(),
            position: 5,
            after: "previous parameter",
        }
    );
}

#[test]
fn test_error_message_names_the_token() {
    let err = Arg::parse("a_b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected a parameter after name at position 1 in 'a_b'"
    );
}
