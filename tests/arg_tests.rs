// tests/arg_tests.rs

use argtree::{Arg, Error, Matcher, NameReplacer, Parameter, Replacement, Replacer};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn params(pairs: &[(&str, &str)]) -> Vec<Parameter> {
    pairs.iter().map(|&(d, v)| Parameter::new(d, v)).collect()
}

fn pattern(re: &str) -> Matcher {
    Matcher::pattern(re).unwrap()
}

// ============================================================================
// Name
// ============================================================================

#[test]
fn test_set_name_when_empty() {
    let mut arg = Arg::new("", [(".", "a")]);
    arg.set_name_if_not_exists("set");
    assert_eq!(arg.name, "set");
}

#[test]
fn test_set_name_keeps_existing_name() {
    let mut arg = Arg::new("name", [(".", "a")]);
    arg.set_name_if_not_exists("set");
    assert_eq!(arg.name, "name");
}

#[test]
fn test_transform_name_literal() {
    let mut arg = Arg::named("name");
    assert!(arg.transform_name("name", "changed"));
    assert_eq!(arg.name, "changed");
}

#[test]
fn test_transform_name_literal_needs_whole_name() {
    let mut arg = Arg::named("name");
    assert!(!arg.transform_name("nam", "changed"));
    assert_eq!(arg.name, "name");
}

#[test]
fn test_transform_name_pattern_with_reference() {
    let mut arg = Arg::named("name");
    arg.transform_name(pattern("n(.*)"), "k$1");
    assert_eq!(arg.name, "kame");
}

#[test]
fn test_transform_name_function() {
    let mut arg = Arg::named("name");
    arg.transform_name(pattern("n(.*)"), NameReplacer::with(|_| "new".to_string()));
    assert_eq!(arg.name, "new");
}

#[test]
fn test_transform_name_rules_stop_at_first_match() {
    let rules = vec![
        (Matcher::from("a"), NameReplacer::from("article")),
        (Matcher::from("t"), NameReplacer::from("test")),
        (pattern("n(.*)"), NameReplacer::with(|_| "new".to_string())),
        (pattern(".*"), NameReplacer::from("fallback")),
    ];

    let cases = vec![("name", "new"), ("t", "test"), ("a", "article"), ("x", "fallback")];
    for (name, expected) in cases {
        let mut arg = Arg::named(name);
        assert!(arg.transform_name_rules(&rules));
        assert_eq!(arg.name, expected, "rules applied to '{}'", name);
    }
}

#[test]
fn test_transform_name_rules_without_match() {
    let rules = vec![(Matcher::from("a"), NameReplacer::from("article"))];
    let mut arg = Arg::named("b");
    assert!(!arg.transform_name_rules(&rules));
    assert_eq!(arg.name, "b");
}

#[test]
fn test_rewrite_whole_arg() {
    let mut arg = Arg::named("name");
    arg.add("class");
    arg.rewrite("changed.changed").unwrap();
    assert_eq!(arg.to_text(), "changed.changed");
}

#[test]
fn test_rewrite_rejects_bad_token() {
    let mut arg = Arg::parse("a.b").unwrap();
    assert!(arg.rewrite("`open").is_err());
    assert_eq!(arg.to_text(), "a.b");
}

// ============================================================================
// Adding and Popping
// ============================================================================

#[test]
fn test_add() {
    let mut arg = Arg::new("name", [(".", "a")]);
    arg.add("nice");
    assert_eq!(arg.parameters, params(&[(".", "a"), (".", "nice")]));
}

#[test]
fn test_add_at() {
    let mut arg = Arg::new("name", [(".", "a")]);
    arg.add_at("content", ":");
    assert_eq!(arg.to_text(), "name.a:content");
}

#[test]
fn test_add_if_not_exists() {
    let mut arg = Arg::new("name", [(".", "a")]);
    arg.add_if_not_exists("nice");
    arg.add_if_not_exists("a");
    arg.add_if_not_exists_at("a", ":");
    assert_eq!(
        arg.parameters,
        params(&[(".", "a"), (".", "nice"), (":", "a")])
    );
}

#[test]
fn test_pop_literal() {
    let mut arg = Arg::new("name", [(".", "a")]);
    assert_eq!(arg.pop("a"), Some("a".to_string()));
    assert!(arg.parameters.is_empty());
}

#[test]
fn test_pop_pattern() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "-")]);
    assert_eq!(arg.pop(pattern(r"\w+")), Some("a".to_string()));
    assert_eq!(arg.parameters, params(&[(".", "-")]));
}

#[test]
fn test_pop_only_looks_at_its_delimiter() {
    let mut arg = Arg::new("name", [(":", "a")]);
    assert_eq!(arg.pop("a"), None);
    assert_eq!(arg.pop_at("a", ":"), Some("a".to_string()));
}

#[test]
fn test_pop_many_pattern() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "b"), (".", "-")]);
    assert_eq!(arg.pop_many(pattern(r"\w+")), vec!["a", "b"]);
    assert_eq!(arg.parameters, params(&[(".", "-")]));
}

#[test]
fn test_pop_many_keeps_unmatched_order() {
    let mut arg = Arg::parse("n.1.x:2.y.3@z").unwrap();
    let popped = arg.pop_many(pattern(r"^\d$"));
    assert_eq!(popped, vec!["1", "3"]);
    assert_eq!(arg.to_text(), "n.x:2.y@z");
}

#[test]
fn test_pop_and_pop_many_agree() {
    let original = Arg::parse("n.p1.m2.x.p3:p4").unwrap();
    let matcher = pattern(r"^[pm]\d$");

    let mut by_many = original.clone();
    let many = by_many.pop_many(matcher.clone());

    let mut by_one = original.clone();
    let mut one_by_one = Vec::new();
    while let Some(value) = by_one.pop(matcher.clone()) {
        one_by_one.push(value);
    }

    assert_eq!(many, one_by_one);
    assert_eq!(by_many, by_one);
}

#[test]
fn test_pop_apply() {
    let mut arg = Arg::new("name", [(".", "a")]);
    let applied = arg.pop_apply("a", |arg, _| arg.add("b"));
    assert!(applied);
    assert_eq!(arg.parameters, params(&[(".", "b")]));
}

#[test]
fn test_pop_apply_receives_the_value() {
    let mut arg = Arg::parse("t.p4").unwrap();
    arg.pop_apply(pattern(r"^p\d$"), |arg, value| {
        arg.add(format!("padding-{}", &value[1..]));
    });
    assert_eq!(arg.to_text(), "t.padding-4");
}

#[test]
fn test_pop_apply_with_empty_value() {
    let mut arg = Arg::parse("test.").unwrap();
    let mut seen = None;
    assert!(arg.pop_apply("", |_, value| seen = Some(value)));
    assert_eq!(seen, Some(String::new()));
}

#[test]
fn test_pop_apply_without_match() {
    let mut arg = Arg::new("name", [(".", "a")]);
    let applied = arg.pop_apply("x", |_, _| panic!("should not be called"));
    assert!(!applied);
    assert_eq!(arg.parameters, params(&[(".", "a")]));
}

// ============================================================================
// Replace
// ============================================================================

#[test]
fn test_replace_with_string() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "b")]);
    arg.replace("a", "x");
    assert_eq!(arg.parameters, params(&[(".", "x"), (".", "b")]));
}

#[test]
fn test_replace_leaves_other_delimiters() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "b"), (":", "content")]);
    arg.replace("a", "x");
    assert_eq!(
        arg.parameters,
        params(&[(".", "x"), (".", "b"), (":", "content")])
    );
}

#[test]
fn test_replace_with_list() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "b")]);
    arg.replace("a", ["c", "d"]);
    assert_eq!(arg.parameters, params(&[(".", "c"), (".", "d"), (".", "b")]));
}

#[test]
fn test_replace_with_function_returning_one() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "b")]);
    arg.replace("a", Replacer::with(|x| format!("{x}b").into()));
    assert_eq!(arg.parameters, params(&[(".", "ab"), (".", "b")]));
}

#[test]
fn test_replace_with_function_returning_many() {
    let mut arg = Arg::new("name", [(".", "a"), (".", "b")]);
    arg.replace(
        "a",
        Replacer::with(|x| Replacement::Many(vec![format!("{x}b"), "c".to_string()])),
    );
    assert_eq!(arg.parameters, params(&[(".", "ab"), (".", "c"), (".", "b")]));
}

#[test]
fn test_replace_function_called_per_value() {
    let mut arg = Arg::parse("n.p1.p2").unwrap();
    arg.replace(pattern(r"^p\d$"), Replacer::with(|x| x.to_uppercase().into()));
    assert_eq!(arg.to_text(), "n.P1.P2");
}

#[test]
fn test_replace_pattern() {
    let mut arg = Arg::new("name", [(".", "p6"), (".", "m4")]);
    arg.replace(pattern(r"[a-z]\d+"), "changed");
    assert_eq!(arg.parameters, params(&[(".", "changed"), (".", "changed")]));
}

#[test]
fn test_replace_pattern_with_references() {
    let mut arg = Arg::new("name", [(".", "p6"), (".", "m4")]);
    arg.replace(pattern(r"([a-z])(\d+)"), "$1-$2");
    assert_eq!(arg.parameters, params(&[(".", "p-6"), (".", "m-4")]));
}

#[test]
fn test_replace_pattern_only_first_match_in_value() {
    let mut arg = Arg::parse("n.a1b2").unwrap();
    arg.replace(pattern(r"\d"), "#");
    assert_eq!(arg.all(), vec!["a#b2"]);
}

#[test]
fn test_replace_at() {
    let mut arg = Arg::parse("n.a:a").unwrap();
    arg.replace_at("a", "b", ":");
    assert_eq!(arg.to_text(), "n.a:b");
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_all() {
    let mut arg = Arg::new("name", [(".", "p6"), (".", "m4"), (":", "content")]);
    arg.pop("p6");
    assert_eq!(arg.all(), vec!["m4"]);
    assert_eq!(arg.all_at(":"), vec!["content"]);
    assert!(arg.all_at("@").is_empty());
}

#[test]
fn test_one() {
    let arg = Arg::new("name", [(".", "p6"), (".", "m4"), (":", "content")]);
    assert_eq!(arg.one_at(":"), Ok(Some("content")));
    assert_eq!(arg.one_at("?"), Ok(None));
    assert_eq!(
        arg.one(),
        Err(Error::Ambiguous {
            text: "name.p6.m4:content".into(),
            delimiter: ".".into(),
        })
    );
}

#[rstest]
#[case("a.x.y", "a.x.y", true, true)]
#[case("a.x.y", "a.y.x", false, true)]
#[case("a.x", "b.x", false, false)]
#[case("a.x", "a.x.y", false, false)]
#[case("a.x:y", "a:y.x", false, true)]
#[case("a.x.x", "a.x.y", false, false)]
// The left side's values are compared as a set against the right side's list.
#[case("a.x.y", "a.x.x", false, true)]
fn test_equals(
    #[case] left: &str,
    #[case] right: &str,
    #[case] strict: bool,
    #[case] loose: bool,
) {
    let left = Arg::parse(left).unwrap();
    let right = Arg::parse(right).unwrap();
    assert_eq!(left.equals(&right, true), strict);
    assert_eq!(left.equals(&right, false), loose);
}

#[rstest]
#[case("a.x.y:z", "a.x", true)]
#[case("a.x.y:z", "a:z.y", true)]
#[case("a.x.y:z", "a", true)]
#[case("a.x.y:z", "a.w", false)]
#[case("a.x.y:z", "a:x", false)]
#[case("a.x.y:z", "b.x", false)]
fn test_contains(#[case] arg: &str, #[case] other: &str, #[case] expected: bool) {
    let arg = Arg::parse(arg).unwrap();
    assert_eq!(arg.contains_text(other).unwrap(), expected);
}

// ============================================================================
// Serialization
// ============================================================================

#[rstest]
#[case("name", &[(".", "p6"), (".", "m4"), (":", "content")], "name.p6.m4:content")]
#[case("name different", &[(".", "p6"), (".", "m4"), (":", "content")], "`name different`.p6.m4:content")]
#[case("name", &[(".", "p6.test"), (".", "m4"), (":", "content")], "name.`p6.test`.m4:content")]
#[case("name", &[(".", "x y")], "name.`x y`")]
#[case("name", &[(".", "{x}")], "name.`{x}`")]
#[case("", &[(".", "")], ".")]
#[case("w", &[(".", "1/2")], "w.1/2")]
fn test_to_text(#[case] name: &str, #[case] pairs: &[(&str, &str)], #[case] expected: &str) {
    let arg = Arg::new(name, params(pairs));
    assert_eq!(arg.to_text(), expected);
    assert_eq!(arg.to_string(), expected);
}

#[rstest]
#[case("name.some")]
#[case("test.`1.5`.2")]
#[case("`a b`.c:`d e`@f")]
#[case("x..y:")]
fn test_serialization_round_trip(#[case] text: &str) {
    let arg = Arg::parse(text).unwrap();
    let reparsed = Arg::parse(&arg.to_text()).unwrap();
    assert_eq!(reparsed, arg);
    assert_eq!(reparsed.to_text(), arg.to_text());
}
