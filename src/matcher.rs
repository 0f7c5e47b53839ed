//! Matchers, replacers and selectors consumed by the argument and tree
//! operations.
//!
//! Each is a small closed enum built at the call site through `From`
//! conversions, so `arg.pop("a")`, `arg.pop(Matcher::pattern(r"\w+")?)` and
//! `arg.replace("a", ["c", "d"])` all read naturally.

use std::{fmt, rc::Rc};

use regex::Regex;

use crate::{ast::Arg, error::ParseError, options::ParseOptions};

/// Tests a parameter value or a name.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches a value equal to the string
    Literal(String),
    /// Matches a value the regex finds a match in (unanchored)
    Pattern(Regex),
}

impl Matcher {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Matcher::Pattern)
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Matcher::Literal(literal) => value == literal,
            Matcher::Pattern(regex) => regex.is_match(value),
        }
    }

    /// Replaces the matched part of `value` with `replacement`.
    ///
    /// A literal always matches the whole value. A pattern replaces its first
    /// match and expands `$1` / `${name}` references to capture groups.
    pub fn substitute(&self, value: &str, replacement: &str) -> String {
        match self {
            Matcher::Literal(_) => replacement.to_string(),
            Matcher::Pattern(regex) => regex.replacen(value, 1, replacement).into_owned(),
        }
    }
}

impl From<&str> for Matcher {
    fn from(literal: &str) -> Self {
        Matcher::Literal(literal.to_string())
    }
}

impl From<String> for Matcher {
    fn from(literal: String) -> Self {
        Matcher::Literal(literal)
    }
}

impl From<&String> for Matcher {
    fn from(literal: &String) -> Self {
        Matcher::Literal(literal.clone())
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Matcher::Pattern(regex)
    }
}

impl From<&Regex> for Matcher {
    fn from(regex: &Regex) -> Self {
        Matcher::Pattern(regex.clone())
    }
}

/// What a matched parameter turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Substituted into the matched value
    One(String),
    /// Replaces the matched pair with one pair per entry
    Many(Vec<String>),
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::One(value.to_string())
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::One(value)
    }
}

impl From<Vec<String>> for Replacement {
    fn from(values: Vec<String>) -> Self {
        Replacement::Many(values)
    }
}

impl From<Vec<&str>> for Replacement {
    fn from(values: Vec<&str>) -> Self {
        Replacement::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Replacement for matched parameter values.
pub enum Replacer<'a> {
    Value(String),
    Values(Vec<String>),
    /// Called with each matched value
    With(Box<dyn Fn(&str) -> Replacement + 'a>),
}

impl<'a> Replacer<'a> {
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&str) -> Replacement + 'a,
    {
        Replacer::With(Box::new(f))
    }

    pub(crate) fn resolve(&self, value: &str) -> Replacement {
        match self {
            Replacer::Value(to) => Replacement::One(to.clone()),
            Replacer::Values(to) => Replacement::Many(to.clone()),
            Replacer::With(f) => f(value),
        }
    }
}

impl fmt::Debug for Replacer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::Value(to) => f.debug_tuple("Value").field(to).finish(),
            Replacer::Values(to) => f.debug_tuple("Values").field(to).finish(),
            Replacer::With(_) => f.write_str("With(..)"),
        }
    }
}

impl From<&str> for Replacer<'_> {
    fn from(to: &str) -> Self {
        Replacer::Value(to.to_string())
    }
}

impl From<String> for Replacer<'_> {
    fn from(to: String) -> Self {
        Replacer::Value(to)
    }
}

impl From<Vec<String>> for Replacer<'_> {
    fn from(to: Vec<String>) -> Self {
        Replacer::Values(to)
    }
}

impl From<Vec<&str>> for Replacer<'_> {
    fn from(to: Vec<&str>) -> Self {
        Replacer::Values(to.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Replacer<'_> {
    fn from(to: [&str; N]) -> Self {
        Replacer::Values(to.iter().map(|s| s.to_string()).collect())
    }
}

/// Replacement for a matched name.
pub enum NameReplacer<'a> {
    Value(String),
    With(Box<dyn Fn(&str) -> String + 'a>),
}

impl<'a> NameReplacer<'a> {
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + 'a,
    {
        NameReplacer::With(Box::new(f))
    }

    pub(crate) fn resolve(&self, name: &str) -> String {
        match self {
            NameReplacer::Value(to) => to.clone(),
            NameReplacer::With(f) => f(name),
        }
    }
}

impl fmt::Debug for NameReplacer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameReplacer::Value(to) => f.debug_tuple("Value").field(to).finish(),
            NameReplacer::With(_) => f.write_str("With(..)"),
        }
    }
}

impl From<&str> for NameReplacer<'_> {
    fn from(to: &str) -> Self {
        NameReplacer::Value(to.to_string())
    }
}

impl From<String> for NameReplacer<'_> {
    fn from(to: String) -> Self {
        NameReplacer::Value(to)
    }
}

/// Chooses leaves for `remove`, `remove_all` and `select_all`.
pub enum Selector<'a> {
    /// Token text, tokenized with the tree's options when the operation runs
    Text(String),
    Arg(Arg),
    Predicate(Box<dyn Fn(&Arg) -> bool + 'a>),
}

impl<'a> Selector<'a> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Arg) -> bool + 'a,
    {
        Selector::Predicate(Box::new(f))
    }

    /// Tokenizes a text selector once, before a tree walk starts.
    pub(crate) fn resolve(self, options: &Rc<ParseOptions>) -> Result<Self, ParseError> {
        match self {
            Selector::Text(text) => Arg::parse_with(&text, Rc::clone(options)).map(Selector::Arg),
            resolved => Ok(resolved),
        }
    }

    /// Exact match: non-strict [`Arg::equals`] or the predicate.
    pub fn matches(&self, arg: &Arg) -> Result<bool, ParseError> {
        match self {
            Selector::Text(text) => arg.equals_text(text, false),
            Selector::Arg(other) => Ok(arg.equals(other, false)),
            Selector::Predicate(f) => Ok(f(arg)),
        }
    }

    /// Subset match: [`Arg::contains`] or the predicate.
    pub fn is_contained_in(&self, arg: &Arg) -> Result<bool, ParseError> {
        match self {
            Selector::Text(text) => arg.contains_text(text),
            Selector::Arg(other) => Ok(arg.contains(other)),
            Selector::Predicate(f) => Ok(f(arg)),
        }
    }
}

impl fmt::Debug for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Selector::Arg(arg) => f.debug_tuple("Arg").field(arg).finish(),
            Selector::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for Selector<'_> {
    fn from(text: &str) -> Self {
        Selector::Text(text.to_string())
    }
}

impl From<String> for Selector<'_> {
    fn from(text: String) -> Self {
        Selector::Text(text)
    }
}

impl From<Arg> for Selector<'_> {
    fn from(arg: Arg) -> Self {
        Selector::Arg(arg)
    }
}
