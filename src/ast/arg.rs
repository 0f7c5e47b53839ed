use std::{collections::HashSet, rc::Rc};

use crate::{
    error::{Error, ParseError},
    lexer::ArgLexer,
    matcher::{Matcher, NameReplacer, Replacement, Replacer},
    options::ParseOptions,
};

/// One `(delimiter, value)` pair of an [`Arg`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub delimiter: String,
    pub value: String,
}

impl Parameter {
    pub fn new(delimiter: impl Into<String>, value: impl Into<String>) -> Self {
        Parameter {
            delimiter: delimiter.into(),
            value: value.into(),
        }
    }
}

impl<D: Into<String>, V: Into<String>> From<(D, V)> for Parameter {
    fn from((delimiter, value): (D, V)) -> Self {
        Parameter::new(delimiter, value)
    }
}

/// A single token: a name followed by ordered parameters.
///
/// `name.a.b:c` is the name `name` with the parameters
/// `[(".", "a"), (".", "b"), (":", "c")]`.
///
/// Operations that take no delimiter work on the first configured one
/// (`.` by default); their `*_at` variants name it explicitly.
///
/// # Examples
///
/// ```
/// use argtree::Arg;
///
/// let mut arg = Arg::parse("t.p4.m2:content").unwrap();
/// arg.replace(argtree::Matcher::pattern(r"([a-z])(\d+)").unwrap(), "$1-$2");
/// assert_eq!(arg.to_text(), "t.p-4.m-2:content");
/// assert_eq!(arg.one_at(":").unwrap(), Some("content"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: String,
    pub parameters: Vec<Parameter>,
    options: Rc<ParseOptions>,
}

impl Arg {
    pub fn new<P: Into<Parameter>>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self {
        Self::with_options(name, parameters, Rc::new(ParseOptions::default()))
    }

    /// An arg without parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::<Parameter>::new())
    }

    pub fn with_options<P: Into<Parameter>>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
        options: Rc<ParseOptions>,
    ) -> Self {
        Arg {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// Tokenizes a single token with the default options.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, Rc::new(ParseOptions::default()))
    }

    pub fn parse_with(text: &str, options: Rc<ParseOptions>) -> Result<Self, ParseError> {
        ArgLexer::new(text, options).parse()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub(crate) fn shared_options(&self) -> &Rc<ParseOptions> {
        &self.options
    }

    /// Replaces name and parameters with the tokenization of `text`.
    pub fn rewrite(&mut self, text: &str) -> Result<(), ParseError> {
        let arg = Self::parse_with(text, Rc::clone(&self.options))?;
        self.name = arg.name;
        self.parameters = arg.parameters;
        Ok(())
    }

    pub fn add(&mut self, value: impl Into<String>) {
        let options = Rc::clone(&self.options);
        self.add_at(value, options.default_delimiter());
    }

    pub fn add_at(&mut self, value: impl Into<String>, delimiter: &str) {
        self.parameters.push(Parameter::new(delimiter, value));
    }

    pub fn add_if_not_exists(&mut self, value: impl Into<String>) {
        let options = Rc::clone(&self.options);
        self.add_if_not_exists_at(value, options.default_delimiter());
    }

    /// Appends the pair unless an identical pair is already present.
    pub fn add_if_not_exists_at(&mut self, value: impl Into<String>, delimiter: &str) {
        let value = value.into();
        let exists = self
            .parameters
            .iter()
            .any(|p| p.delimiter == delimiter && p.value == value);
        if !exists {
            self.parameters.push(Parameter::new(delimiter, value));
        }
    }

    pub fn set_name_if_not_exists(&mut self, name: impl Into<String>) {
        if self.name.is_empty() {
            self.name = name.into();
        }
    }

    /// Rewrites the name if `matcher` matches it. Returns whether it did.
    pub fn transform_name<'r>(
        &mut self,
        matcher: impl Into<Matcher>,
        replacer: impl Into<NameReplacer<'r>>,
    ) -> bool {
        let matcher = matcher.into();
        let replacer = replacer.into();
        match substitute_name(&self.name, &matcher, &replacer) {
            Some(name) => {
                self.name = name;
                true
            }
            None => false,
        }
    }

    /// Applies the first rule whose matcher matches the name.
    pub fn transform_name_rules(&mut self, rules: &[(Matcher, NameReplacer<'_>)]) -> bool {
        for (matcher, replacer) in rules {
            if let Some(name) = substitute_name(&self.name, matcher, replacer) {
                self.name = name;
                return true;
            }
        }
        false
    }

    pub fn pop(&mut self, matcher: impl Into<Matcher>) -> Option<String> {
        let options = Rc::clone(&self.options);
        self.pop_at(matcher, options.default_delimiter())
    }

    /// Removes and returns the first matching value at `delimiter`.
    pub fn pop_at(&mut self, matcher: impl Into<Matcher>, delimiter: &str) -> Option<String> {
        let matcher = matcher.into();
        let index = self
            .parameters
            .iter()
            .position(|p| p.delimiter == delimiter && matcher.is_match(&p.value))?;
        Some(self.parameters.remove(index).value)
    }

    pub fn pop_apply<F>(&mut self, matcher: impl Into<Matcher>, f: F) -> bool
    where
        F: FnOnce(&mut Arg, String),
    {
        let options = Rc::clone(&self.options);
        self.pop_apply_at(matcher, options.default_delimiter(), f)
    }

    /// Pops the first match and hands it to `f`; `f` is not called when
    /// nothing matched.
    pub fn pop_apply_at<F>(
        &mut self,
        matcher: impl Into<Matcher>,
        delimiter: &str,
        f: F,
    ) -> bool
    where
        F: FnOnce(&mut Arg, String),
    {
        match self.pop_at(matcher, delimiter) {
            Some(value) => {
                f(self, value);
                true
            }
            None => false,
        }
    }

    pub fn pop_many(&mut self, matcher: impl Into<Matcher>) -> Vec<String> {
        let options = Rc::clone(&self.options);
        self.pop_many_at(matcher, options.default_delimiter())
    }

    /// Removes every matching value at `delimiter`, in order.
    pub fn pop_many_at(&mut self, matcher: impl Into<Matcher>, delimiter: &str) -> Vec<String> {
        let matcher = matcher.into();
        let (popped, kept): (Vec<Parameter>, Vec<Parameter>) = self
            .parameters
            .drain(..)
            .partition(|p| p.delimiter == delimiter && matcher.is_match(&p.value));
        self.parameters = kept;
        popped.into_iter().map(|p| p.value).collect()
    }

    pub fn replace<'r>(
        &mut self,
        matcher: impl Into<Matcher>,
        replacer: impl Into<Replacer<'r>>,
    ) {
        let options = Rc::clone(&self.options);
        self.replace_at(matcher, replacer, options.default_delimiter());
    }

    /// Substitutes every matching value at `delimiter`.
    ///
    /// A single replacement goes through [`Matcher::substitute`], so pattern
    /// back-references such as `$1` work. A list replaces the pair with one
    /// pair per entry. Non-matching pairs keep their position.
    pub fn replace_at<'r>(
        &mut self,
        matcher: impl Into<Matcher>,
        replacer: impl Into<Replacer<'r>>,
        delimiter: &str,
    ) {
        let matcher = matcher.into();
        let replacer = replacer.into();

        let mut parameters = Vec::with_capacity(self.parameters.len());
        for parameter in self.parameters.drain(..) {
            if parameter.delimiter != delimiter || !matcher.is_match(&parameter.value) {
                parameters.push(parameter);
                continue;
            }
            match replacer.resolve(&parameter.value) {
                Replacement::One(to) => {
                    let value = matcher.substitute(&parameter.value, &to);
                    parameters.push(Parameter::new(delimiter, value));
                }
                Replacement::Many(values) => {
                    parameters.extend(values.into_iter().map(|v| Parameter::new(delimiter, v)));
                }
            }
        }
        self.parameters = parameters;
    }

    pub fn all(&self) -> Vec<&str> {
        self.all_at(self.options.default_delimiter())
    }

    pub fn all_at(&self, delimiter: &str) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.delimiter == delimiter)
            .map(|p| p.value.as_str())
            .collect()
    }

    pub fn one(&self) -> Result<Option<&str>, Error> {
        self.one_at(self.options.default_delimiter())
    }

    /// The only value at `delimiter`, `None` if there is none.
    pub fn one_at(&self, delimiter: &str) -> Result<Option<&str>, Error> {
        match self.all_at(delimiter).as_slice() {
            [] => Ok(None),
            [value] => Ok(Some(*value)),
            _ => Err(Error::Ambiguous {
                text: self.to_text(),
                delimiter: delimiter.to_string(),
            }),
        }
    }

    /// Compares name and parameters.
    ///
    /// Strict mode compares the pairs in order. Otherwise, for each
    /// configured delimiter, the set of this arg's values must have as many
    /// entries as `other` has values and contain each of them; duplicate
    /// values therefore collapse on this side.
    pub fn equals(&self, other: &Arg, strict: bool) -> bool {
        if self.name != other.name || self.parameters.len() != other.parameters.len() {
            return false;
        }
        if strict {
            return self.parameters == other.parameters;
        }

        self.options.delimiters().all(|delimiter| {
            let values: HashSet<&str> = self.all_at(delimiter).into_iter().collect();
            let other_values = other.all_at(delimiter);
            values.len() == other_values.len() && other_values.iter().all(|v| values.contains(v))
        })
    }

    pub fn equals_text(&self, text: &str, strict: bool) -> Result<bool, ParseError> {
        let other = Self::parse_with(text, Rc::clone(&self.options))?;
        Ok(self.equals(&other, strict))
    }

    /// True if the names match and every value of `other` is present at the
    /// same delimiter here.
    pub fn contains(&self, other: &Arg) -> bool {
        if self.name != other.name {
            return false;
        }

        self.options.delimiters().all(|delimiter| {
            let values: HashSet<&str> = self.all_at(delimiter).into_iter().collect();
            other.all_at(delimiter).iter().all(|v| values.contains(v))
        })
    }

    pub fn contains_text(&self, text: &str) -> Result<bool, ParseError> {
        let other = Self::parse_with(text, Rc::clone(&self.options))?;
        Ok(self.contains(&other))
    }
}

fn substitute_name(name: &str, matcher: &Matcher, replacer: &NameReplacer<'_>) -> Option<String> {
    if !matcher.is_match(name) {
        return None;
    }
    let to = replacer.resolve(name);
    Some(matcher.substitute(name, &to))
}
