use std::rc::Rc;

use log::trace;

use crate::{
    ast::{Arg, Parameter},
    error::ParseError,
    options::ParseOptions,
};

/// Tokenizer for a single whitespace-free token such as `name.a:b@c`.
///
/// Produces the token's name and its ordered `(delimiter, value)` pairs.
pub struct ArgLexer<'a> {
    text: &'a str,
    input: Vec<char>,
    position: usize,
    options: Rc<ParseOptions>,
    delimiters: Vec<Vec<char>>,
}

impl<'a> ArgLexer<'a> {
    pub fn new(text: &'a str, options: Rc<ParseOptions>) -> Self {
        let delimiters = options.delimiters().map(|d| d.chars().collect()).collect();
        ArgLexer {
            text,
            input: text.chars().collect(),
            position: 0,
            options,
            delimiters,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Index of the first configured delimiter starting at the cursor.
    fn peek_delimiter(&self) -> Option<usize> {
        let rest = &self.input[self.position.min(self.input.len())..];
        self.delimiters.iter().position(|d| rest.starts_with(d))
    }

    fn read_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.position;
        self.advance(); // opening quote

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == self.options.quote_end {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(ParseError::UnterminatedLiteral {
            text: self.text.to_string(),
            position: start,
        })
    }

    fn read_name(&mut self) -> Result<String, ParseError> {
        if self.current_char() == Some(self.options.quote_start) {
            return self.read_quoted();
        }

        let mut name = String::new();
        while let Some(ch) = self.current_char() {
            if is_name_char(ch) {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn read_parameter(&mut self, after: &'static str) -> Result<Parameter, ParseError> {
        let Some(index) = self.peek_delimiter() else {
            return Err(ParseError::MissingDelimiter {
                text: self.text.to_string(),
                position: self.position,
                after,
            });
        };
        let delimiter: String = self.delimiters[index].iter().collect();
        self.position += self.delimiters[index].len();

        let value = if self.current_char() == Some(self.options.quote_start) {
            self.read_quoted()?
        } else {
            let mut value = String::new();
            while let Some(ch) = self.current_char() {
                if self.peek_delimiter().is_some() {
                    break;
                }
                value.push(ch);
                self.advance();
            }
            value
        };

        Ok(Parameter::new(delimiter, value))
    }

    pub fn parse(mut self) -> Result<Arg, ParseError> {
        let name = self.read_name()?;

        let mut parameters = Vec::new();
        while !self.is_at_end() {
            let after = if parameters.is_empty() {
                "name"
            } else {
                "previous parameter"
            };
            parameters.push(self.read_parameter(after)?);
        }

        trace!(
            "tokenized '{}' into name '{}' with {} parameter(s)",
            self.text,
            name,
            parameters.len()
        );
        Ok(Arg::with_options(name, parameters, self.options))
    }
}

/// Characters allowed in an unquoted name: `[A-Za-z0-9-]`.
pub fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str, delimiters: &[&str]) -> Result<Arg, ParseError> {
        let options = ParseOptions::default().with_delimiters(delimiters.iter().copied());
        ArgLexer::new(text, Rc::new(options)).parse()
    }

    #[test]
    fn test_name_chars() {
        assert!(is_name_char('a'));
        assert!(is_name_char('Z'));
        assert!(is_name_char('7'));
        assert!(is_name_char('-'));
        assert!(!is_name_char('_'));
        assert!(!is_name_char('.'));
        assert!(!is_name_char('é'));
    }

    #[test]
    fn test_longer_delimiter_listed_first_wins() {
        let arg = lex("a::b:c", &["::", ":"]).unwrap();
        assert_eq!(
            arg.parameters,
            vec![Parameter::new("::", "b"), Parameter::new(":", "c")]
        );
    }

    #[test]
    fn test_shorter_delimiter_listed_first_shadows_longer() {
        let arg = lex("a::b", &[":", "::"]).unwrap();
        assert_eq!(
            arg.parameters,
            vec![Parameter::new(":", ""), Parameter::new(":", "b")]
        );
    }

    #[test]
    fn test_empty_delimiters_are_ignored() {
        let arg = lex("a.b", &["", "."]).unwrap();
        assert_eq!(arg.parameters, vec![Parameter::new(".", "b")]);
    }

    #[test]
    fn test_missing_delimiter_reports_position() {
        let err = lex("ab!c", &["."]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingDelimiter {
                text: "ab!c".into(),
                position: 2,
                after: "name",
            }
        );
    }
}
