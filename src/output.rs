//! Text serialization for argument trees.
//!
//! The output re-parses to the same tree. Quoting is canonical rather than
//! preserved:
//!
//! - A name is written bare when it only contains `[A-Za-z0-9-]`
//! - A value is written bare unless it contains a configured delimiter,
//!   whitespace or a group marker
//! - Text holding the closing quote marker is always written bare, since
//!   quoted literals have no escape
//! - A leaf whose argument was never requested is written as its source
//!   text, untouched
//!
//! # Examples
//!
//! ```
//! use argtree::Arg;
//!
//! let arg = Arg::new("name different", [(".", "p6.test"), (":", "content")]);
//! assert_eq!(arg.to_text(), "`name different`.`p6.test`:content");
//! ```

use std::fmt;

use crate::{
    ast::{Arg, NodeId, Tree, node::NodeKind},
    lexer::is_name_char,
    options::ParseOptions,
};

fn name_needs_quotes(name: &str, options: &ParseOptions) -> bool {
    !name.contains(options.quote_end) && !name.chars().all(is_name_char)
}

fn value_needs_quotes(value: &str, options: &ParseOptions) -> bool {
    if value.contains(options.quote_end) {
        return false;
    }
    options.delimiters().any(|d| value.contains(d))
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || options.is_group_marker(ch))
}

fn write_quoted(out: &mut String, text: &str, options: &ParseOptions) {
    out.push(options.quote_start);
    out.push_str(text);
    out.push(options.quote_end);
}

impl Arg {
    pub fn to_text(&self) -> String {
        let options = self.options();
        let mut out = String::new();

        if name_needs_quotes(&self.name, options) {
            write_quoted(&mut out, &self.name, options);
        } else {
            out.push_str(&self.name);
        }

        for parameter in &self.parameters {
            out.push_str(&parameter.delimiter);
            if value_needs_quotes(&parameter.value, options) {
                write_quoted(&mut out, &parameter.value, options);
            } else {
                out.push_str(&parameter.value);
            }
        }
        out
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Tree {
    /// Text of the node at `id`.
    ///
    /// For a group this is its children joined by spaces, without the
    /// group's own brackets; nested groups inside it are bracketed.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Text of the whole tree.
    pub fn to_text(&self) -> String {
        self.text(self.root())
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Leaf(leaf) => match leaf.parsed_arg() {
                Some(arg) => out.push_str(&arg.to_text()),
                None => out.push_str(leaf.source()),
            },
            NodeKind::Nested(children) => {
                for (i, &child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    if self.is_nested(child) {
                        out.push(self.options().children_start);
                        self.write_node(child, out);
                        out.push(self.options().children_end);
                    } else {
                        self.write_node(child, out);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_quoting_rules() {
        let options = ParseOptions::default();
        assert!(!value_needs_quotes("p-6", &options));
        assert!(!value_needs_quotes("", &options));
        assert!(value_needs_quotes("1.5", &options));
        assert!(value_needs_quotes("a:b", &options));
        assert!(value_needs_quotes("user@host", &options));
        assert!(value_needs_quotes("a b", &options));
        assert!(value_needs_quotes("}", &options));
    }

    #[test]
    fn test_closing_quote_is_never_wrapped() {
        let options = ParseOptions::default();
        assert!(!value_needs_quotes("x`y z`", &options));
        assert!(!value_needs_quotes("x`{`", &options));
        assert!(!value_needs_quotes("`a.b", &options));
        assert!(!name_needs_quotes("a`b", &options));
    }

    #[test]
    fn test_name_quoting_rules() {
        let options = ParseOptions::default();
        assert!(!name_needs_quotes("", &options));
        assert!(!name_needs_quotes("--", &options));
        assert!(!name_needs_quotes("div2", &options));
        assert!(name_needs_quotes("a_b", &options));
        assert!(name_needs_quotes("a.b", &options));
    }
}
