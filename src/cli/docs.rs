//! Documentation content for the argtree CLI

/// Quick reference for the notation
pub fn get_notation_reference() -> &'static str {
    r##"ARGTREE NOTATION

Text is a whitespace-separated list of tokens and groups. A token is a name
followed by parameters; a group wraps tokens and other groups in braces.

TOKENS

  name              Bare names use letters, digits and '-'
  name.a.b          Parameters 'a' and 'b' after the '.' delimiter
  name.a:b@c        One parameter per delimiter ('.', ':' and '@' by default)
  .a                Empty name
  name.             Trailing delimiter: one empty parameter
  `any text`.x      Backticks quote a name ...
  name.`1.5`        ... or a value, so it may hold delimiters, spaces or braces

GROUPS

  r a b             Three top-level tokens
  r {c a b} d       A group between 'r' and 'd'
  {a {b {c}}}       Groups nest freely

DELIMITERS

  Delimiters are tried in order and the first one that matches wins, so
  with ["::", ":"] the text 'a::b' has one '::' parameter, while with
  [":", "::"] it has two ':' parameters.

COMMANDS

  argtree fmt TEXT              Canonical form of TEXT
  argtree tree TEXT --pretty    Tree structure as JSON
  argtree select SELECTOR TEXT  Tokens containing SELECTOR (e.g. 'a.x')
  argtree --options JSON ...    Override markers and delimiters, e.g.
                                '{"delimiters": ["#", "."]}'

  TEXT is read from stdin when omitted.
"##
}
