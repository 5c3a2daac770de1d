//! Parsing: text to [`Value`] trees, plus the serde half of [`crate::from_value`].
//!
//! The parser is line-oriented. Each raw line is preprocessed (tabs normalized
//! to two spaces, trailing comments stripped outside quotes), then consumed by
//! an indentation-stack scan that keeps a stack of open containers keyed by
//! indentation level. Containers live in a single owned arena of nodes and
//! frames hold arena indices, so deeply nested documents never recurse and
//! parent/child containers never alias.
//!
//! Parsing is fail-fast: the first structural violation aborts with a
//! [`ParseError`] carrying the 1-based line number, and no partial document is
//! ever returned.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use yamlite::parse;
//!
//! let doc = parse("title: My Site\nport: 4321\n").unwrap();
//! assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("My Site"));
//! assert_eq!(doc.get("port").and_then(|v| v.as_i64()), Some(4321));
//! ```

use crate::error::{ParseError, ParseErrorKind};
use crate::{Error, Map, ParseOptions, Result, Value};
use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Columns per nesting level. All indentation must be a multiple of this.
pub(crate) const INDENT_UNIT: usize = 2;

/// Parses a full document into its root mapping.
pub(crate) fn parse_document(input: &str, options: &ParseOptions) -> Result<Map> {
    Parser::new(input, options).parse()
}

type NodeId = usize;

const ROOT: NodeId = 0;

/// A container or scalar under construction. Children are arena indices, so a
/// node is always allocated after its parent.
enum Node {
    Mapping(Vec<(String, NodeId)>),
    Sequence(Vec<NodeId>),
    Scalar(Value),
}

/// One open container on the parse stack. The root sentinel sits at indent −1
/// and is never popped.
struct Frame {
    indent: i64,
    node: NodeId,
}

struct Parser<'a> {
    lines: Vec<String>,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(input: &str, options: &'a ParseOptions) -> Self {
        let normalized = input.replace('\t', "  ");
        let lines = normalized
            .split('\n')
            .map(|raw| strip_comment(raw.strip_suffix('\r').unwrap_or(raw)).to_string())
            .collect();
        Parser { lines, options }
    }

    fn parse(self) -> Result<Map> {
        let mut arena: Vec<Node> = vec![Node::Mapping(Vec::new())];
        let mut stack: Vec<Frame> = vec![Frame {
            indent: -1,
            node: ROOT,
        }];

        for index in 0..self.lines.len() {
            let line_number = index + 1;
            let trimmed = self.lines[index].trim();
            if trimmed.is_empty() {
                continue;
            }

            let indent = self.measure_indent(index)?;

            while stack.len() > 1 && (indent as i64) < stack[stack.len() - 1].indent {
                stack.pop();
            }
            let top = stack[stack.len() - 1].node;

            if trimmed == "-" || trimmed.starts_with("- ") {
                self.sequence_item(
                    &mut arena,
                    &mut stack,
                    top,
                    index,
                    indent,
                    trimmed,
                    line_number,
                )?;
                continue;
            }

            let Some(colon) = trimmed.find(':') else {
                return Err(self.fail(
                    ParseErrorKind::MissingColon,
                    "missing key or colon separator",
                    line_number,
                ));
            };
            let key = trimmed[..colon].trim();
            let rest = trimmed[colon + 1..].trim();

            if key.is_empty() {
                return Err(self.fail(ParseErrorKind::EmptyKey, "empty key name", line_number));
            }
            if !matches!(arena[top], Node::Mapping(_)) {
                return Err(self.fail(
                    ParseErrorKind::KeyContext,
                    "key/value pair not allowed inside a sequence",
                    line_number,
                ));
            }

            if rest.is_empty() {
                // The child container's kind is decided by peeking at the next
                // meaningful line without consuming it.
                let child = match self.peek_next_meaningful(index + 1) {
                    Some((next_indent, next_trimmed)) if next_indent > indent => {
                        if next_trimmed == "-" || next_trimmed.starts_with("- ") {
                            Node::Sequence(Vec::new())
                        } else {
                            Node::Mapping(Vec::new())
                        }
                    }
                    _ => Node::Mapping(Vec::new()),
                };
                let id = alloc(&mut arena, child);
                insert_key(&mut arena, top, key, id);
                stack.push(Frame {
                    indent: (indent + INDENT_UNIT) as i64,
                    node: id,
                });
            } else {
                let id = alloc(&mut arena, Node::Scalar(coerce_scalar(rest)));
                insert_key(&mut arena, top, key, id);
            }
        }

        match into_value(arena) {
            Value::Mapping(map) => Ok(map),
            // the root sentinel is allocated as a mapping and never replaced
            _ => Ok(Map::new()),
        }
    }

    /// Handles a dash-prefixed line. The current container must be a sequence.
    #[allow(clippy::too_many_arguments)]
    fn sequence_item(
        &self,
        arena: &mut Vec<Node>,
        stack: &mut Vec<Frame>,
        top: NodeId,
        index: usize,
        indent: usize,
        trimmed: &str,
        line_number: usize,
    ) -> Result<()> {
        if !matches!(arena[top], Node::Sequence(_)) {
            return Err(self.fail(
                ParseErrorKind::ArrayContext,
                "sequence item outside of a sequence",
                line_number,
            ));
        }

        let payload = trimmed[1..].trim();

        if payload.is_empty() {
            // Bare dash opens a nested container; its kind comes from the next
            // meaningful line, same as for an empty-valued key.
            let child = match self.peek_next_meaningful(index + 1) {
                Some((next_indent, next_trimmed)) if next_indent > indent => {
                    if next_trimmed == "-" || next_trimmed.starts_with("- ") {
                        Node::Sequence(Vec::new())
                    } else {
                        Node::Mapping(Vec::new())
                    }
                }
                _ => Node::Mapping(Vec::new()),
            };
            let id = alloc(arena, child);
            push_item(arena, top, id);
            stack.push(Frame {
                indent: (indent + INDENT_UNIT) as i64,
                node: id,
            });
            return Ok(());
        }

        // A quoted payload is always a scalar; the colon check would otherwise
        // split strings like "a:b".
        let quoted = payload.starts_with('"') || payload.starts_with('\'');
        if !quoted {
            if let Some(colon) = payload.find(':') {
                let key = payload[..colon].trim();
                let rest = payload[colon + 1..].trim();
                if key.is_empty() {
                    return Err(self.fail(
                        ParseErrorKind::EmptyKey,
                        "empty key in sequence item",
                        line_number,
                    ));
                }
                // A dash line with a key starts a new single-entry mapping
                // element; later `key: value` lines at the pushed depth extend
                // the same element. The mapping is allocated before its scalar
                // child so children keep higher arena indices than parents.
                let mapping = alloc(arena, Node::Mapping(Vec::new()));
                let scalar = alloc(arena, Node::Scalar(coerce_scalar(rest)));
                insert_key(arena, mapping, key, scalar);
                push_item(arena, top, mapping);
                stack.push(Frame {
                    indent: (indent + INDENT_UNIT) as i64,
                    node: mapping,
                });
                return Ok(());
            }
        }

        let id = alloc(arena, Node::Scalar(coerce_scalar(payload)));
        push_item(arena, top, id);
        Ok(())
    }

    fn measure_indent(&self, index: usize) -> Result<usize> {
        let indent = leading_spaces(&self.lines[index]);
        if indent % INDENT_UNIT != 0 {
            return Err(self.fail(
                ParseErrorKind::Indentation,
                format!("indentation of {indent} spaces is not a multiple of {INDENT_UNIT}"),
                index + 1,
            ));
        }
        Ok(indent)
    }

    /// Non-destructive scan forward to the next line with content. Indentation
    /// is measured leniently here; a misindented line reports its error when
    /// the main scan reaches it.
    fn peek_next_meaningful(&self, start: usize) -> Option<(usize, &str)> {
        for line in &self.lines[start..] {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some((leading_spaces(line), trimmed));
        }
        None
    }

    fn fail(&self, kind: ParseErrorKind, message: impl Into<String>, line: usize) -> Error {
        ParseError::new(
            kind,
            message,
            self.options.file.as_str(),
            self.options.context.as_str(),
            line,
        )
        .into()
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn alloc(arena: &mut Vec<Node>, node: Node) -> NodeId {
    arena.push(node);
    arena.len() - 1
}

fn insert_key(arena: &mut Vec<Node>, mapping: NodeId, key: &str, value: NodeId) {
    if let Node::Mapping(entries) = &mut arena[mapping] {
        // last write wins; the key keeps its original position
        if let Some(entry) = entries.iter_mut().find(|(existing, _)| existing.as_str() == key) {
            entry.1 = value;
        } else {
            entries.push((key.to_string(), value));
        }
    }
}

fn push_item(arena: &mut Vec<Node>, sequence: NodeId, value: NodeId) {
    if let Node::Sequence(items) = &mut arena[sequence] {
        items.push(value);
    }
}

/// Folds the arena into a [`Value`] tree without recursion. Children always
/// have higher indices than their parents, so a reverse scan sees every child
/// built before its parent needs it.
fn into_value(mut arena: Vec<Node>) -> Value {
    let mut built: Vec<Option<Value>> = vec![None; arena.len()];
    for id in (0..arena.len()).rev() {
        let node = std::mem::replace(&mut arena[id], Node::Scalar(Value::Null));
        let value = match node {
            Node::Scalar(value) => value,
            Node::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|child| built[child].take().unwrap_or(Value::Null))
                    .collect(),
            ),
            Node::Mapping(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, built[child].take().unwrap_or(Value::Null)))
                    .collect(),
            ),
        };
        built[id] = Some(value);
    }
    built.first_mut().and_then(Option::take).unwrap_or(Value::Null)
}

/// Strips an unquoted `#` and everything after it.
///
/// Tracks single- and double-quote state across the line; a `#` inside either
/// kind of quote survives. Quote state does not persist across lines, and an
/// odd number of quotes is not an error here.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Maps a trimmed non-empty fragment to a typed [`Value`].
///
/// Coercion order: empty-container literals, null, booleans, integers, floats,
/// quote-wrapped strings, then bare strings. A quoted fragment can never reach
/// the numeric rules because it starts with a quote character, so `"42"` stays
/// a string.
pub(crate) fn coerce_scalar(raw: &str) -> Value {
    match raw {
        "[]" => return Value::Sequence(Vec::new()),
        "{}" => return Value::Mapping(Map::new()),
        "~" => return Value::Null,
        _ => {}
    }
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if is_int_literal(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Int(n);
        }
    }
    if is_float_literal(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
    }
    let bytes = raw.as_bytes();
    if raw.len() >= 2
        && ((bytes[0] == b'"' && bytes[raw.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[raw.len() - 1] == b'\''))
    {
        return Value::String(raw[1..raw.len() - 1].to_string());
    }
    Value::String(raw.to_string())
}

/// Optional sign followed by one or more digits.
fn is_int_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional sign, optional digits, a dot, then one or more digits.
fn is_float_literal(s: &str) -> bool {
    let rest = s.strip_prefix(['-', '+']).unwrap_or(s);
    let Some((int_part, frac_part)) = rest.split_once('.') else {
        return false;
    };
    int_part.bytes().all(|b| b.is_ascii_digit())
        && !frac_part.is_empty()
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(n) => visitor.visit_i64(n),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items.into_iter())),
            Value::Mapping(mapping) => {
                visitor.visit_map(MapDeserializer::new(mapping.into_iter()))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Mapping(mapping) => {
                visitor.visit_enum(MapAccessDeserializer::new(MapDeserializer::new(
                    mapping.into_iter(),
                )))
            }
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"string or mapping",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Int(n) => de::Unexpected::Signed(*n),
        Value::Float(f) => de::Unexpected::Float(*f),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Sequence(_) => de::Unexpected::Seq,
        Value::Mapping(_) => de::Unexpected::Map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("key: value # note"), "key: value ");
        assert_eq!(strip_comment("key: \"a#b\" # note"), "key: \"a#b\" ");
        assert_eq!(strip_comment("key: 'a#b'"), "key: 'a#b'");
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("no comment"), "no comment");
    }

    #[test]
    fn test_strip_comment_unbalanced_quote() {
        // quoting correctness is the coercer's concern, not the stripper's
        assert_eq!(strip_comment("key: \"open # inside"), "key: \"open # inside");
    }

    #[test]
    fn test_coerce_scalar_order() {
        assert_eq!(coerce_scalar("[]"), Value::Sequence(Vec::new()));
        assert_eq!(coerce_scalar("{}"), Value::Mapping(Map::new()));
        assert_eq!(coerce_scalar("~"), Value::Null);
        assert_eq!(coerce_scalar("NULL"), Value::Null);
        assert_eq!(coerce_scalar("True"), Value::Bool(true));
        assert_eq!(coerce_scalar("FALSE"), Value::Bool(false));
        assert_eq!(coerce_scalar("42"), Value::Int(42));
        assert_eq!(coerce_scalar("-7"), Value::Int(-7));
        assert_eq!(coerce_scalar("+3"), Value::Int(3));
        assert_eq!(coerce_scalar("2.5"), Value::Float(2.5));
        assert_eq!(coerce_scalar("-.5"), Value::Float(-0.5));
        assert_eq!(coerce_scalar("\"42\""), Value::String("42".to_string()));
        assert_eq!(coerce_scalar("'null'"), Value::String("null".to_string()));
        assert_eq!(coerce_scalar("plain"), Value::String("plain".to_string()));
        assert_eq!(coerce_scalar("1.2.3"), Value::String("1.2.3".to_string()));
    }

    #[test]
    fn test_int_overflow_falls_through_to_string() {
        let big = "99999999999999999999999999";
        assert_eq!(coerce_scalar(big), Value::String(big.to_string()));
    }

    #[test]
    fn test_lone_quote_is_bare_string() {
        assert_eq!(coerce_scalar("\""), Value::String("\"".to_string()));
    }

    #[test]
    fn test_literal_predicates() {
        assert!(is_int_literal("0"));
        assert!(is_int_literal("-12"));
        assert!(!is_int_literal("-"));
        assert!(!is_int_literal("1.0"));
        assert!(is_float_literal("1.0"));
        assert!(is_float_literal(".5"));
        assert!(!is_float_literal("1."));
        assert!(!is_float_literal("5"));
    }

    #[test]
    fn test_leading_spaces() {
        assert_eq!(leading_spaces("    four"), 4);
        assert_eq!(leading_spaces("none"), 0);
        assert_eq!(leading_spaces(""), 0);
    }
}
