//! Serialization: [`Value`] trees to text, plus the serde half of
//! [`crate::to_value`].
//!
//! The emitter writes the same dialect the parser reads. Nesting is expressed
//! with two-space indentation, sequence items with a leading dash, and scalars
//! with their narrowest spelling: whole floats keep a `.0` suffix so they
//! re-parse as floats, and strings that are empty or would be mistaken for
//! structure (`:`, `-`, `#`, whitespace) are double-quoted.
//!
//! Emission is total. Every [`Value`] has a text form, so [`Emitter::emit`]
//! returns a `String` rather than a `Result`.
//!
//! ## Usage
//!
//! ```rust
//! use yamlite::{serialize, Map, Value};
//!
//! let mut doc = Map::new();
//! doc.insert("title".to_string(), Value::from("My Site"));
//! doc.insert("port".to_string(), Value::from(4321));
//!
//! assert_eq!(serialize(&Value::Mapping(doc)), "title: My Site\nport: 4321\n");
//! ```

use crate::{Error, Map, Result, Value};
use serde::ser::{self, Serialize};

use crate::de::INDENT_UNIT;

/// Writes [`Value`] trees as indented text.
///
/// The emitter is cheap to construct; [`crate::serialize`] builds one per call.
/// A non-zero starting level is useful when splicing a fragment into an
/// existing document.
///
/// # Examples
///
/// ```rust
/// use yamlite::{Emitter, Value};
///
/// let emitter = Emitter::with_indent_level(1);
/// assert_eq!(emitter.emit(&Value::from(true)), "  true\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    indent_level: usize,
}

impl Emitter {
    /// Creates an emitter starting at the leftmost column.
    #[must_use]
    pub fn new() -> Self {
        Emitter { indent_level: 0 }
    }

    /// Creates an emitter whose output starts `indent_level` levels deep.
    #[must_use]
    pub fn with_indent_level(indent_level: usize) -> Self {
        Emitter { indent_level }
    }

    /// Renders a value as text. Mappings and non-empty sequences become
    /// line-per-entry blocks; everything else becomes a single scalar line.
    #[must_use]
    pub fn emit(&self, value: &Value) -> String {
        let mut out = String::new();
        match value {
            Value::Mapping(map) => self.emit_mapping(&mut out, map, self.indent_level),
            Value::Sequence(items) if !items.is_empty() => {
                self.emit_sequence(&mut out, items, self.indent_level);
            }
            other => {
                push_indent(&mut out, self.indent_level);
                out.push_str(&format_scalar(other));
                out.push('\n');
            }
        }
        out
    }

    fn emit_node(&self, out: &mut String, value: &Value, level: usize) {
        match value {
            Value::Mapping(map) => self.emit_mapping(out, map, level),
            Value::Sequence(items) => self.emit_sequence(out, items, level),
            // containers are handled above; emit_node is never entered with a
            // scalar
            other => {
                push_indent(out, level);
                out.push_str(&format_scalar(other));
                out.push('\n');
            }
        }
    }

    fn emit_mapping(&self, out: &mut String, map: &Map, level: usize) {
        for (key, value) in map {
            push_indent(out, level);
            match value {
                // An empty mapping value is a bare header line with nothing
                // beneath it; the parser reads that back as an empty mapping.
                Value::Mapping(_) => {
                    out.push_str(key);
                    out.push_str(":\n");
                    self.emit_node(out, value, level + 1);
                }
                Value::Sequence(items) if !items.is_empty() => {
                    out.push_str(key);
                    out.push_str(":\n");
                    self.emit_node(out, value, level + 1);
                }
                other => {
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(&format_scalar(other));
                    out.push('\n');
                }
            }
        }
    }

    fn emit_sequence(&self, out: &mut String, items: &[Value], level: usize) {
        for item in items {
            push_indent(out, level);
            match item {
                Value::Mapping(_) => {
                    out.push_str("-\n");
                    self.emit_node(out, item, level + 1);
                }
                Value::Sequence(nested) if !nested.is_empty() => {
                    out.push_str("-\n");
                    self.emit_node(out, item, level + 1);
                }
                other => {
                    out.push_str("- ");
                    out.push_str(&format_scalar(other));
                    out.push('\n');
                }
            }
        }
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level * INDENT_UNIT {
        out.push(' ');
    }
}

/// Single-token spelling of a scalar-position value.
///
/// Only empty containers reach this in emitter output; they use their inline
/// literal forms.
fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => format_string(s),
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
    }
}

/// Whole finite floats keep one fractional digit so they re-parse as floats
/// instead of integers.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// Quotes a string when its bare spelling would collide with structure (`:`,
/// `-`, `#`, whitespace) or with the empty value. Embedded double quotes are
/// escaped.
fn format_string(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.chars()
            .any(|c| c == ':' || c == '-' || c == '#' || c.is_whitespace());
    if needs_quotes {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

/// Serializer producing a [`Value`] tree instead of text. Backs
/// [`crate::to_value`] and, through it, [`crate::to_string`].
pub(crate) struct ValueSerializer;

pub(crate) fn to_value_inner<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

pub(crate) struct SerializeVec {
    vec: Vec<Value>,
}

pub(crate) struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;
    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        // values above i64::MAX lose precision rather than failing
        if let Ok(n) = i64::try_from(v) {
            Ok(Value::Int(n))
        } else {
            Ok(Value::Float(v as f64))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Sequence(
            v.iter().map(|b| Value::Int(i64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported("newtype enum variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported("tuple enum variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: Map::new(),
            current_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported("struct enum variants"))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value_inner(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::unsupported("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.map.insert(key, to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_whole_keeps_fraction() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(2.5), "2.5");
    }

    #[test]
    fn test_format_string_quoting() {
        assert_eq!(format_string("plain"), "plain");
        assert_eq!(format_string("a:b"), "\"a:b\"");
        assert_eq!(format_string("two words"), "\"two words\"");
        assert_eq!(format_string("dash-ed"), "\"dash-ed\"");
        assert_eq!(format_string("hash#tag"), "\"hash#tag\"");
        assert_eq!(format_string(""), "\"\"");
        assert_eq!(format_string("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_emit_nested_mapping() {
        let mut inner = Map::new();
        inner.insert("port".to_string(), Value::from(4321));
        let mut doc = Map::new();
        doc.insert("server".to_string(), Value::Mapping(inner));
        doc.insert("debug".to_string(), Value::from(false));

        let text = Emitter::new().emit(&Value::Mapping(doc));
        assert_eq!(text, "server:\n  port: 4321\ndebug: false\n");
    }

    #[test]
    fn test_emit_sequences() {
        let mut doc = Map::new();
        doc.insert(
            "tags".to_string(),
            Value::Sequence(vec![Value::from("a"), Value::from("b")]),
        );
        doc.insert("empty".to_string(), Value::Sequence(Vec::new()));

        let text = Emitter::new().emit(&Value::Mapping(doc));
        assert_eq!(text, "tags:\n  - a\n  - b\nempty: []\n");
    }

    #[test]
    fn test_emit_sequence_of_mappings() {
        let mut entry = Map::new();
        entry.insert("name".to_string(), Value::from("home"));
        entry.insert("url".to_string(), Value::from("/"));
        let mut doc = Map::new();
        doc.insert("nav".to_string(), Value::Sequence(vec![Value::Mapping(entry)]));

        let text = Emitter::new().emit(&Value::Mapping(doc));
        assert_eq!(text, "nav:\n  -\n    name: home\n    url: /\n");
    }

    #[test]
    fn test_emit_empty_mapping_value() {
        let mut doc = Map::new();
        doc.insert("extra".to_string(), Value::Mapping(Map::new()));

        let text = Emitter::new().emit(&Value::Mapping(doc));
        assert_eq!(text, "extra:\n");
    }
}
