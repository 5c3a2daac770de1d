//! # yamlite
//!
//! A self-contained parser and serializer for a small, indentation-structured
//! configuration dialect: a restricted YAML subset covering nested mappings,
//! sequences, typed scalars, comments and quoting.
//!
//! ## What it reads
//!
//! ```text
//! title: My Site          # strings, numbers, booleans, null
//! server:
//!   host: localhost
//!   port: 4321
//! tags:
//!   - rust
//!   - config
//! ```
//!
//! Nesting is expressed with two-space indentation, sequence items with a
//! leading dash, comments with an unquoted `#`. The complete dialect is
//! documented in the [`spec`] module; anchors, aliases, multi-line scalars,
//! flow collections and document streams are deliberately absent.
//!
//! ## Key Features
//!
//! - **Line-decorated errors**: every parse failure names the file, the kind
//!   of document and the 1-based line, ready to show a user
//! - **Order-preserving**: mappings keep their key order through a parse,
//!   edit and re-serialize cycle
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! yamlite = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use yamlite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     debug: bool,
//! }
//!
//! let server: Server = from_str("host: localhost\nport: 4321\ndebug: false\n").unwrap();
//! assert_eq!(server.port, 4321);
//!
//! let text = to_string(&server).unwrap();
//! assert_eq!(text, "host: localhost\nport: 4321\ndebug: false\n");
//! ```
//!
//! ### Working with Documents Dynamically
//!
//! ```rust
//! use yamlite::parse;
//!
//! let doc = parse("server:\n  port: 4321\n").unwrap();
//! let port = doc
//!     .get("server")
//!     .and_then(|v| v.get("port"))
//!     .and_then(|v| v.as_i64());
//! assert_eq!(port, Some(4321));
//! ```
//!
//! ### Decorated Errors
//!
//! ```rust
//! use yamlite::{parse_with_options, ParseOptions};
//!
//! let options = ParseOptions::new().with_file("site.yml");
//! let err = parse_with_options("title My Site\n", &options).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "configuration parse error: missing key or colon separator (site.yml, line 1)"
//! );
//! ```
//!
//! ### Dynamic Values with the yamlite! Macro
//!
//! ```rust
//! use yamlite::{yamlite, Value};
//!
//! let data = yamlite!({
//!     "name": "Alice",
//!     "tags": ["rust", "config"]
//! });
//!
//! if let Value::Mapping(doc) = data {
//!     assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod spec;
pub mod value;

pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use map::Map;
pub use options::ParseOptions;
pub use ser::Emitter;
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parse a document into its root [`Map`] with default error decoration.
///
/// # Examples
///
/// ```rust
/// use yamlite::parse;
///
/// let doc = parse("title: My Site\nport: 4321\n").unwrap();
/// assert_eq!(doc.get("port").and_then(|v| v.as_i64()), Some(4321));
/// ```
///
/// # Errors
///
/// Returns an error on the first structural violation, with the line number
/// and default file/context labels.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Map> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a document into its root [`Map`], decorating errors with the given
/// file identity and context label.
///
/// # Examples
///
/// ```rust
/// use yamlite::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_file("themes/dusk/theme.yml")
///     .with_context("theme");
/// let err = parse_with_options("  bad\n", &options).unwrap_err();
/// assert!(err.to_string().contains("themes/dusk/theme.yml"));
/// ```
///
/// # Errors
///
/// Returns an error on the first structural violation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Map> {
    de::parse_document(input, options)
}

/// Render a [`Value`] as document text.
///
/// Total: every value has a text form, so this never fails. The output ends
/// with a newline unless it is empty.
///
/// # Examples
///
/// ```rust
/// use yamlite::{serialize, yamlite};
///
/// let doc = yamlite!({ "debug": true });
/// assert_eq!(serialize(&doc), "debug: true\n");
/// ```
#[must_use]
pub fn serialize(value: &Value) -> String {
    Emitter::new().emit(value)
}

/// Serialize any `T: Serialize` to document text.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use yamlite::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (non-string map keys,
/// data-carrying enum variants).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(serialize(&to_value(value)?))
}

/// Serialize any `T: Serialize` to a writer as document text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use yamlite::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value_inner(value)
}

/// Deserialize an instance of type `T` from document text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use yamlite::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is structurally invalid or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &ParseOptions::default())
}

/// Deserialize an instance of type `T` from document text, decorating parse
/// errors with the given options.
///
/// # Errors
///
/// Returns an error if the input is structurally invalid or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Value::Mapping(parse_with_options(s, options)?))
}

/// Deserialize an instance of type `T` from document bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, structurally invalid,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of document text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use std::io::Cursor;
/// use yamlite::from_reader;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x: 1\ny: 2\n")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is structurally invalid, or
/// the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Interpret a [`Value`] as an instance of type `T`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use yamlite::{from_value, yamlite};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let value = yamlite!({ "x": 1, "y": 2 });
/// let point: Point = from_value(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}
