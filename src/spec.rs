//! Format Specification
//!
//! This module documents the configuration dialect implemented by this library:
//! a small, indentation-structured subset of YAML covering nested mappings,
//! sequences, typed scalars and comments.
//!
//! # Overview
//!
//! Documents are line-oriented. Each meaningful line is either a `key: value`
//! pair, a bare `key:` header opening a nested block, or a `- item` sequence
//! entry. There are no multi-line scalars, anchors, aliases, flow collections
//! (beyond the empty literals `[]` and `{}`), documents streams or type tags.
//!
//! ## Design Philosophy
//!
//! - **Predictability**: one indentation unit (2 spaces), one scalar coercion
//!   order, one spelling per value on output
//! - **Fail fast**: the first structural violation aborts the parse with a
//!   line-numbered error; no partial documents
//! - **Round trips**: a parsed document serializes back to an equivalent
//!   document, with key order preserved
//!
//! # Core Syntax
//!
//! ## Mappings
//!
//! ```text
//! title: My Site
//! server:
//!   host: localhost
//!   port: 4321
//! ```
//!
//! **Rules**:
//! - The colon splits at its *first* occurrence; keys therefore cannot contain
//!   `:` but values may (`url: http://example.com` works)
//! - Keys and values are trimmed of surrounding whitespace
//! - An empty key (nothing before the colon) is an error
//! - A key with an empty value opens a nested block; the block's kind is
//!   decided by the next meaningful line (a deeper dash line makes it a
//!   sequence, anything else a mapping, including nothing at all, which
//!   yields an empty mapping)
//! - A duplicate key replaces the earlier value but keeps its position
//!
//! ## Sequences
//!
//! ```text
//! tags:
//!   - rust
//!   - config
//! nav:
//!   - name: home
//!     url: /
//!   -
//!     - nested
//!     - deeper
//! ```
//!
//! **Rules**:
//! - An item line is a lone `-` or `- ` followed by a payload, at the depth
//!   opened by its parent
//! - `- key: value` starts a mapping element; following `key: value` lines at
//!   the same payload depth extend that element
//! - A bare `-` opens a nested container, decided by lookahead like an
//!   empty-valued key
//! - A dash line outside a sequence context is an error, as is a `key: value`
//!   line directly inside a sequence context
//!
//! ## Scalars
//!
//! Unquoted scalars are coerced in a fixed order; the first rule that matches
//! wins:
//!
//! | Order | Spelling | Value |
//! |-------|----------|-------|
//! | 1 | `[]` | empty sequence |
//! | 2 | `{}` | empty mapping |
//! | 3 | `~`, `null` (any case) | null |
//! | 4 | `true` / `false` (any case) | boolean |
//! | 5 | optional sign + digits | 64-bit integer |
//! | 6 | optional sign + digits + `.` + digits | 64-bit float |
//! | 7 | `"..."` or `'...'` | string, quotes stripped |
//! | 8 | anything else | string, verbatim |
//!
//! Quoting forces the string reading: `"42"` is the string `42`, `'null'` is
//! the string `null`. Quotes are only stripped when the fragment both starts
//! and ends with the same quote character; no escape sequences are processed
//! on input. Integers that overflow 64 bits fall through to strings.
//!
//! ## Comments and Whitespace
//!
//! - `#` starts a comment unless it appears inside single or double quotes on
//!   the same line; the comment runs to end of line
//! - Blank and comment-only lines are ignored everywhere and never terminate
//!   a block
//! - Tabs count as two spaces; CRLF line endings are accepted
//! - Indentation must be a multiple of 2 spaces; each nesting level is exactly
//!   one unit deeper than its parent
//!
//! # Errors
//!
//! Every structural failure carries a kind, a message, the source identity
//! from [`crate::ParseOptions`], and the 1-based line number:
//!
//! ```text
//! configuration parse error: missing key or colon separator (site.yml, line 3)
//! ```
//!
//! | Kind | Trigger |
//! |------|---------|
//! | `Indentation` | leading spaces not a multiple of 2 |
//! | `MissingColon` | non-dash line without a colon |
//! | `EmptyKey` | nothing before the colon |
//! | `ArrayContext` | dash line outside a sequence |
//! | `KeyContext` | key/value line directly inside a sequence |
//!
//! # Output Conventions
//!
//! The emitter produces one canonical spelling per value:
//!
//! - Nested mappings and non-empty sequences as indented blocks; empty
//!   sequences as `[]`; an empty mapping value as a bare `key:` header
//! - Null as `null`, booleans lowercase, whole floats with a `.0` suffix so
//!   they re-parse as floats
//! - Strings double-quoted only when empty or containing `:`, `-`, `#` or
//!   whitespace, with embedded `"` escaped as `\"`
//!
//! # Round-Trip Caveats
//!
//! `parse(serialize(v))` reproduces `v` for typical configuration documents.
//! Three asymmetries are inherent to the dialect:
//!
//! - A *string* whose text spells another scalar (`true`, `42`, `null`) is
//!   emitted bare and re-parses as that scalar; quoting on output triggers
//!   only on structure characters
//! - A string containing a literal `"` is emitted with `\"` escapes that the
//!   parser does not unescape
//! - Non-finite floats have no numeric spelling and come back as strings
