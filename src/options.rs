//! Parse options: error-decoration identity for a document.
//!
//! The parser itself is stateless; the only per-call configuration is how its
//! errors should identify their source. A configuration loader and a
//! theme-metadata loader can share one parser and still produce diagnostics
//! that name the right file and the right kind of document.
//!
//! ## Examples
//!
//! ```rust
//! use yamlite::{parse_with_options, ParseOptions};
//!
//! let options = ParseOptions::new()
//!     .with_file("themes/dusk/theme.yml")
//!     .with_context("theme");
//!
//! let err = parse_with_options("no colon here\n", &options).unwrap_err();
//! assert!(err.to_string().contains("themes/dusk/theme.yml"));
//! assert!(err.to_string().starts_with("theme parse error"));
//! ```

/// Identity attached to parse errors: which file and what kind of document.
///
/// # Examples
///
/// ```rust
/// use yamlite::ParseOptions;
///
/// let options = ParseOptions::new();
/// assert_eq!(options.file, "configuration file");
/// assert_eq!(options.context, "configuration");
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// File identity reported in errors (typically a path).
    pub file: String,
    /// Human-readable label for the document kind (`configuration`, `theme`, ...).
    pub context: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            file: "configuration file".to_string(),
            context: "configuration".to_string(),
        }
    }
}

impl ParseOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file identity reported in errors.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Sets the context label reported in errors.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}
