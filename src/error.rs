//! Error types for INI parsing and decoding.
//!
//! Every failure is fatal to the call that produced it and comes back as a
//! single [`Error`]. The variants fall into four groups, reported by
//! [`Error::category`]:
//!
//! - **Syntax**: the text breaks the line grammar (bad section header, bad
//!   item, item before any section)
//! - **I/O**: the byte stream could not be read
//! - **Schema**: the target type or the document does not have the expected
//!   shape (not a struct, missing section, missing key)
//! - **Decode**: a raw value could not be converted to the field's type
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{parse, Category};
//!
//! let err = parse(b"[Foo]\nbar=1=2").unwrap_err();
//! assert_eq!(err.category(), Category::Syntax);
//! assert!(err.to_string().contains("line 2"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(String),

    /// Section header whose name is not an identifier
    #[error("invalid section at line {line}: {text}")]
    InvalidSection { line: usize, text: String },

    /// Item line without exactly one `=`
    #[error("invalid item at line {line}: {text}")]
    MalformedItem { line: usize, text: String },

    /// Item line whose key is not an identifier
    #[error("invalid key at line {line}: {text}")]
    InvalidKey { line: usize, text: String },

    /// Item line before the first section header
    #[error("default section is not supported (line {line}: {text})")]
    ItemOutsideSection { line: usize, text: String },

    /// The decode target is not a struct where one is required
    #[error("expected a struct for {0}")]
    NotARecord(String),

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("key not found: [{section}]->{key}")]
    KeyNotFound { section: String, key: String },

    /// Field type outside the supported conversion table
    #[error("unsupported type {ty} for [{section}]->{key}")]
    UnsupportedType {
        section: String,
        key: String,
        ty: String,
    },

    /// A raw value that could not be converted to its field's type
    #[error("can't parse [{section}]->{key}: {reason}")]
    Conversion {
        section: String,
        key: String,
        reason: String,
    },

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

/// The coarse error groups of the decoding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Syntax,
    Io,
    Schema,
    Decode,
}

impl Error {
    /// Creates an I/O error for stream read failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    pub(crate) fn invalid_section(line: usize, text: &str) -> Self {
        Error::InvalidSection {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn malformed_item(line: usize, text: &str) -> Self {
        Error::MalformedItem {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn invalid_key(line: usize, text: &str) -> Self {
        Error::InvalidKey {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn item_outside_section(line: usize, text: &str) -> Self {
        Error::ItemOutsideSection {
            line,
            text: text.to_string(),
        }
    }

    /// Creates a schema error for a target that is not a struct.
    pub fn not_a_record(what: &str) -> Self {
        Error::NotARecord(what.to_string())
    }

    /// Creates a schema error naming the missing section.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::section_not_found("Server");
    /// assert_eq!(err.to_string(), "section not found: Server");
    /// ```
    pub fn section_not_found(section: &str) -> Self {
        Error::SectionNotFound(section.to_string())
    }

    /// Creates a schema error naming both the section and the missing key.
    pub fn key_not_found(section: &str, key: &str) -> Self {
        Error::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates an error for a field type the decoder cannot produce.
    pub fn unsupported_type(section: &str, key: &str, ty: &str) -> Self {
        Error::UnsupportedType {
            section: section.to_string(),
            key: key.to_string(),
            ty: ty.to_string(),
        }
    }

    /// Creates a conversion error for the value at `[section]->key`.
    pub fn conversion<T: fmt::Display>(section: &str, key: &str, reason: T) -> Self {
        Error::Conversion {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Attaches `[section]->key` to a context-free message.
    ///
    /// Errors that already name their location pass through unchanged.
    pub(crate) fn at(self, section: &str, key: &str) -> Self {
        match self {
            Error::Custom(reason) => Error::conversion(section, key, reason),
            other => other,
        }
    }

    /// Returns which stage of the pipeline rejected the input.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::Io(_) => Category::Io,
            Error::InvalidSection { .. }
            | Error::MalformedItem { .. }
            | Error::InvalidKey { .. }
            | Error::ItemOutsideSection { .. } => Category::Syntax,
            Error::NotARecord(_) | Error::SectionNotFound(_) | Error::KeyNotFound { .. } => {
                Category::Schema
            }
            Error::UnsupportedType { .. } | Error::Conversion { .. } | Error::Custom(_) => {
                Category::Decode
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
