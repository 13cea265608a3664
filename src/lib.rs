//! # serde_ini
//!
//! A Serde-compatible decoder for a small, strict INI-like configuration format.
//!
//! ## What does it do?
//!
//! Configuration text is parsed into a [`Document`] (section name to key/value
//! pairs), which is then decoded into your own two-level struct: the outer
//! struct's fields are sections, each section struct's fields are keys, and
//! each leaf field's type decides how its raw string is converted.
//!
//! ## Key Features
//!
//! - **Strict Grammar**: identifiers only, one `=` per item, no default section
//! - **Serde Compatible**: schemas are plain `#[derive(Deserialize)]` structs
//! - **Typed Leaves**: strings, booleans, fixed-width integers, durations, timestamps
//! - **Fail-Fast**: the first missing section, missing key or bad value stops decoding
//! - **In-Place**: [`unmarshal`] and [`decode`] write into an existing record
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize, Debug, Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     #[serde(with = "serde_ini::with::duration")]
//!     timeout: Duration,
//! }
//!
//! #[derive(Deserialize, Debug, Default)]
//! struct Config {
//!     #[serde(rename = "Server")]
//!     server: Server,
//! }
//!
//! let text = "\
//! ; front end
//! [Server]
//! host=localhost
//! port=8080
//! timeout=30s
//! ";
//!
//! let mut config = Config::default();
//! serde_ini::unmarshal(text.as_bytes(), &mut config).unwrap();
//! assert_eq!(config.server.port, 8080);
//! assert_eq!(config.server.timeout, Duration::from_secs(30));
//! ```
//!
//! ## Schema Rules
//!
//! - Names match exactly and case-sensitively; use `#[serde(rename)]` to map a
//!   Rust field onto an INI identifier
//! - Every schema section and key must be present; extra ones are ignored
//! - Durations and timestamps are chosen per field through [`with`]
//! - Any other leaf type (floats, options, sequences, maps, nested structs)
//!   fails with [`Error::UnsupportedType`]
//!
//! See [`format`] for the full grammar and conversion table.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No shared state: independent calls never interact
//! - No panics in public API

pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod value;
pub mod with;

pub use de::Deserializer;
pub use document::{Document, Section};
pub use error::{Category, Error, Result};
pub use value::{Kind, Value, Width};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io;

/// Parse a byte buffer into a [`Document`].
///
/// # Examples
///
/// ```rust
/// let doc = serde_ini::parse(b"[Foo]\nbar=1").unwrap();
/// assert_eq!(doc.get("Foo").and_then(|s| s.get("bar")), Some("1"));
/// ```
///
/// # Errors
///
/// Returns a syntax error for malformed lines, or [`Error::Io`] if the buffer
/// cannot be read as UTF-8 text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(bytes: &[u8]) -> Result<Document> {
    Document::parse(bytes)
}

/// Decode a parsed document into an existing record, field by field.
///
/// Fields are overwritten in declaration order as soon as they convert. If
/// decoding fails, fields written before the failure keep their new values
/// and later fields keep their old ones.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Default)]
/// struct Limits { conns: u32 }
///
/// #[derive(Deserialize, Default)]
/// #[allow(non_snake_case)]
/// struct Config { Limits: Limits }
///
/// let doc = serde_ini::parse(b"[Limits]\nconns=64").unwrap();
/// let mut config = Config::default();
/// serde_ini::decode(&doc, &mut config).unwrap();
/// assert_eq!(config.Limits.conns, 64);
/// ```
///
/// # Errors
///
/// Returns a schema error for a missing section or key or a non-struct target,
/// and a decode error for an unsupported field type or a failed conversion.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode<'de, T>(document: &'de Document, target: &mut T) -> Result<()>
where
    T: Deserialize<'de>,
{
    let mut deserializer = Deserializer::new(document);
    T::deserialize_in_place(&mut deserializer, target)
}

/// Parse a byte buffer and decode it into an existing record.
///
/// This is [`parse`] followed by [`decode`].
///
/// # Errors
///
/// Returns any error either stage produces.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal<T>(bytes: &[u8], target: &mut T) -> Result<()>
where
    T: DeserializeOwned,
{
    let document = parse(bytes)?;
    decode(&document, target)
}

/// Deserialize a fresh instance of type `T` from a parsed document.
///
/// String slices in `T` may borrow from the document.
///
/// # Errors
///
/// Same as [`decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<'de, T>(document: &'de Document) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(&mut Deserializer::new(document))
}

/// Deserialize an instance of type `T` from INI text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// #[allow(non_snake_case)]
/// struct Shape { Origin: Point }
///
/// let shape: Shape = serde_ini::from_str("[Origin]\nx=1\ny=-2").unwrap();
/// assert_eq!(shape.Origin, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid or cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice(s.as_bytes())
}

/// Deserialize an instance of type `T` from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid INI, or
/// cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let document = parse(bytes)?;
    from_document(&document)
}

/// Deserialize an instance of type `T` from an I/O stream of INI text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// #[allow(non_snake_case)]
/// struct Shape { Origin: Point }
///
/// let shape: Shape = serde_ini::from_reader(Cursor::new(b"[Origin]\nx=1\ny=2")).unwrap();
/// assert_eq!(shape.Origin, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// INI, or the data cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let document = Document::from_reader(reader)?;
    from_document(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Deserialize, Debug, PartialEq, Default)]
    #[allow(non_snake_case)]
    struct Segment {
        Start: Point,
        End: Point,
    }

    const SEGMENT: &str = "[Start]\nx=1\ny=2\n[End]\nx=3\ny=4\n";

    #[test]
    fn test_from_str() {
        let segment: Segment = from_str(SEGMENT).unwrap();
        assert_eq!(segment.Start, Point { x: 1, y: 2 });
        assert_eq!(segment.End, Point { x: 3, y: 4 });
    }

    #[test]
    fn test_unmarshal_matches_from_str() {
        let mut segment = Segment::default();
        unmarshal(SEGMENT.as_bytes(), &mut segment).unwrap();
        assert_eq!(segment, from_str::<Segment>(SEGMENT).unwrap());
    }

    #[test]
    fn test_decode_reuses_document() {
        let document = parse(SEGMENT.as_bytes()).unwrap();
        let mut first = Segment::default();
        let mut second = Segment::default();
        decode(&document, &mut first).unwrap();
        decode(&document, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_syntax_error_stops_unmarshal() {
        let mut segment = Segment::default();
        let err = unmarshal(b"x=1\n[Start]", &mut segment).unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert_eq!(segment, Segment::default());
    }
}
