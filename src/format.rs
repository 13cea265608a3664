//! INI Format Description
//!
//! This module documents the configuration text format accepted by this
//! library and holds the few constants the grammar depends on.
//!
//! # Overview
//!
//! The format is a deliberately small INI dialect: named sections, one
//! `key=value` item per line, whole-line comments. There is no quoting, no
//! escaping, no multi-line value and no default (unnamed) section.
//!
//! # Grammar
//!
//! ```text
//! document       := (blank | comment | section-header | item)*
//! section-header := "[" identifier "]"
//! item           := identifier "=" rest-of-line      ; exactly one "="
//! identifier     := letter (letter | digit)*
//! comment        := (";" | "#") ...                  ; whole line
//! blank          := whitespace-only line
//! ```
//!
//! Each physical line is trimmed of leading and trailing whitespace before it
//! is classified. Nothing else is normalized: `bar = 1` has the key `bar `,
//! which is not an identifier, so the line is rejected.
//!
//! ## Sections
//!
//! ```text
//! [Server]
//! host=localhost
//! port=8080
//! ```
//!
//! **Rules**:
//! - The header name must be an identifier
//! - Items before the first header are an error
//! - Repeating a header starts a fresh section that replaces the earlier one
//!   with the same name
//!
//! ## Items
//!
//! The text after `=` is stored verbatim. Since the value grammar has no
//! escaping, a value can never contain `=`:
//!
//! ```text
//! url=http://host/?a=b   ; rejected, two '=' separators
//! ```
//!
//! ## Comments
//!
//! A line whose first non-blank character is `;` or `#` is skipped. There are
//! no trailing comments: `port=80 ; web` stores the value `80 ; web`.
//!
//! # Value Conversions
//!
//! Values stay strings until they are decoded into a typed field:
//!
//! | Field type | Accepted text | Example |
//! |------------|---------------|---------|
//! | `String`, `&str` | anything | `name=Alice` |
//! | `bool` | `1 t T true TRUE True`, `0 f F false FALSE False` | `debug=true` |
//! | `i8`..`i64` | optional sign, decimal digits, in range | `offset=-5` |
//! | `u8`..`u64` | decimal digits, in range | `port=8080` |
//! | `Duration` | number+unit groups (`ns us µs ms s m h`) | `timeout=1m30s` |
//! | `NaiveDateTime` | `YYYY-MM-DDThh:mm:ss` | `start=2023-01-02T03:04:05` |
//!
//! Durations and timestamps are selected per field with
//! [`crate::with::duration`] and [`crate::with::timestamp`].

use lazy_static::lazy_static;
use regex::Regex;

/// The `chrono` layout for timestamp values.
///
/// No zone offset and no fractional seconds are accepted.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Shape of a timestamp: `D` is a decimal digit, anything else is literal.
pub(crate) const TIMESTAMP_SHAPE: &[u8; 19] = b"DDDD-DD-DDTDD:DD:DD";

lazy_static! {
    /// A Unicode letter, then letters or decimal digits.
    static ref IDENTIFIER: Regex = Regex::new(r"^\p{L}[\p{L}\p{Nd}]*$").expect("identifier pattern");
}

/// Returns `true` if `s` is a valid section or key name.
///
/// An identifier starts with a letter (Unicode category `L`) and continues
/// with letters or decimal digits (category `Nd`). Letter-like numbers such
/// as `Ⅻ` are not letters.
///
/// # Examples
///
/// ```rust
/// use serde_ini::format::is_identifier;
///
/// assert!(is_identifier("Server2"));
/// assert!(!is_identifier("2Server"));
/// assert!(!is_identifier("max_conns"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}
