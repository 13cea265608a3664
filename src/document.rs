//! Parsed INI documents.
//!
//! This module provides [`Document`], the in-memory result of parsing a
//! configuration buffer, and [`Section`], the key/value contents under one
//! section header. Both are thin wrappers around [`IndexMap`], so iteration
//! follows the order in which sections and keys were committed; decoding
//! never depends on that order.
//!
//! A `Document` can only be built by parsing, which guarantees that every
//! section name and key is a valid identifier (see [`crate::format`]).
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::Document;
//!
//! let doc = Document::parse(b"; comment\n[Server]\nhost=localhost\nport=8080\n").unwrap();
//!
//! assert_eq!(doc.len(), 1);
//! assert_eq!(doc.get("Server").and_then(|s| s.get("port")), Some("8080"));
//! ```

use crate::format::is_identifier;
use crate::{Error, Result};
use indexmap::IndexMap;
use std::io::{self, BufRead};
use std::str::FromStr;

/// The key/value pairs of one section, values kept as raw strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section(IndexMap<String, String>);

impl Section {
    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of keys in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the section has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in commit order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the key/value pairs, in commit order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A parsed configuration buffer: section name to [`Section`].
///
/// # Examples
///
/// ```rust
/// use serde_ini::Document;
///
/// let doc: Document = "[A]\nx=1\n[B]\ny=2".parse().unwrap();
///
/// let names: Vec<_> = doc.section_names().cloned().collect();
/// assert_eq!(names, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(IndexMap<String, Section>);

impl Document {
    /// Parses a byte buffer into a document.
    ///
    /// Empty input yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming the offending line, or [`Error::Io`] if
    /// the buffer is not valid UTF-8.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// Parses a document from any byte stream.
    ///
    /// # Errors
    ///
    /// Read failures propagate as [`Error::Io`] and abort the parse.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut parser = Parser::default();
        for (index, line) in io::BufReader::new(reader).lines().enumerate() {
            parser.line(index + 1, &line?)?;
        }
        Ok(parser.finish())
    }

    /// Returns the section named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the section names, in commit order.
    pub fn section_names(&self) -> indexmap::map::Keys<'_, String, Section> {
        self.0.keys()
    }

    /// Returns an iterator over the sections, in commit order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Section> {
        self.0.iter()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Section);
    type IntoIter = indexmap::map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Line-by-line builder for a [`Document`].
///
/// The pending section is only committed when the next header arrives or the
/// input ends, so a repeated header replaces the earlier section wholesale.
#[derive(Default)]
struct Parser {
    document: Document,
    pending: Option<(String, Section)>,
}

impl Parser {
    fn line(&mut self, number: usize, raw: &str) -> Result<()> {
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return Ok(());
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if !is_identifier(name) {
                return Err(Error::invalid_section(number, line));
            }
            self.commit();
            self.pending = Some((name.to_string(), Section::default()));
            return Ok(());
        }

        let mut parts = line.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => return Err(Error::malformed_item(number, line)),
        };
        if !is_identifier(key) {
            return Err(Error::invalid_key(number, line));
        }

        match self.pending.as_mut() {
            Some((_, section)) => {
                section.insert(key, value);
                Ok(())
            }
            None => Err(Error::item_outside_section(number, line)),
        }
    }

    fn commit(&mut self) {
        if let Some((name, section)) = self.pending.take() {
            self.document.0.insert(name, section);
        }
    }

    fn finish(mut self) -> Document {
        self.commit();
        self.document
    }
}
