//! Type-directed decoding of a parsed [`Document`].
//!
//! This module provides the [`Deserializer`] that walks a two-level schema
//! (sections, then keys) and converts raw values according to the type each
//! field asks for.
//!
//! ## Overview
//!
//! Decoding is driven by the target type, never by the document:
//!
//! - **Record level**: the target must be a struct; each field names a section
//! - **Section level**: each section field must itself be a struct; each of its
//!   fields names a key
//! - **Value level**: the serde hint the field's type issues (`deserialize_u16`,
//!   `deserialize_bool`, ...) selects a [`Kind`], which selects the conversion
//!
//! Fields are visited in declaration order and the first missing section,
//! missing key or failed conversion stops the walk. Sections and keys present
//! in the document but absent from the schema are ignored.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! #[allow(non_snake_case)]
//! struct Config { Server: Server }
//!
//! let config: Config = serde_ini::from_str("[Server]\nhost=example.org\nport=443").unwrap();
//! assert_eq!(config.Server.port, 443);
//! ```

use crate::document::{Document, Section};
use crate::value::{Kind, Value, Width};
use crate::{Error, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::{de, forward_to_deserialize_any};
use std::slice;

/// The INI deserializer.
///
/// Borrows a parsed [`Document`]; string fields may borrow from it in turn.
/// Created via [`Deserializer::new`].
pub struct Deserializer<'de> {
    document: &'de Document,
}

impl<'de> Deserializer<'de> {
    #[must_use]
    pub fn new(document: &'de Document) -> Self {
        Deserializer { document }
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::not_a_record("the decode target"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(SectionsAccess::new(self.document, fields))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// Yields one entry per schema section, in declaration order.
struct SectionsAccess<'de> {
    document: &'de Document,
    fields: slice::Iter<'static, &'static str>,
    current: Option<(&'static str, &'de Section)>,
}

impl<'de> SectionsAccess<'de> {
    fn new(document: &'de Document, fields: &'static [&'static str]) -> Self {
        SectionsAccess {
            document,
            fields: fields.iter(),
            current: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionsAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let name = match self.fields.next() {
            Some(name) => *name,
            None => return Ok(None),
        };
        let section = self
            .document
            .get(name)
            .ok_or_else(|| Error::section_not_found(name))?;
        self.current = Some((name, section));
        seed.deserialize(BorrowedStrDeserializer::new(name))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.current.take() {
            Some((name, section)) => seed.deserialize(SectionDeserializer { name, section }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

struct SectionDeserializer<'de> {
    name: &'static str,
    section: &'de Section,
}

impl<'de> de::Deserializer<'de> for SectionDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::not_a_record(&format!("section `{}`", self.name)))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(KeysAccess {
            section_name: self.name,
            section: self.section,
            fields: fields.iter(),
            current: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// Yields one entry per schema key of a section, in declaration order.
struct KeysAccess<'de> {
    section_name: &'static str,
    section: &'de Section,
    fields: slice::Iter<'static, &'static str>,
    current: Option<ValueDeserializer<'de>>,
}

impl<'de> de::MapAccess<'de> for KeysAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let key = match self.fields.next() {
            Some(key) => *key,
            None => return Ok(None),
        };
        let raw = self
            .section
            .get(key)
            .ok_or_else(|| Error::key_not_found(self.section_name, key))?;
        self.current = Some(ValueDeserializer {
            section: self.section_name,
            key,
            raw,
        });
        seed.deserialize(BorrowedStrDeserializer::new(key))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.current.take() {
            Some(value) => seed
                .deserialize(value)
                .map_err(|e| e.at(value.section, value.key)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// A single raw value together with its location.
#[derive(Clone, Copy)]
struct ValueDeserializer<'de> {
    section: &'static str,
    key: &'static str,
    raw: &'de str,
}

impl<'de> ValueDeserializer<'de> {
    fn visit<V>(self, kind: Kind, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let value = Value::convert(self.raw, kind).map_err(|e| e.at(self.section, self.key))?;
        match value {
            Value::Text(s) => visitor.visit_borrowed_str(s),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Uint(u) => visitor.visit_u64(u),
            // Selected only through the `with` helpers, which convert on their own.
            Value::Duration(_) | Value::Timestamp(_) => Err(self.unsupported(&kind.to_string())),
        }
    }

    fn unsupported(&self, ty: &str) -> Error {
        Error::unsupported_type(self.section, self.key, ty)
    }
}

macro_rules! unsupported {
    ($($method:ident => $ty:expr,)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(self.unsupported($ty))
            }
        )*
    };
}

macro_rules! integer {
    ($($method:ident => $kind:expr,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.visit($kind, visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = Error;

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit(Kind::Bool, visitor)
    }

    integer! {
        deserialize_i8 => Kind::SignedInt(Width::W8),
        deserialize_i16 => Kind::SignedInt(Width::W16),
        deserialize_i32 => Kind::SignedInt(Width::W32),
        deserialize_i64 => Kind::SignedInt(Width::W64),
        deserialize_u8 => Kind::UnsignedInt(Width::W8),
        deserialize_u16 => Kind::UnsignedInt(Width::W16),
        deserialize_u32 => Kind::UnsignedInt(Width::W32),
        deserialize_u64 => Kind::UnsignedInt(Width::W64),
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit(Kind::Text, visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit(Kind::Text, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    unsupported! {
        deserialize_any => "any",
        deserialize_i128 => "i128",
        deserialize_u128 => "u128",
        deserialize_f32 => "f32",
        deserialize_f64 => "f64",
        deserialize_char => "char",
        deserialize_bytes => "bytes",
        deserialize_byte_buf => "byte buffer",
        deserialize_option => "Option",
        deserialize_unit => "()",
        deserialize_seq => "sequence",
        deserialize_map => "map",
        deserialize_identifier => "identifier",
        deserialize_ignored_any => "ignored value",
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(name))
    }

    fn deserialize_tuple<V>(self, len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(&format!("tuple of {len}")))
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(name))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(&format!("struct {name}")))
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(&format!("enum {name}")))
    }
}
