//! Typed values and the conversion table.
//!
//! Parsing keeps every value as raw text. Decoding converts that text
//! according to a [`Kind`], the closed set of field types the decoder can
//! produce, into a [`Value`].
//!
//! ## Core Types
//!
//! - [`Kind`]: which conversion applies to a field
//! - [`Width`]: bit width of a fixed-width integer kind
//! - [`Value`]: the result of a successful conversion
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{Kind, Value, Width};
//! use std::time::Duration;
//!
//! assert_eq!(Value::convert("42", Kind::UnsignedInt(Width::W8)).unwrap(), Value::Uint(42));
//! assert!(Value::convert("300", Kind::UnsignedInt(Width::W8)).is_err());
//!
//! let timeout = Value::convert("1m30s", Kind::Duration).unwrap();
//! assert_eq!(timeout, Value::Duration(Duration::from_secs(90)));
//! ```

use crate::format::{TIMESTAMP_FORMAT, TIMESTAMP_SHAPE};
use crate::{Error, Result};
use chrono::{NaiveDateTime, Timelike};
use std::fmt;
use std::num::IntErrorKind;
use std::time::Duration;

/// Bit width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Smallest value of the signed integer of this width.
    #[must_use]
    pub fn signed_min(self) -> i64 {
        i64::MIN >> (64 - self.bits())
    }

    /// Largest value of the signed integer of this width.
    #[must_use]
    pub fn signed_max(self) -> i64 {
        i64::MAX >> (64 - self.bits())
    }

    /// Largest value of the unsigned integer of this width.
    #[must_use]
    pub fn unsigned_max(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }
}

/// The type descriptor of a leaf field.
///
/// Each variant selects one row of the conversion table; see
/// [`Value::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Bool,
    SignedInt(Width),
    UnsignedInt(Width),
    Duration,
    Timestamp,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Text => f.write_str("string"),
            Kind::Bool => f.write_str("bool"),
            Kind::SignedInt(width) => write!(f, "i{}", width.bits()),
            Kind::UnsignedInt(width) => write!(f, "u{}", width.bits()),
            Kind::Duration => f.write_str("duration"),
            Kind::Timestamp => f.write_str("timestamp"),
        }
    }
}

/// A converted field value.
///
/// Text borrows from the document it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Bool(bool),
    /// Signed integer, already checked against its width
    Int(i64),
    /// Unsigned integer, already checked against its width
    Uint(u64),
    Duration(Duration),
    Timestamp(NaiveDateTime),
}

impl<'a> Value<'a> {
    /// Converts raw document text into a value of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] describing why the text does not fit `kind`.
    /// Text conversion never fails.
    pub fn convert(raw: &'a str, kind: Kind) -> Result<Self> {
        match kind {
            Kind::Text => Ok(Value::Text(raw)),
            Kind::Bool => parse_bool(raw).map(Value::Bool),
            Kind::SignedInt(width) => parse_signed(raw, width).map(Value::Int),
            Kind::UnsignedInt(width) => parse_unsigned(raw, width).map(Value::Uint),
            Kind::Duration => parse_duration(raw).map(Value::Duration),
            Kind::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
        }
    }

    /// Returns the descriptor this value was converted with.
    ///
    /// Integer widths are not retained, so integers report `W64`.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::SignedInt(Width::W64),
            Value::Uint(_) => Kind::UnsignedInt(Width::W64),
            Value::Duration(_) => Kind::Duration,
            Value::Timestamp(_) => Kind::Timestamp,
        }
    }
}

/// Parses a boolean literal.
///
/// Accepts `1 t T true TRUE True` and `0 f F false FALSE False`.
///
/// # Errors
///
/// Any other text is rejected.
pub fn parse_bool(raw: &str) -> Result<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(Error::custom(format!("invalid boolean `{raw}`"))),
    }
}

/// Parses an optionally signed decimal integer that fits `width` bits.
///
/// # Errors
///
/// Rejects non-numeric text and values outside the signed range.
pub fn parse_signed(raw: &str, width: Width) -> Result<i64> {
    let out_of_range = || {
        Error::custom(format!(
            "value `{raw}` out of range for i{}",
            width.bits()
        ))
    };

    let value = raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => Error::custom(format!("invalid integer `{raw}`")),
    })?;

    if value < width.signed_min() || value > width.signed_max() {
        return Err(out_of_range());
    }
    Ok(value)
}

/// Parses a non-negative decimal integer that fits `width` bits.
///
/// # Errors
///
/// Rejects signs, non-numeric text and values above the unsigned range.
pub fn parse_unsigned(raw: &str, width: Width) -> Result<u64> {
    let out_of_range = || {
        Error::custom(format!(
            "value `{raw}` out of range for u{}",
            width.bits()
        ))
    };

    if raw.starts_with('-') && raw.len() > 1 {
        return Err(Error::custom(format!("negative value `{raw}` for u{}", width.bits())));
    }
    if raw.starts_with('+') {
        return Err(Error::custom(format!("invalid integer `{raw}`")));
    }

    let value = raw.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => out_of_range(),
        _ => Error::custom(format!("invalid integer `{raw}`")),
    })?;

    if value > width.unsigned_max() {
        return Err(out_of_range());
    }
    Ok(value)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

/// Parses a duration such as `300ms`, `1.5h` or `2h45m10s`.
///
/// The expression is an optional sign followed by one or more
/// number-and-unit groups; the bare literal `0` needs no unit. Valid units
/// are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
///
/// # Errors
///
/// Rejects malformed expressions, unknown or missing units, negative
/// non-zero totals and totals beyond `u64::MAX` nanoseconds.
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let invalid = |why: &str| Error::custom(format!("invalid duration `{raw}`: {why}"));

    let (negative, mut rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after) = rest.split_at(int_len);
        let (frac_part, after) = match after.strip_prefix('.') {
            Some(after) => {
                let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
                after.split_at(frac_len)
            }
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let scale = match unit_nanos(unit) {
            Some(scale) => scale,
            None if unit.is_empty() => return Err(invalid("missing unit")),
            None => return Err(invalid(&format!("unknown unit `{unit}`"))),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid("overflow"))?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(|| invalid("overflow"))?;
        if !frac_part.is_empty() {
            // Digits past nanosecond precision of an hour cannot matter.
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits.parse().map_err(|_| invalid("overflow"))?;
            let digit_count = u32::try_from(digits.len()).map_err(|_| invalid("overflow"))?;
            nanos = nanos
                .checked_add(frac * scale / 10u128.pow(digit_count))
                .ok_or_else(|| invalid("overflow"))?;
        }
        total = total.checked_add(nanos).ok_or_else(|| invalid("overflow"))?;
        rest = after;
    }

    if negative && total != 0 {
        return Err(invalid("negative durations are not supported"));
    }
    let nanos = u64::try_from(total).map_err(|_| invalid("overflow"))?;
    Ok(Duration::from_nanos(nanos))
}

/// Parses a timestamp in the exact `YYYY-MM-DDThh:mm:ss` layout.
///
/// # Errors
///
/// Rejects any deviation from the layout (zone suffixes, fractional seconds,
/// missing zero padding) and impossible dates or times.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let mismatch = || {
        Error::custom(format!(
            "timestamp `{raw}` does not match YYYY-MM-DDThh:mm:ss"
        ))
    };

    let bytes = raw.as_bytes();
    if bytes.len() != TIMESTAMP_SHAPE.len() {
        return Err(mismatch());
    }
    let shaped = bytes
        .iter()
        .zip(TIMESTAMP_SHAPE.iter())
        .all(|(b, shape)| match shape {
            b'D' => b.is_ascii_digit(),
            literal => b == literal,
        });
    if !shaped {
        return Err(mismatch());
    }

    let timestamp = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|e| Error::custom(format!("invalid timestamp `{raw}`: {e}")))?;
    // chrono reads `60` as a leap second; the layout only allows 00-59.
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(Error::custom(format!(
            "invalid timestamp `{raw}`: second out of range"
        )));
    }
    Ok(timestamp)
}
