//! Field attributes for the non-primitive value kinds.
//!
//! Serde's data model has no notion of a duration or a timestamp, so these
//! kinds are selected explicitly on each field with `#[serde(with = ...)]`.
//! Both helpers ask the deserializer for a string and convert it with the
//! same rules as [`Value::convert`](crate::Value::convert), which makes them
//! usable with any serde format that yields strings.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDateTime;
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize)]
//! struct Schedule {
//!     #[serde(with = "serde_ini::with::duration")]
//!     every: Duration,
//!     #[serde(with = "serde_ini::with::timestamp")]
//!     start: NaiveDateTime,
//! }
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     #[serde(rename = "Backup")]
//!     backup: Schedule,
//! }
//!
//! let config: Config =
//!     serde_ini::from_str("[Backup]\nevery=6h\nstart=2024-01-15T02:00:00").unwrap();
//! assert_eq!(config.backup.every, Duration::from_secs(6 * 3600));
//! ```

/// `std::time::Duration` from expressions such as `1h30m` or `250ms`.
pub mod duration {
    use crate::value::{Kind, Value};
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(DurationVisitor)
    }

    struct DurationVisitor;

    impl<'de> Visitor<'de> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a duration such as `1h30m`")
        }

        fn visit_str<E>(self, v: &str) -> Result<Duration, E>
        where
            E: de::Error,
        {
            match Value::convert(v, Kind::Duration).map_err(E::custom)? {
                Value::Duration(duration) => Ok(duration),
                other => Err(E::custom(format!("expected a duration, got {}", other.kind()))),
            }
        }
    }
}

/// `chrono::NaiveDateTime` from the exact `YYYY-MM-DDThh:mm:ss` layout.
pub mod timestamp {
    use crate::value::{Kind, Value};
    use chrono::NaiveDateTime;
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(TimestampVisitor)
    }

    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = NaiveDateTime;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a timestamp in YYYY-MM-DDThh:mm:ss form")
        }

        fn visit_str<E>(self, v: &str) -> Result<NaiveDateTime, E>
        where
            E: de::Error,
        {
            match Value::convert(v, Kind::Timestamp).map_err(E::custom)? {
                Value::Timestamp(timestamp) => Ok(timestamp),
                other => Err(E::custom(format!("expected a timestamp, got {}", other.kind()))),
            }
        }
    }
}
