//! Runtime field values used for searching, filtering and sorting.
//!
//! A [`Value`] borrows from the record it was read from. The engine never
//! looks at records directly; it only sees the values returned by the
//! caller's accessor.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Value of a single record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use waffice_listview::{Number, Value};
///
/// struct Member {
///     name: String,
///     generation: String,
///     access_rights: Vec<String>,
///     dues_paid: i64,
/// }
///
/// fn accessor<'a>(member: &'a Member, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&member.name),
///         "generation" => Value::String(&member.generation),
///         "access_rights" => Value::Tags(&member.access_rights),
///         "dues_paid" => Value::Number(Number::from(member.dues_paid)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value.
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Point in time (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Multi-valued label field, such as a member's access rights.
    Tags(&'a [String]),
    /// Field absent, empty, or unknown to the accessor.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the tag list, if present.
    pub fn as_tags(&self) -> Option<&'a [String]> {
        match self {
            Value::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    /// Returns `Value::String` for `Some`, `Value::None` otherwise.
    ///
    /// Handy for optional record fields.
    pub fn from_opt_str(s: Option<&'a str>) -> Self {
        s.map_or(Value::None, Value::String)
    }

    /// Case-insensitive substring test used by the text search.
    ///
    /// `needle` must already be lower-cased. Strings match on substring,
    /// tag lists match when any tag matches. Other values never match.
    pub(crate) fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Value::String(s) => s.to_lowercase().contains(needle),
            Value::Tags(tags) => tags.iter().any(|t| t.to_lowercase().contains(needle)),
            _ => false,
        }
    }
}

/// Numeric field value, such as a record id.
///
/// Integers keep their exact value; mixed kinds compare through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for mixed comparisons.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers. Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Milliseconds since the Unix epoch.
///
/// Timezone-agnostic; callers convert from whatever datetime type their
/// records carry.
///
/// ```
/// use waffice_listview::Timestamp;
///
/// assert!(Timestamp::from_secs(1) < Timestamp::from_millis(1500));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a timestamp from seconds since the Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since the Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
