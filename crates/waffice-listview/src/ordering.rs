//! Sort keys and the multi-key comparator.
//!
//! Provides [`Dir`] for sort direction and [`SortKey`] for field-based
//! ordering. Keys are applied as a lexicographic chain: the first key is
//! primary, later keys only break ties.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ListViewError;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dir {
    type Err = ListViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Dir::Asc),
            "desc" => Ok(Dir::Desc),
            other => Err(ListViewError::invalid(
                "dir",
                format!("expected 'asc' or 'desc', got '{other}'"),
            )),
        }
    }
}

/// One entry of the sort chain: a field and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl SortKey {
    /// Creates a sort key with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            field: field.into(),
            dir,
        }
    }

    /// Creates an ascending sort key.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Asc)
    }

    /// Creates a descending sort key.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Desc)
    }

    /// Compares two field values under this key's direction.
    ///
    /// Returns `None` if the values cannot be compared.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        compare_values(a, b).map(|ordering| self.dir.apply(ordering))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.dir)
    }
}

/// Parses `field` or `field:asc|desc`. A bare field sorts ascending.
impl FromStr for SortKey {
    type Err = ListViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.rsplit_once(':') {
            Some((field, dir)) => (field, dir.parse()?),
            None => (s, Dir::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(ListViewError::invalid("sort key", "field name is empty"));
        }
        Ok(SortKey::new(field, dir))
    }
}

/// Collation used for text fields.
///
/// Case-folded comparison first, so "alice" and "Bob" interleave the way a
/// reader expects; exact code point order only breaks folded ties. Digits
/// and punctuation compare by code point, so generation labels such as
/// "23.5" and "23.0" order lexicographically.
pub fn compare_strings(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Compares two field values of the same kind.
///
/// An absent value orders before every present one, the way an empty label
/// would. Returns `None` on a kind mismatch or a NaN.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(compare_strings(a, b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Tags(a), Value::Tags(b)) => Some(
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| compare_strings(x, y))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
        ),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Less),
        (_, Value::None) => Some(Ordering::Greater),

        _ => None,
    }
}

/// Compares two records through a chain of sort keys.
///
/// The first key decides unless it ties, then the second, and so on. If
/// every key ties (or cannot compare) the result is `Equal`, which a
/// stable sort turns into "keep input order".
///
/// The accessor must return a single kind of [`Value`] per field (plus
/// [`Value::None`] for absent ones). Mixed kinds on one field compare as
/// ties with each other but not with `None`, which breaks transitivity and
/// leaves the resulting order unspecified.
pub fn compare_by_keys<T, F>(a: &T, b: &T, keys: &[SortKey], accessor: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    for key in keys {
        let val_a = accessor(a, &key.field);
        let val_b = accessor(b, &key.field);

        match key.compare(&val_a, &val_b) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return ordering,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_parse() {
        assert_eq!("asc".parse::<Dir>().unwrap(), Dir::Asc);
        assert_eq!("DESC".parse::<Dir>().unwrap(), Dir::Desc);
        assert!("down".parse::<Dir>().is_err());
    }

    #[test]
    fn sort_key_parse() {
        assert_eq!(
            "generation:desc".parse::<SortKey>().unwrap(),
            SortKey::desc("generation")
        );
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::asc("name"));
        assert!(":desc".parse::<SortKey>().is_err());
        assert!("name:sideways".parse::<SortKey>().is_err());
    }

    #[test]
    fn sort_key_display_round_trips_through_parse() {
        let key = SortKey::desc("application_date");
        assert_eq!(key.to_string(), "application_date:desc");
    }

    #[test]
    fn strings_fold_case_before_code_points() {
        assert_eq!(compare_strings("alice", "Bob"), Ordering::Less);
        assert_eq!(compare_strings("Alice", "alice"), Ordering::Less);
        assert_eq!(compare_strings("23.5기", "23.0기"), Ordering::Greater);
        assert_eq!(compare_strings("김철수", "김철수"), Ordering::Equal);
    }

    #[test]
    fn absent_values_order_first() {
        let none = Value::None;
        let some = Value::String("23.5");
        assert_eq!(compare_values(&none, &some), Some(Ordering::Less));
        assert_eq!(compare_values(&some, &none), Some(Ordering::Greater));
        assert_eq!(compare_values(&none, &none), Some(Ordering::Equal));
    }

    #[test]
    fn mismatched_kinds_are_incomparable() {
        let s = Value::String("23");
        let n = Value::Number(Number::I64(23));
        assert_eq!(compare_values(&s, &n), None);
    }

    #[test]
    fn mixed_kinds_on_one_field_tie_in_the_chain() {
        fn accessor<'a>(item: &'a (&'static str, i64), _: &str) -> Value<'a> {
            if item.0.is_empty() {
                Value::Number(Number::I64(item.1))
            } else {
                Value::String(item.0)
            }
        }
        let items: [(&'static str, i64); 2] = [("text", 0), ("", 7)];
        let keys = [SortKey::asc("mixed")];
        assert_eq!(
            compare_by_keys(&items[0], &items[1], &keys, &accessor),
            Ordering::Equal
        );
    }

    #[test]
    fn timestamps_and_tags() {
        let a = Value::Timestamp(Timestamp(1000));
        let b = Value::Timestamp(Timestamp(2000));
        assert_eq!(compare_values(&a, &b), Some(Ordering::Less));

        let x = vec!["운영진".to_string()];
        let y = vec!["운영진".to_string(), "팀장".to_string()];
        assert_eq!(
            compare_values(&Value::Tags(&x), &Value::Tags(&y)),
            Some(Ordering::Less)
        );
    }

    struct Row {
        generation: &'static str,
        applied: i64,
    }

    fn row_accessor<'a>(row: &'a Row, field: &str) -> Value<'a> {
        match field {
            "generation" => Value::String(row.generation),
            "applied" => Value::Timestamp(Timestamp(row.applied)),
            _ => Value::None,
        }
    }

    #[test]
    fn chain_uses_later_keys_only_on_ties() {
        let a = Row {
            generation: "23.5",
            applied: 10,
        };
        let b = Row {
            generation: "23.5",
            applied: 20,
        };
        let c = Row {
            generation: "23.0",
            applied: 5,
        };

        let keys = vec![SortKey::desc("generation"), SortKey::asc("applied")];
        assert_eq!(
            compare_by_keys(&a, &b, &keys, &row_accessor),
            Ordering::Less
        );
        assert_eq!(
            compare_by_keys(&a, &c, &keys, &row_accessor),
            Ordering::Less
        );
        assert_eq!(compare_by_keys(&a, &b, &[], &row_accessor), Ordering::Equal);
    }

    #[test]
    fn unknown_sort_field_is_a_tie() {
        let a = Row {
            generation: "1",
            applied: 1,
        };
        let b = Row {
            generation: "2",
            applied: 2,
        };
        let keys = vec![SortKey::asc("nickname")];
        assert_eq!(compare_by_keys(&a, &b, &keys, &row_accessor), Ordering::Equal);
    }
}
