//! Record predicates: free-text search and per-column filters.
//!
//! A record is visible when it matches the search text on at least one
//! searchable field AND every installed column filter.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Lower-cased search needle, prepared once per view computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText {
    folded: String,
}

impl SearchText {
    /// Prepares `text` for case-insensitive matching.
    pub fn new(text: &str) -> Self {
        SearchText {
            folded: text.to_lowercase(),
        }
    }

    /// Returns `true` if the needle is empty and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Tests `item` against the needle on any of `fields`.
    ///
    /// An empty needle matches every record, even one with no searchable
    /// fields at all.
    pub fn matches<T, F>(&self, item: &T, fields: &[String], accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        if self.is_empty() {
            return true;
        }
        fields
            .iter()
            .any(|field| accessor(item, field).contains_folded(&self.folded))
    }
}

/// A column filter, as offered by the dropdowns in a table header.
///
/// "Show everything" is expressed by not installing a filter for the
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnFilter {
    /// The field must equal `value` exactly. Records lacking the field are
    /// compared using `default` when one is given and never match otherwise.
    Equals {
        field: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// The tag field must contain every one of `values`. An empty list
    /// matches all records.
    HasAll { field: String, values: Vec<String> },
}

impl ColumnFilter {
    /// Equality filter without a default for absent values.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        ColumnFilter::Equals {
            field: field.into(),
            value: value.into(),
            default: None,
        }
    }

    /// Equality filter treating absent values as `default`.
    pub fn equals_or(
        field: impl Into<String>,
        value: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        ColumnFilter::Equals {
            field: field.into(),
            value: value.into(),
            default: Some(default.into()),
        }
    }

    /// Tag containment filter.
    pub fn has_all<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnFilter::HasAll {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The column this filter applies to.
    pub fn field(&self) -> &str {
        match self {
            ColumnFilter::Equals { field, .. } | ColumnFilter::HasAll { field, .. } => field,
        }
    }

    /// Tests a field value against this filter.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match self {
            ColumnFilter::Equals { value, default, .. } => match field_value {
                Value::String(s) => *s == value.as_str(),
                Value::None => default.as_deref() == Some(value.as_str()),
                _ => false,
            },
            ColumnFilter::HasAll { values, .. } => {
                if values.is_empty() {
                    return true;
                }
                let tags = field_value.as_tags().unwrap_or(&[]);
                values.iter().all(|wanted| tags.contains(wanted))
            }
        }
    }

    /// Tests `item` by reading this filter's column through `accessor`.
    pub fn matches_item<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.matches(&accessor(item, self.field()))
    }
}
