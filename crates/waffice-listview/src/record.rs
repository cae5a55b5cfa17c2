//! The [`Listable`] trait connecting record types to the engine.

use crate::value::Value;

/// Stable unique identifier of a record.
pub type RecordId = i64;

/// A record that can be shown in a list view.
///
/// The engine is generic over record shape: it only needs the identifier
/// (for selection) and field access (for search, column filters and
/// sorting).
///
/// ```
/// use waffice_listview::{Listable, RecordId, Value};
///
/// struct Application {
///     id: RecordId,
///     name: String,
///     generation: String,
/// }
///
/// impl Listable for Application {
///     fn record_id(&self) -> RecordId {
///         self.id
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "generation" => Value::String(&self.generation),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Listable {
    /// Returns the record's stable identifier.
    fn record_id(&self) -> RecordId;

    /// Returns the value of `field`, or [`Value::None`] when the record
    /// has no such field or it is empty.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Free-function form of [`Listable::field_value`], usable wherever
    /// the engine takes an accessor.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}
