use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Extracts one field's raw value from a record.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// A dynamically keyed record, for callers without a typed record struct.
pub type Record = BTreeMap<String, Value>;

/// Anything that can answer "what is field `id` on this record?".
pub trait FieldLookup {
    fn lookup(&self, field_id: &str) -> Option<Value>;
}

impl FieldLookup for BTreeMap<String, Value> {
    fn lookup(&self, field_id: &str) -> Option<Value> {
        self.get(field_id).cloned()
    }
}

impl FieldLookup for HashMap<String, Value> {
    fn lookup(&self, field_id: &str) -> Option<Value> {
        self.get(field_id).cloned()
    }
}

/// Read-only view of the record being formatted, for cross-field lookups.
///
/// Typed getters coerce leniently: missing or mismatched values become zero / empty / false.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    source: Option<&'a dyn FieldLookup>,
}

impl<'a> Row<'a> {
    pub fn new(source: &'a dyn FieldLookup) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A row with no fields. Every lookup misses.
    pub fn empty() -> Row<'static> {
        Row { source: None }
    }

    /// Raw value of `field_id`, or `None` when the field is unknown or null.
    pub fn get(&self, field_id: &str) -> Option<Value> {
        self.source
            .and_then(|source| source.lookup(field_id))
            .filter(|value| !value.is_null())
    }

    pub fn get_i64(&self, field_id: &str) -> i64 {
        self.get(field_id).map_or(0, |v| v.as_i64())
    }

    pub fn get_f64(&self, field_id: &str) -> f64 {
        self.get(field_id).map_or(0.0, |v| v.as_f64())
    }

    pub fn get_text(&self, field_id: &str) -> String {
        self.get(field_id).map(|v| v.as_text()).unwrap_or_default()
    }

    pub fn get_bool(&self, field_id: &str) -> bool {
        self.get(field_id).is_some_and(|v| v.as_bool())
    }
}

impl fmt::Debug for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("bound", &self.source.is_some())
            .finish()
    }
}

/// Field-id keyed accessors for one record type, built once per table.
///
/// Registering the same id twice keeps the last accessor.
pub struct RowAccessor<R> {
    accessors: HashMap<String, Accessor<R>>,
}

impl<R> RowAccessor<R> {
    pub fn new() -> Self {
        Self {
            accessors: HashMap::new(),
        }
    }

    pub fn register(&mut self, field_id: impl Into<String>, accessor: Accessor<R>) {
        self.accessors.insert(field_id.into(), accessor);
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Attach a record so it can be queried by field id.
    pub fn bind<'a>(&'a self, record: &'a R) -> BoundRecord<'a, R> {
        BoundRecord {
            record,
            accessors: self,
        }
    }
}

impl<R> Default for RowAccessor<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for RowAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("RowAccessor").field("fields", &ids).finish()
    }
}

/// A record paired with its table's accessors.
pub struct BoundRecord<'a, R> {
    record: &'a R,
    accessors: &'a RowAccessor<R>,
}

impl<'a, R> BoundRecord<'a, R> {
    pub fn record(&self) -> &'a R {
        self.record
    }

    pub fn row(&self) -> Row<'_> {
        Row::new(self)
    }
}

impl<R> FieldLookup for BoundRecord<'_, R> {
    fn lookup(&self, field_id: &str) -> Option<Value> {
        self.accessors
            .accessors
            .get(field_id)
            .map(|accessor| accessor(self.record))
    }
}
