use super::{ContentId, RecordKind, Table};
use std::collections::BTreeMap;

/// Scalar column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<&ContentId> for Value {
    fn from(id: &ContentId) -> Self {
        Value::Text(id.as_str().to_string())
    }
}

/// Canonical relational form of one record.
///
/// Rows are built fresh from the parsed report (never by mutating it) or
/// read back from the store. NULL columns are simply absent, so a freshly
/// built row and the stored copy of the same content compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    kind: RecordKind,
    id: ContentId,
    columns: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(kind: RecordKind, id: ContentId) -> Self {
        Self {
            kind,
            id,
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style [`Row::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Sets a column; NULL removes it.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        match value.into() {
            Value::Null => {
                self.columns.remove(&column);
            }
            value => {
                self.columns.insert(column, value);
            }
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn table(&self) -> Table {
        self.kind.table()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Id referenced by the `<role>_id` column, if set.
    pub fn foreign_key(&self, role: &str) -> Option<&str> {
        self.columns
            .get(&format!("{}_id", role))
            .and_then(Value::as_text)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ContentId {
        ContentId::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_row_set_and_get() {
        let row = Row::new(RecordKind::Generator, id("g1"))
            .with("name", "gcc")
            .with("version", "4.8");

        assert_eq!(row.kind(), RecordKind::Generator);
        assert_eq!(row.table(), Table::Generator);
        assert_eq!(row.id().as_str(), "g1");
        assert_eq!(row.get("name"), Some(&Value::Text("gcc".to_string())));
        assert_eq!(row.column_count(), 2);
    }

    #[test]
    fn test_row_null_removes_column() {
        let mut row = Row::new(RecordKind::Generator, id("g1")).with("version", "4.8");
        row.set("version", Option::<&str>::None);
        assert!(row.get("version").is_none());
        assert_eq!(row.column_count(), 0);
    }

    #[test]
    fn test_row_foreign_key() {
        let row = Row::new(RecordKind::Location, id("l1")).with("file_id", &id("f1"));
        assert_eq!(row.foreign_key("file"), Some("f1"));
        assert_eq!(row.foreign_key("function"), None);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(3_i64), Value::Integer(3));
        assert_eq!(Value::from(1.5_f64), Value::Real(1.5));
        assert_eq!(Value::from(Option::<i64>::None), Value::Null);
        assert!(Value::Null.is_null());
        assert_eq!(Value::from("x").as_text(), Some("x"));
    }
}
