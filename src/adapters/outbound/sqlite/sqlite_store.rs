use super::schema::quoted;
use crate::ports::outbound::{RecordSession, RecordStore};
use crate::shared::error::IngestError;
use crate::shared::Result;
use crate::uniquify::domain::{ContentId, RecordKind, Row, Table, Value};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, OptionalExtension, Transaction};

/// SqliteStore adapter: one open SQLite transaction.
///
/// Lookups run inside the transaction and therefore see rows staged by it.
/// Dropping the store without committing rolls the transaction back.
pub struct SqliteStore<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteStore<'conn> {
    pub(super) fn new(tx: Transaction<'conn>) -> Self {
        Self { tx }
    }

    /// `id`, the discriminator when present, then the data columns.
    fn all_columns(table: Table) -> Vec<&'static str> {
        let mut columns = vec!["id"];
        if table.is_polymorphic() {
            columns.push("type");
        }
        columns.extend_from_slice(table.columns());
        columns
    }

    fn bind_values(row: &Row) -> Result<Vec<SqlValue>> {
        let table = row.table();
        if let Some((unknown, _)) = row
            .columns()
            .find(|(column, _)| !table.columns().iter().any(|c| c == column))
        {
            anyhow::bail!("Column {} does not exist in table {}", unknown, table);
        }

        let mut values = vec![SqlValue::Text(row.id().as_str().to_string())];
        if let Some(discriminator) = row.kind().discriminator() {
            values.push(SqlValue::Text(discriminator.to_string()));
        }
        values.extend(
            table
                .columns()
                .iter()
                .map(|column| row.get(column).map_or(SqlValue::Null, to_sql)),
        );
        Ok(values)
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(v) => SqlValue::Integer(*v),
        Value::Real(v) => SqlValue::Real(*v),
        Value::Text(v) => SqlValue::Text(v.clone()),
    }
}

fn from_sql(value: SqlValue) -> Result<Value> {
    Ok(match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(v) => Value::Integer(v),
        SqlValue::Real(v) => Value::Real(v),
        SqlValue::Text(v) => Value::Text(v),
        SqlValue::Blob(_) => anyhow::bail!("Unexpected BLOB value in report store"),
    })
}

impl RecordStore for SqliteStore<'_> {
    fn find(&self, kind: RecordKind, id: &ContentId) -> Result<Option<Row>> {
        let table = kind.table();
        let columns = Self::all_columns(table);
        let sql = format!(
            "SELECT {} FROM {} WHERE \"id\" = ?1",
            columns
                .iter()
                .map(|c| quoted(c))
                .collect::<Vec<_>>()
                .join(", "),
            quoted(table.name())
        );

        let mut stmt = self.tx.prepare_cached(&sql)?;
        let values = stmt
            .query_row([id.as_str()], |r| {
                (0..columns.len())
                    .map(|i| r.get::<_, SqlValue>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .optional()?;
        let Some(values) = values else {
            return Ok(None);
        };

        let mut values = columns.iter().zip(values).skip(1);
        let stored_kind = if table.is_polymorphic() {
            let discriminator = match values.next() {
                Some((_, SqlValue::Text(text))) => text,
                _ => String::new(),
            };
            RecordKind::from_discriminator(table, &discriminator).ok_or_else(|| {
                IngestError::StructuralMismatch {
                    kind,
                    id: id.clone(),
                    details: format!("unknown {} type '{}'", table, discriminator),
                }
            })?
        } else {
            kind
        };

        let mut row = Row::new(stored_kind, id.clone());
        for (column, value) in values {
            row.set(*column, from_sql(value)?);
        }
        Ok(Some(row))
    }

    fn insert(&self, row: &Row) -> Result<()> {
        let table = row.table();
        let columns = Self::all_columns(table);
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted(table.name()),
            columns
                .iter()
                .map(|c| quoted(c))
                .collect::<Vec<_>>()
                .join(", "),
            (1..=columns.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let values = Self::bind_values(row)?;
        self.tx
            .prepare_cached(&sql)?
            .execute(params_from_iter(values.iter()))?;
        Ok(())
    }

    fn insert_if_absent(&self, row: &Row) -> Result<bool> {
        let table = row.table();
        let columns = Self::all_columns(table);
        let sql = format!(
            "INSERT INTO {table} ({columns}) SELECT {params} \
             WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE \"id\" = ?1)",
            table = quoted(table.name()),
            columns = columns
                .iter()
                .map(|c| quoted(c))
                .collect::<Vec<_>>()
                .join(", "),
            params = (1..=columns.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let values = Self::bind_values(row)?;
        let changed = self
            .tx
            .prepare_cached(&sql)?
            .execute(params_from_iter(values.iter()))?;
        Ok(changed == 1)
    }

    fn defer_constraints(&self) -> Result<()> {
        self.tx.execute_batch("PRAGMA defer_foreign_keys = ON;")?;
        Ok(())
    }
}

impl RecordSession for SqliteStore<'_> {
    fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    fn rollback(self) -> Result<()> {
        self.tx.rollback()?;
        Ok(())
    }
}
