//! `rusqlite` bindings. A hierarchy id is a BLOB column and SQLite compares
//! BLOBs with memcmp, so `ORDER BY` on it walks the tree in pre-order.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};

use crate::{
    storage::{self, NullableHierarchyId, StorageError, StorageValue},
    HierarchyId,
};

impl<'a> From<ValueRef<'a>> for StorageValue<'a> {
    fn from(v: ValueRef<'a>) -> Self {
        match v {
            ValueRef::Null => StorageValue::Null,
            ValueRef::Integer(i) => StorageValue::Integer(i),
            ValueRef::Real(r) => StorageValue::Real(r),
            // only the kind matters for text, it is rejected either way
            ValueRef::Text(t) => StorageValue::Text(std::str::from_utf8(t).unwrap_or_default()),
            ValueRef::Blob(b) => StorageValue::Blob(b),
        }
    }
}

fn into_from_sql_error(err: StorageError) -> FromSqlError {
    match err {
        StorageError::UnsupportedSource { .. } => FromSqlError::InvalidType,
        other => FromSqlError::Other(Box::new(other)),
    }
}

impl rusqlite::ToSql for HierarchyId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(self.to_bytes().into()))
    }
}

impl FromSql for HierarchyId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        storage::scan(value.into()).map_err(into_from_sql_error)
    }
}

impl rusqlite::ToSql for NullableHierarchyId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match &self.0 {
            Some(id) => ToSqlOutput::Owned(id.to_bytes().into()),
            None => ToSqlOutput::Owned(rusqlite::types::Value::Null),
        })
    }
}

impl FromSql for NullableHierarchyId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        NullableHierarchyId::scan(value.into()).map_err(into_from_sql_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn hid(labels: &[u32]) -> HierarchyId {
        HierarchyId::from_labels(labels.iter().copied()).unwrap()
    }

    fn db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE node (name TEXT NOT NULL, id BLOB NOT NULL, parent BLOB)")
            .unwrap();
        conn
    }

    #[test]
    fn round_trip_through_sqlite() {
        let conn = db();
        let id = hid(&[3, 1, 4]);
        conn.execute(
            "INSERT INTO node (name, id, parent) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                "leaf",
                id,
                NullableHierarchyId::from(id.parent())
            ],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO node (name, id, parent) VALUES (?1, ?2, ?3)",
            rusqlite::params!["root", HierarchyId::root(), NullableHierarchyId::null()],
        )
        .unwrap();

        let (got, parent): (HierarchyId, NullableHierarchyId) = conn
            .query_row("SELECT id, parent FROM node WHERE name = 'leaf'", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(got, id);
        assert_eq!(parent, NullableHierarchyId(Some(hid(&[3, 1]))));

        let parent: NullableHierarchyId = conn
            .query_row("SELECT parent FROM node WHERE name = 'root'", [], |r| r.get(0))
            .unwrap();
        assert!(parent.is_null());
    }

    #[test]
    fn wrong_column_types_are_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let text: rusqlite::Result<HierarchyId> =
            conn.query_row("SELECT '/1/2/'", [], |r| r.get(0));
        assert!(matches!(
            text,
            Err(rusqlite::Error::InvalidColumnType(..))
        ));

        let null: rusqlite::Result<HierarchyId> = conn.query_row("SELECT NULL", [], |r| r.get(0));
        assert!(matches!(
            null,
            Err(rusqlite::Error::InvalidColumnType(..))
        ));

        let corrupt: rusqlite::Result<HierarchyId> =
            conn.query_row("SELECT x'fc'", [], |r| r.get(0));
        assert!(matches!(
            corrupt,
            Err(rusqlite::Error::FromSqlConversionFailure(..))
        ));
    }
}
