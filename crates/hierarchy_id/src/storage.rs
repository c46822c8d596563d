//! # Storage boundary
//! What a storage layer needs from a [`HierarchyId`] column, without tying
//! the id to any particular database crate.
//!
//! - [`ToBytes`], [`FromBytes`] and [`TypeTag`] are the capabilities a column
//!   binding builds on. Only [`crate::sql`] knows about `rusqlite`.
//! - [`StorageValue`] is whatever a driver handed back for the column.
//!   Scanning it is a match on the tag, and anything but a blob or NULL is an
//!   [`StorageError::UnsupportedSource`].
//! - [`NullableHierarchyId`] carries the NULL case. NULL never reaches
//!   [`decode`](crate::decode).
//! - [`StorageConfig`] picks the [`Dialect`] and the largest encoding a
//!   column accepts. Unknown dialects are a config error, not a panic.

use std::{fmt, str::FromStr};

use crate::{encode_bin, error::DecodeError, HierarchyId};

/// Longest encoding SQL Server accepts in a hierarchy column.
pub const DEFAULT_MAX_ENCODED_LEN: usize = 892;

/// Width of the `varbinary` columns declared for SQL Server and MySQL.
pub const VARBINARY_COLUMN_LEN: usize = 892;

/// Anything with a binary storage form.
pub trait ToBytes {
    /// The bytes to write to the column
    fn to_bytes(&self) -> Vec<u8>;
}

/// Anything that can be rebuilt from its binary storage form.
pub trait FromBytes: Sized {
    /// Why the bytes were rejected
    type Error;

    /// Rebuild from bytes read from the column
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

/// Declares how a value's column is typed.
pub trait TypeTag {
    /// Logical name of the type, independent of dialect
    const TYPE_NAME: &'static str;

    /// The column type to declare for `dialect`
    fn column_type(dialect: Dialect) -> &'static str;
}

impl ToBytes for HierarchyId {
    fn to_bytes(&self) -> Vec<u8> {
        encode_bin::encode(self)
    }
}

impl FromBytes for HierarchyId {
    type Error = DecodeError;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        encode_bin::decode(bytes)
    }
}

impl TypeTag for HierarchyId {
    const TYPE_NAME: &'static str = "hierarchyid";

    // All of these compare byte-wise, so ORDER BY on the column is pre-order.
    fn column_type(dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::Sqlite => "BLOB",
            Dialect::SqlServer => "varbinary(892)",
            Dialect::Postgres => "bytea",
            Dialect::MySql => "varbinary(892)",
        }
    }
}

#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Stored hierarchy id is corrupt: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cannot read a hierarchy id from a {found} value")]
    UnsupportedSource { found: &'static str },

    #[error("Hierarchy ids are not supported on the {0:?} dialect")]
    UnsupportedDialect(String),

    #[error("Encoded hierarchy id is {len} bytes, the column allows {max}")]
    ValueTooLong { len: usize, max: usize },

    #[error("Invalid storage config: {0}")]
    InvalidConfig(&'static str),
}

#[allow(missing_docs)]
pub type StorageResult<T> = Result<T, StorageError>;

/// The database families a hierarchy column can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    /// SQLite
    Sqlite,
    /// Microsoft SQL Server
    SqlServer,
    /// PostgreSQL
    Postgres,
    /// MySQL / MariaDB
    MySql,
}

impl Dialect {
    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::SqlServer => "sqlserver",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
        }
    }

    /// Widest value the declared column holds, `None` if it is unbounded.
    pub fn max_column_len(&self) -> Option<usize> {
        match self {
            Dialect::SqlServer | Dialect::MySql => Some(VARBINARY_COLUMN_LEN),
            Dialect::Sqlite | Dialect::Postgres => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Dialect::Sqlite),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            _ => Err(StorageError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = StorageError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dialect> for String {
    fn from(d: Dialect) -> Self {
        d.name().to_string()
    }
}

/// How hierarchy ids are stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which database the column lives in
    pub dialect: Dialect,
    /// Writes with a longer encoding are refused
    pub max_encoded_len: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::SqlServer,
            max_encoded_len: DEFAULT_MAX_ENCODED_LEN,
        }
    }
}

impl StorageConfig {
    /// Config for a dialect with default limits.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Check the config is usable.
    pub fn validate(&self) -> StorageResult<()> {
        if self.max_encoded_len == 0 {
            return Err(StorageError::InvalidConfig(
                "max_encoded_len must be at least 1",
            ));
        }
        if let Some(width) = self.dialect.max_column_len() {
            if self.max_encoded_len > width {
                return Err(StorageError::InvalidConfig(
                    "max_encoded_len is wider than the dialect's column",
                ));
            }
        }
        Ok(())
    }

    /// Column type for [`HierarchyId`] under this config.
    pub fn column_type(&self) -> StorageResult<&'static str> {
        self.validate()?;
        Ok(HierarchyId::column_type(self.dialect))
    }
}

/// A column value as handed back by a driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageValue<'a> {
    /// SQL NULL
    Null,
    /// A byte string
    Blob(&'a [u8]),
    /// A text value
    Text(&'a str),
    /// An integer
    Integer(i64),
    /// A float
    Real(f64),
}

impl<'a> StorageValue<'a> {
    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StorageValue::Null => "null",
            StorageValue::Blob(_) => "blob",
            StorageValue::Text(_) => "text",
            StorageValue::Integer(_) => "integer",
            StorageValue::Real(_) => "real",
        }
    }
}

/// A [`HierarchyId`] column that may be NULL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NullableHierarchyId(pub Option<HierarchyId>);

impl NullableHierarchyId {
    /// NULL
    pub const fn null() -> Self {
        Self(None)
    }

    /// Read a scanned column. NULL becomes `None` without decoding.
    pub fn scan(value: StorageValue<'_>) -> StorageResult<Self> {
        match value {
            StorageValue::Null => Ok(Self(None)),
            StorageValue::Blob(bytes) => {
                tracing::trace!(len = bytes.len(), "decoding stored hierarchy id");
                HierarchyId::from_bytes(bytes)
                    .map(|id| Self(Some(id)))
                    .map_err(|err| {
                        tracing::warn!(?err, ?bytes, "stored hierarchy id failed to decode");
                        StorageError::Decode(err)
                    })
            }
            other => {
                tracing::warn!(found = other.kind(), "unsupported source for hierarchy id");
                Err(StorageError::UnsupportedSource {
                    found: other.kind(),
                })
            }
        }
    }

    /// The bytes to write, `None` for NULL.
    pub fn value(&self, config: &StorageConfig) -> StorageResult<Option<Vec<u8>>> {
        self.0.as_ref().map(|id| stored_bytes(id, config)).transpose()
    }

    /// Is this NULL?
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Take the inner id
    pub fn into_inner(self) -> Option<HierarchyId> {
        self.0
    }
}

impl From<HierarchyId> for NullableHierarchyId {
    fn from(id: HierarchyId) -> Self {
        Self(Some(id))
    }
}

impl From<Option<HierarchyId>> for NullableHierarchyId {
    fn from(id: Option<HierarchyId>) -> Self {
        Self(id)
    }
}

impl From<NullableHierarchyId> for Option<HierarchyId> {
    fn from(id: NullableHierarchyId) -> Self {
        id.0
    }
}

/// Encode `id` for a column, refusing encodings above the configured limit.
pub fn stored_bytes(id: &HierarchyId, config: &StorageConfig) -> StorageResult<Vec<u8>> {
    config.validate()?;
    let len = id.encoded_len();
    if len > config.max_encoded_len {
        return Err(StorageError::ValueTooLong {
            len,
            max: config.max_encoded_len,
        });
    }
    Ok(id.to_bytes())
}

/// Read a non-null column. NULL is [`StorageError::UnsupportedSource`].
pub fn scan(value: StorageValue<'_>) -> StorageResult<HierarchyId> {
    NullableHierarchyId::scan(value)?
        .0
        .ok_or(StorageError::UnsupportedSource { found: "null" })
}
