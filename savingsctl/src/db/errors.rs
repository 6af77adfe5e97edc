use thiserror::Error;

/// SQLSTATE raised by PostgreSQL for `undefined_table`
const UNDEFINED_TABLE: &str = "42P01";

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// A referenced table or view does not exist (SQLSTATE 42P01).
    ///
    /// Recoverable: callers that tolerate absent externally-owned tables convert this into
    /// [`MaybeTable::Missing`] via [`OrMissing::or_missing`].
    #[error("Relation does not exist: {message}")]
    MissingRelation { message: String },

    /// A mandatory semantic column could not be mapped to a physical column
    #[error("Unable to detect {role} column in {table}")]
    Mapping { table: String, role: String },

    /// Column metadata or table existence lookup failed
    #[error("Failed to probe schema for {table}")]
    Schema {
        table: String,
        #[source]
        source: Box<DbError>,
    },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using proper sqlx error categorization
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNDEFINED_TABLE) => DbError::MissingRelation {
                message: db_err.message().to_string(),
            },
            // All other sqlx errors are non-recoverable - convert to anyhow with context
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

impl DbError {
    pub fn is_missing_relation(&self) -> bool {
        matches!(self, DbError::MissingRelation { .. })
    }
}

/// Result of reading a table that may legitimately not exist.
///
/// Keeps "the table is absent" apart from "the query failed", so degrading to empty output is an
/// explicit decision at each call site rather than a swallowed error.
#[derive(Debug, Clone, PartialEq)]
pub enum MaybeTable<T> {
    Present(T),
    Missing,
}

impl<T> MaybeTable<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, MaybeTable::Missing)
    }

    pub fn present(self) -> Option<T> {
        match self {
            MaybeTable::Present(value) => Some(value),
            MaybeTable::Missing => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MaybeTable<U> {
        match self {
            MaybeTable::Present(value) => MaybeTable::Present(f(value)),
            MaybeTable::Missing => MaybeTable::Missing,
        }
    }

    /// The present value, or `T::default()` when the table is absent
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.present().unwrap_or_default()
    }
}

/// Opt-in conversion of [`DbError::MissingRelation`] into [`MaybeTable::Missing`]
pub trait OrMissing<T> {
    fn or_missing(self) -> Result<MaybeTable<T>>;
}

impl<T> OrMissing<T> for Result<T> {
    fn or_missing(self) -> Result<MaybeTable<T>> {
        match self {
            Ok(value) => Ok(MaybeTable::Present(value)),
            Err(DbError::MissingRelation { message }) => {
                tracing::debug!(%message, "Treating missing relation as absent table");
                Ok(MaybeTable::Missing)
            }
            Err(e) => Err(e),
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
