use thiserror::Error;

/// Error type for agency store operations.
#[derive(Debug, Error)]
pub enum AgencyStoreError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("transaction error: {0}")]
    TransactionError(String),
}

impl AgencyStoreError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::QueryError(msg.into())
    }

    pub fn constraint<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::ConstraintViolation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::NotFound(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::InvalidInput(msg.into())
    }

    pub fn transaction<T: Into<String>>(msg: T) -> Self {
        AgencyStoreError::TransactionError(msg.into())
    }
}

/// Map a rusqlite error onto the store taxonomy, keeping constraint
/// failures (unique email, missing foreign-key parent) distinguishable
/// from plain query errors.
pub(crate) fn map_sqlite_err(err: rusqlite::Error) -> AgencyStoreError {
    match &err {
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AgencyStoreError::constraint(err.to_string())
        }
        _ => AgencyStoreError::query(err.to_string()),
    }
}
