//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

use super::DatabaseError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::PoolTimedOut => {
            ApplicationError::ResourceExhausted("Database connection pool exhausted".to_string())
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

impl From<DatabaseError> for ApplicationError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::MissingUrl | DatabaseError::InvalidUrl(_) => {
                Self::Configuration(e.to_string())
            },
            DatabaseError::PoolExhausted(_) => Self::ResourceExhausted(e.to_string()),
            DatabaseError::Sqlx(inner) => map_sqlx_error(inner),
        }
    }
}
