//! Classification of sqlx errors into application errors.

use hotel_core::error::{AppError, ErrorKind};
use sqlx::error::ErrorKind as SqlxErrorKind;

/// Extended SQLite result codes that mean "someone else holds the lock".
const BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517"];

/// Map a sqlx error into an [`AppError`], keeping `context` as the message prefix.
///
/// Unique violations become `Conflict`, foreign-key violations `State`,
/// check violations `Validation`, lock contention `Integrity`.
pub fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = classify(&err);
    let message = match &err {
        sqlx::Error::Database(db) => format!("{context}: {}", db.message()),
        other => format!("{context}: {other}"),
    };
    AppError::with_source(kind, message, err)
}

/// Closure form of [`db_error`] for use with `map_err`.
pub(crate) fn map_db(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| db_error(context, e)
}

fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::Database(db) => {
            let busy = db.code().is_some_and(|code| BUSY_CODES.contains(&code.as_ref()))
                || db.message().contains("database is locked");
            if busy {
                return ErrorKind::Integrity;
            }
            match db.kind() {
                SqlxErrorKind::UniqueViolation => ErrorKind::Conflict,
                SqlxErrorKind::ForeignKeyViolation => ErrorKind::State,
                SqlxErrorKind::CheckViolation | SqlxErrorKind::NotNullViolation => {
                    ErrorKind::Validation
                }
                _ => ErrorKind::Database,
            }
        }
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::Database,
    }
}
