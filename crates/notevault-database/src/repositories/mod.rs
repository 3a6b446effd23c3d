//! PostgreSQL implementations of the persistence contracts.

pub mod share;
pub mod user;

pub use share::ShareLinkRepository;
pub use user::UserRepository;

use notevault_core::error::{AppError, ErrorKind};

/// Maps a sqlx error to `Conflict` for unique violations and `Database` otherwise.
pub(crate) fn map_write_error(e: sqlx::Error, context: &str, conflict: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return AppError::conflict(conflict);
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), e)
}
