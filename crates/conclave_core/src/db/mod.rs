//! SQLite storage for the conclave registry.
//!
//! `open_db` hands out connections that already carry the registry schema;
//! `seed_demo` fills one with the demo dataset.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod seed;

pub use open::{open_db, open_db_in_memory};
pub use seed::seed_demo;

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open, stamp or seed a registry database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was stamped by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Demo rows collide with keys already present.
    SeedConflict(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "registry schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::SeedConflict(err) => write!(f, "demo data conflicts with existing rows: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::SeedConflict(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
