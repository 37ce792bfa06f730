//! Repository error type shared by read and write paths.

use crate::db::DbError;
use crate::model::member::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse failure class callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateKey,
    InvalidReference,
    NotFound,
    BackendFailure,
}

/// Errors from registry repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Insert target key already exists.
    DuplicateKey { entity: EntityKind, key: String },
    /// A referenced row is missing or violates a cross-row rule.
    InvalidReference {
        entity: EntityKind,
        key: String,
        constraint: &'static str,
    },
    /// Update/delete target does not exist.
    NotFound { entity: EntityKind, key: String },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::InvalidReference { .. } => ErrorKind::InvalidReference,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Db(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => ErrorKind::BackendFailure,
        }
    }

    pub(crate) fn not_found(entity: EntityKind, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid_reference(
        entity: EntityKind,
        key: impl ToString,
        constraint: &'static str,
    ) -> Self {
        Self::InvalidReference {
            entity,
            key: key.to_string(),
            constraint,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { entity, key } => write!(f, "{entity} `{key}` already exists"),
            Self::InvalidReference {
                entity,
                key,
                constraint,
            } => write!(f, "invalid {entity} reference `{key}`: {constraint}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "registry repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "registry repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
