use super::error::{RepoError, RepoResult};
use crate::db::schema::{schema_version, supported_version, REGISTRY_TABLES};
use rusqlite::Connection;

/// Rejects connections that did not go through `open_db`/`open_db_in_memory`.
pub(crate) fn ensure_registry_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = supported_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REGISTRY_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
