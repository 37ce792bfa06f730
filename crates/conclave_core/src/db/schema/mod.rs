//! Registry schema scripts and the version stamp they leave behind.
//!
//! # Invariants
//! - Scripts are listed in ascending version order.
//! - After a successful run, `PRAGMA user_version` equals the last applied script.
//! - Pending scripts apply in one transaction or not at all.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::cmp::Ordering;

const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_registry.sql"))];

/// Names of every table the registry repositories read or write.
pub const REGISTRY_TABLES: &[&str] = &[
    "leader_titles",
    "factions",
    "faction_members",
    "timeline_events",
    "orchestrations",
    "artifacts",
    "artifact_powers",
    "artifact_guards",
    "rituals",
    "sanctums",
    "faction_meetings",
    "individuals",
    "organizations",
    "surveillance_ops",
    "surveyors",
];

/// Highest schema version this build can create.
pub fn supported_version() -> u32 {
    SCRIPTS.last().map_or(0, |&(version, _)| version)
}

/// Brings `conn` up to [`supported_version`].
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = supported_version();

    match found.cmp(&supported) {
        Ordering::Greater => Err(DbError::SchemaTooNew { found, supported }),
        Ordering::Equal => Ok(()),
        Ordering::Less => {
            let tx = conn.transaction()?;
            for &(version, script) in SCRIPTS.iter().filter(|&&(version, _)| version > found) {
                tx.execute_batch(script)?;
                tx.pragma_update(None, "user_version", version)?;
            }
            tx.commit()?;
            info!("event=schema_apply module=db status=ok from={found} to={supported}");
            Ok(())
        }
    }
}

/// Version stamp currently stored in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
