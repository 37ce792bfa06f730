//! Demo dataset used by `conclave --seed-demo` and by the test suites.

use super::{DbError, DbResult};
use log::{info, warn};
use rusqlite::{Connection, ErrorCode};

const DEMO_SQL: &str = include_str!("demo.sql");

/// Loads the demo registry into a freshly bootstrapped database.
///
/// Runs in one transaction; fails without partial rows if any key already exists.
pub fn seed_demo(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    if let Err(err) = tx.execute_batch(DEMO_SQL) {
        warn!("event=seed_demo module=db status=error error={err}");
        return Err(match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => DbError::SeedConflict(err),
            _ => DbError::Sqlite(err),
        });
    }
    tx.commit()?;
    info!("event=seed_demo module=db status=ok");
    Ok(())
}
