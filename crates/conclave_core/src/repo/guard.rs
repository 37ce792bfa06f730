//! Check-then-mutate transaction guard shared by every registry write.
//!
//! # Invariants
//! - Preconditions run in order inside the write transaction; the first one
//!   that does not hold aborts the call with its own error.
//! - Any error after `BEGIN` rolls back every statement issued by the call.
//! - Nothing is visible to later reads unless the commit succeeds.

use super::error::{ErrorKind, RepoError, RepoResult};
use log::{error, info, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Present,
    Absent,
}

/// One existence check evaluated before a mutation.
///
/// `probe` is a `SELECT` that yields at least one row when the subject exists.
#[derive(Debug)]
pub(crate) struct Precondition {
    probe: &'static str,
    params: Vec<Value>,
    expect: Expect,
    failure: RepoError,
}

impl Precondition {
    /// Holds when `probe` returns a row.
    pub(crate) fn present(
        probe: &'static str,
        params: impl IntoIterator<Item = Value>,
        failure: RepoError,
    ) -> Self {
        Self {
            probe,
            params: params.into_iter().collect(),
            expect: Expect::Present,
            failure,
        }
    }

    /// Holds when `probe` returns no row.
    pub(crate) fn absent(
        probe: &'static str,
        params: impl IntoIterator<Item = Value>,
        failure: RepoError,
    ) -> Self {
        Self {
            probe,
            params: params.into_iter().collect(),
            expect: Expect::Absent,
            failure,
        }
    }

    fn check(self, conn: &Connection) -> RepoResult<()> {
        let found: bool = conn.query_row(
            &format!("SELECT EXISTS({});", self.probe),
            params_from_iter(self.params.iter()),
            |row| row.get(0),
        )?;
        let holds = match self.expect {
            Expect::Present => found,
            Expect::Absent => !found,
        };
        if holds {
            Ok(())
        } else {
            Err(self.failure)
        }
    }
}

/// Runs `preconditions` then `mutation` in one IMMEDIATE transaction.
///
/// # Side effects
/// - Emits one `event=<operation>` log line with status and duration.
pub(crate) fn guarded_write<T>(
    conn: &Connection,
    operation: &'static str,
    preconditions: Vec<Precondition>,
    mutation: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let started_at = Instant::now();
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let outcome = preconditions
        .into_iter()
        .try_for_each(|precondition| precondition.check(&tx))
        .and_then(|()| mutation(&tx));

    let value = match outcome {
        Ok(value) => value,
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                error!(
                    "event={operation} module=repo status=error error_code=rollback_failed error={rollback_err}"
                );
            }
            let duration_ms = started_at.elapsed().as_millis();
            if err.kind() == ErrorKind::BackendFailure {
                error!("event={operation} module=repo status=error duration_ms={duration_ms} error={err}");
            } else {
                warn!("event={operation} module=repo status=rejected duration_ms={duration_ms} reason={err}");
            }
            return Err(err);
        }
    };

    if let Err(err) = tx.commit() {
        error!(
            "event={operation} module=repo status=error duration_ms={} error_code=commit_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err.into());
    }

    info!(
        "event={operation} module=repo status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(value)
}
