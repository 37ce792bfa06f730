//! Core data access for the conclave registry.
//!
//! Factions, members, artifacts, sanctums and surveillance records live in a
//! single SQLite database. This crate owns the schema, the canned reports, and
//! the guarded multi-statement mutations; the console binary only parses input
//! and renders results.

pub mod db;
pub mod hierarchy;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{init_logging, DEFAULT_LOG_LEVEL};
pub use model::member::{ArtifactId, EntityKind, FactionId, MemberId, NewMember};
pub use model::report::{
    ArtifactDeletion, ArtifactPowerMatch, FactionHeadcount, FactionMeeting, HierarchyEntry,
    IndividualTargetStats, MembershipStats, MonthlyFactionReport, OrchestratedEvent,
    OrganizationTargetStats, SurveillanceAnalysis, SurveillanceSummary,
};
pub use model::sanctum::{Sanctum, SanctumLocation};
pub use repo::error::{ErrorKind, RepoError, RepoResult};
pub use repo::registry_repo::{RegistryRepository, SqliteRegistryRepository};
pub use repo::report_repo::{ReportRepository, SqliteReportRepository};
pub use service::conclave_service::{ConclaveService, ServiceError, ServiceResult};

/// Service wired to the SQLite repositories of one connection.
pub type SqliteConclaveService<'conn> =
    ConclaveService<SqliteReportRepository<'conn>, SqliteRegistryRepository<'conn>>;

/// Builds the SQLite-backed service for a bootstrapped connection.
pub fn sqlite_service(conn: &rusqlite::Connection) -> RepoResult<SqliteConclaveService<'_>> {
    Ok(ConclaveService::new(
        SqliteReportRepository::try_new(conn)?,
        SqliteRegistryRepository::try_new(conn)?,
    ))
}
