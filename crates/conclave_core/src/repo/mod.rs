//! Repository layer: registry reports and registry mutations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/console orchestration.
//!
//! # Invariants
//! - Writes run check-then-mutate inside one transaction (`guard`).
//! - Repository APIs return semantic errors (`DuplicateKey`, `InvalidReference`,
//!   `NotFound`) in addition to transport errors.

pub mod error;
mod guard;
mod readiness;
pub mod registry_repo;
pub mod report_repo;
