//! Domain model for the conclave registry.
//!
//! # Responsibility
//! - Define write inputs (`NewMember`, `SanctumLocation`) passed to mutations.
//! - Define typed read models returned by report queries.
//!
//! # Invariants
//! - Identifiers mirror the integer/text primary keys of the registry schema.
//! - Read models are plain data; they never hold a connection.

pub mod member;
pub mod report;
pub mod sanctum;
