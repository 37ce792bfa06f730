//! Registry (write) repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Apply the five registry mutations through the shared write guard.
//! - Enforce referential rules before touching rows, so callers get semantic
//!   errors instead of backend constraint failures.
//!
//! # Invariants
//! - Every write is all-or-nothing (see `guard::guarded_write`).
//! - A member's leader must be an existing member of the same faction.
//! - Artifact dependents (powers, guards, rituals) are removed before the
//!   artifact row itself.

use super::error::{RepoError, RepoResult};
use super::guard::{guarded_write, Precondition};
use super::readiness::ensure_registry_ready;
use crate::model::member::{ArtifactId, EntityKind, FactionId, NewMember};
use crate::model::report::ArtifactDeletion;
use crate::model::sanctum::SanctumLocation;
use rusqlite::types::Value;
use rusqlite::{params, Connection};

const MEMBER_EXISTS_SQL: &str = "SELECT 1 FROM faction_members WHERE member_id = ?1";
const MEMBER_IN_FACTION_SQL: &str =
    "SELECT 1 FROM faction_members WHERE member_id = ?1 AND faction_id = ?2";
const FACTION_EXISTS_SQL: &str = "SELECT 1 FROM factions WHERE faction_id = ?1";
const LEADER_TITLE_EXISTS_SQL: &str = "SELECT 1 FROM leader_titles WHERE title = ?1";
const SANCTUM_EXISTS_SQL: &str = "SELECT 1 FROM sanctums WHERE mantra = ?1";
const ARTIFACT_EXISTS_SQL: &str = "SELECT 1 FROM artifacts WHERE artifact_id = ?1";

/// Repository interface for registry mutations.
pub trait RegistryRepository {
    /// Inserts one member after key and reference checks.
    fn add_faction_member(&self, member: &NewMember) -> RepoResult<()>;
    /// Overwrites street/city/country of an existing sanctum.
    fn update_sanctum_location(&self, mantra: &str, location: &SanctumLocation)
        -> RepoResult<()>;
    /// Deletes an artifact and every row that references it.
    fn delete_artifact(&self, artifact_id: ArtifactId) -> RepoResult<ArtifactDeletion>;
    /// Overwrites the display name of a leader title.
    fn update_leader_title_name(&self, title: &str, new_name: &str) -> RepoResult<()>;
    /// Points a faction at another existing leader title.
    fn update_faction_head(&self, faction_id: FactionId, new_head_title: &str)
        -> RepoResult<()>;
}

/// SQLite-backed registry repository.
pub struct SqliteRegistryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRegistryRepository<'conn> {
    /// Creates repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_registry_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RegistryRepository for SqliteRegistryRepository<'_> {
    fn add_faction_member(&self, member: &NewMember) -> RepoResult<()> {
        let mut checks = vec![
            Precondition::absent(
                MEMBER_EXISTS_SQL,
                [Value::Integer(member.member_id)],
                RepoError::DuplicateKey {
                    entity: EntityKind::Member,
                    key: member.member_id.to_string(),
                },
            ),
            Precondition::present(
                FACTION_EXISTS_SQL,
                [Value::Integer(member.faction_id)],
                RepoError::invalid_reference(
                    EntityKind::Faction,
                    member.faction_id,
                    "faction does not exist",
                ),
            ),
        ];
        if let Some(leader_id) = member.leader_id {
            checks.push(Precondition::present(
                MEMBER_IN_FACTION_SQL,
                [Value::Integer(leader_id), Value::Integer(member.faction_id)],
                RepoError::invalid_reference(
                    EntityKind::Member,
                    leader_id,
                    "leader must be an existing member of the same faction",
                ),
            ));
        }

        guarded_write(self.conn, "member_add", checks, |tx| {
            tx.execute(
                "INSERT INTO faction_members (
                    member_id,
                    first_name,
                    middle_name,
                    last_name,
                    dob,
                    faction_id,
                    leader_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    member.member_id,
                    member.first_name.as_str(),
                    member.middle_name.as_deref(),
                    member.last_name.as_str(),
                    member.dob,
                    member.faction_id,
                    member.leader_id,
                ],
            )?;
            Ok(())
        })
    }

    fn update_sanctum_location(
        &self,
        mantra: &str,
        location: &SanctumLocation,
    ) -> RepoResult<()> {
        let checks = vec![Precondition::present(
            SANCTUM_EXISTS_SQL,
            [Value::Text(mantra.to_string())],
            RepoError::not_found(EntityKind::Sanctum, mantra),
        )];

        guarded_write(self.conn, "sanctum_relocate", checks, |tx| {
            tx.execute(
                "UPDATE sanctums
                 SET street = ?2,
                     city = ?3,
                     country = ?4
                 WHERE mantra = ?1;",
                params![
                    mantra,
                    location.street.as_str(),
                    location.city.as_str(),
                    location.country.as_str(),
                ],
            )?;
            Ok(())
        })
    }

    fn delete_artifact(&self, artifact_id: ArtifactId) -> RepoResult<ArtifactDeletion> {
        let checks = vec![Precondition::present(
            ARTIFACT_EXISTS_SQL,
            [Value::Integer(artifact_id)],
            RepoError::not_found(EntityKind::Artifact, artifact_id),
        )];

        guarded_write(self.conn, "artifact_delete", checks, |tx| {
            let powers = tx.execute(
                "DELETE FROM artifact_powers WHERE artifact_id = ?1;",
                [artifact_id],
            )?;
            let guards = tx.execute(
                "DELETE FROM artifact_guards WHERE artifact_id = ?1;",
                [artifact_id],
            )?;
            let rituals = tx.execute("DELETE FROM rituals WHERE artifact_id = ?1;", [artifact_id])?;
            tx.execute(
                "DELETE FROM artifacts WHERE artifact_id = ?1;",
                [artifact_id],
            )?;

            Ok(ArtifactDeletion {
                artifact_id,
                powers,
                guards,
                rituals,
            })
        })
    }

    fn update_leader_title_name(&self, title: &str, new_name: &str) -> RepoResult<()> {
        let checks = vec![Precondition::present(
            LEADER_TITLE_EXISTS_SQL,
            [Value::Text(title.to_string())],
            RepoError::not_found(EntityKind::LeaderTitle, title),
        )];

        guarded_write(self.conn, "leader_title_rename", checks, |tx| {
            tx.execute(
                "UPDATE leader_titles SET name = ?2 WHERE title = ?1;",
                params![title, new_name],
            )?;
            Ok(())
        })
    }

    fn update_faction_head(
        &self,
        faction_id: FactionId,
        new_head_title: &str,
    ) -> RepoResult<()> {
        let checks = vec![
            Precondition::present(
                FACTION_EXISTS_SQL,
                [Value::Integer(faction_id)],
                RepoError::not_found(EntityKind::Faction, faction_id),
            ),
            Precondition::present(
                LEADER_TITLE_EXISTS_SQL,
                [Value::Text(new_head_title.to_string())],
                RepoError::invalid_reference(
                    EntityKind::LeaderTitle,
                    new_head_title,
                    "head title must name an existing leader title",
                ),
            ),
        ];

        guarded_write(self.conn, "faction_head_change", checks, |tx| {
            tx.execute(
                "UPDATE factions SET head_title = ?2 WHERE faction_id = ?1;",
                params![faction_id, new_head_title],
            )?;
            Ok(())
        })
    }
}
