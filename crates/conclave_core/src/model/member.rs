//! Member and reference identifiers.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Primary key of `faction_members`.
pub type MemberId = i64;
/// Primary key of `factions`.
pub type FactionId = i64;
/// Primary key of `artifacts`.
pub type ArtifactId = i64;

/// Registry entity kinds, used to label errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Member,
    Faction,
    LeaderTitle,
    Artifact,
    Sanctum,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Faction => "faction",
            Self::LeaderTitle => "leader title",
            Self::Artifact => "artifact",
            Self::Sanctum => "sanctum",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for adding one member to a faction.
///
/// # Invariants
/// - `leader_id`, when set, must name an existing member of `faction_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMember {
    pub member_id: MemberId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub dob: NaiveDate,
    pub faction_id: FactionId,
    pub leader_id: Option<MemberId>,
}
