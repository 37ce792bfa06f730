//! Read models returned by the report queries.
//!
//! Field names follow the registry column names so JSON output stays
//! recognizable next to the schema.

use crate::model::member::{ArtifactId, FactionId, MemberId};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Timeline event joined with the display name of one orchestrating title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestratedEvent {
    pub event_id: i64,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub status: String,
    pub description: String,
    /// Display name of the orchestrating leader title.
    pub member_name: String,
}

/// Faction with its computed member count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionHeadcount {
    pub faction_id: FactionId,
    pub aim: String,
    pub symbol: String,
    /// `None` when the faction has no head title or the title has no row.
    pub head_name: Option<String>,
    pub member_count: i64,
}

/// Membership totals across all factions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipStats {
    pub total_members: i64,
    pub total_factions: i64,
    /// Members per faction rounded to 2 decimals; `None` when no faction has members.
    pub members_per_faction: Option<f64>,
}

/// One (artifact, matching power) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPowerMatch {
    pub artifact_id: ArtifactId,
    pub origin: String,
    pub procured_on: NaiveDate,
    pub power: String,
    /// Aim of the controlling faction, if any.
    pub controlling_faction: Option<String>,
    pub guard_count: i64,
}

/// Faction meeting inside the requested month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionMeeting {
    pub faction_id: FactionId,
    pub aim: String,
    pub meeting_date: NaiveDate,
    pub meeting_time: NaiveTime,
    pub agenda: String,
    pub city: String,
    pub country: String,
    pub member_count: i64,
    pub faction_head: Option<String>,
}

/// Member placed in the leadership hierarchy of its faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEntry {
    pub member_id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub faction_id: FactionId,
    pub faction_name: String,
    pub leader_id: Option<MemberId>,
    /// Zero for members without a leader.
    pub level: u32,
    /// Direct subordinates only.
    pub subordinates: usize,
}

/// Meetings of one calendar month plus the full member hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFactionReport {
    pub meetings: Vec<FactionMeeting>,
    pub hierarchy: Vec<HierarchyEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndividualTargetStats {
    pub count: i64,
    pub unique_nationalities: i64,
    pub unique_locations: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrganizationTargetStats {
    pub count: i64,
    pub unique_types: i64,
    pub unique_presidents: i64,
}

/// Aggregate over all surveillance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurveillanceSummary {
    pub total_operations: i64,
    pub active_surveyors: i64,
    /// `None` when no operation exists.
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurveillanceAnalysis {
    pub individuals: IndividualTargetStats,
    pub organizations: OrganizationTargetStats,
    pub summary: SurveillanceSummary,
}

/// Outcome of a cascading artifact delete: dependent rows removed per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactDeletion {
    pub artifact_id: ArtifactId,
    pub powers: usize,
    pub guards: usize,
    pub rituals: usize,
}

impl ArtifactDeletion {
    /// Total rows removed, including the artifact row itself.
    pub fn total_rows(&self) -> usize {
        self.powers + self.guards + self.rituals + 1
    }
}
