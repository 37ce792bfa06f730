//! Report (read-only) repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Run the canned registry reports with bound parameters only.
//! - Map rows to typed read models.
//!
//! # Invariants
//! - User-provided strings never reach query text; they are bound values.
//! - Empty result sets are returned as empty vectors, never as errors.
//! - Aggregate reports return exactly one row per aggregate.

use super::error::RepoResult;
use super::readiness::ensure_registry_ready;
use crate::hierarchy::{rank_members, MemberLink};
use crate::model::report::{
    ArtifactPowerMatch, FactionHeadcount, FactionMeeting, IndividualTargetStats, MembershipStats,
    MonthlyFactionReport, OrchestratedEvent, OrganizationTargetStats, SurveillanceAnalysis,
    SurveillanceSummary,
};
use crate::model::sanctum::{Sanctum, SanctumLocation};
use rusqlite::{params, Connection, OptionalExtension, Row};

const EVENTS_BY_MEMBER_SQL: &str = "SELECT
    e.event_id AS event_id,
    e.event_date AS event_date,
    e.event_time AS event_time,
    e.status AS status,
    e.description AS description,
    t.name AS member_name
FROM timeline_events e
INNER JOIN orchestrations o ON o.event_id = e.event_id
INNER JOIN leader_titles t ON t.title = o.title
WHERE o.title = ?1
ORDER BY e.event_date ASC, e.event_time ASC, e.event_id ASC;";

const FACTIONS_BY_MEMBER_COUNT_SQL: &str = "SELECT
    f.faction_id AS faction_id,
    f.aim AS aim,
    f.symbol AS symbol,
    t.name AS head_name,
    COUNT(fm.member_id) AS member_count
FROM factions f
LEFT JOIN faction_members fm ON fm.faction_id = f.faction_id
LEFT JOIN leader_titles t ON t.title = f.head_title
GROUP BY f.faction_id
HAVING COUNT(fm.member_id) > ?1
ORDER BY member_count DESC, f.faction_id ASC;";

// NULLIF turns the no-faction division into NULL instead of a backend error.
const MEMBERSHIP_STATISTICS_SQL: &str = "SELECT
    COUNT(DISTINCT member_id) AS total_members,
    COUNT(DISTINCT faction_id) AS total_factions,
    ROUND(
        CAST(COUNT(DISTINCT member_id) AS REAL) / NULLIF(COUNT(DISTINCT faction_id), 0),
        2
    ) AS members_per_faction
FROM faction_members;";

const SEARCH_ARTIFACTS_BY_POWER_SQL: &str = "SELECT
    a.artifact_id AS artifact_id,
    a.origin AS origin,
    a.procured_on AS procured_on,
    p.power AS power,
    f.aim AS controlling_faction,
    COUNT(DISTINCT g.member_id) AS guard_count
FROM artifacts a
INNER JOIN artifact_powers p ON p.artifact_id = a.artifact_id
LEFT JOIN factions f ON f.faction_id = a.faction_id
LEFT JOIN artifact_guards g ON g.artifact_id = a.artifact_id
WHERE p.power LIKE ?1 ESCAPE '\\'
GROUP BY a.artifact_id, p.power
ORDER BY a.artifact_id ASC, p.power ASC;";

const MONTHLY_MEETINGS_SQL: &str = "SELECT
    f.faction_id AS faction_id,
    f.aim AS aim,
    m.meeting_date AS meeting_date,
    m.meeting_time AS meeting_time,
    m.agenda AS agenda,
    m.city AS city,
    m.country AS country,
    COUNT(DISTINCT fm.member_id) AS member_count,
    t.name AS faction_head
FROM faction_meetings m
INNER JOIN factions f ON f.faction_id = m.faction_id
LEFT JOIN faction_members fm ON fm.faction_id = f.faction_id
LEFT JOIN leader_titles t ON t.title = f.head_title
WHERE CAST(strftime('%Y', m.meeting_date) AS INTEGER) = ?1
  AND CAST(strftime('%m', m.meeting_date) AS INTEGER) = ?2
GROUP BY m.meeting_id
ORDER BY m.meeting_date ASC, m.meeting_time ASC;";

const MEMBER_LINKS_SQL: &str = "SELECT
    m.member_id AS member_id,
    m.first_name AS first_name,
    m.last_name AS last_name,
    m.faction_id AS faction_id,
    f.aim AS faction_name,
    m.leader_id AS leader_id
FROM faction_members m
INNER JOIN factions f ON f.faction_id = m.faction_id
ORDER BY m.member_id ASC;";

const INDIVIDUAL_TARGETS_SQL: &str = "SELECT
    COUNT(*) AS count,
    COUNT(DISTINCT nationality) AS unique_nationalities,
    COUNT(DISTINCT current_location) AS unique_locations
FROM individuals;";

const ORGANIZATION_TARGETS_SQL: &str = "SELECT
    COUNT(*) AS count,
    COUNT(DISTINCT kind) AS unique_types,
    COUNT(DISTINCT president) AS unique_presidents
FROM organizations;";

const SURVEILLANCE_SUMMARY_SQL: &str = "SELECT
    COUNT(DISTINCT s.surveillance_id) AS total_operations,
    COUNT(DISTINCT sv.title) AS active_surveyors,
    MIN(s.started_on) AS earliest,
    MAX(s.started_on) AS latest
FROM surveillance_ops s
LEFT JOIN surveyors sv ON sv.surveillance_id = s.surveillance_id;";

/// Repository interface for registry reports.
pub trait ReportRepository {
    /// Events orchestrated by one leader title.
    fn events_by_member(&self, title: &str) -> RepoResult<Vec<OrchestratedEvent>>;
    /// Factions with strictly more than `min_members` members, largest first.
    fn factions_by_member_count(&self, min_members: i64) -> RepoResult<Vec<FactionHeadcount>>;
    /// Member/faction totals and their ratio.
    fn membership_statistics(&self) -> RepoResult<MembershipStats>;
    /// Every (artifact, power) pair whose power contains `substring`.
    fn search_artifacts_by_power(&self, substring: &str) -> RepoResult<Vec<ArtifactPowerMatch>>;
    /// Meetings of one calendar month plus the leadership hierarchy.
    fn monthly_faction_report(&self, year: i32, month: u32) -> RepoResult<MonthlyFactionReport>;
    /// Surveillance subject and operation aggregates.
    fn surveillance_analysis(&self) -> RepoResult<SurveillanceAnalysis>;
    /// Loads one sanctum by mantra.
    fn get_sanctum(&self, mantra: &str) -> RepoResult<Option<Sanctum>>;
}

/// SQLite-backed report repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    /// Creates repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_registry_ready(conn)?;
        Ok(Self { conn })
    }

    fn load_member_links(&self) -> RepoResult<Vec<MemberLink>> {
        let mut stmt = self.conn.prepare(MEMBER_LINKS_SQL)?;
        let mut rows = stmt.query([])?;
        let mut links = Vec::new();
        while let Some(row) = rows.next()? {
            links.push(MemberLink {
                member_id: row.get("member_id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                faction_id: row.get("faction_id")?,
                faction_name: row.get("faction_name")?,
                leader_id: row.get("leader_id")?,
            });
        }
        Ok(links)
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn events_by_member(&self, title: &str) -> RepoResult<Vec<OrchestratedEvent>> {
        let mut stmt = self.conn.prepare(EVENTS_BY_MEMBER_SQL)?;
        let mut rows = stmt.query([title])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(OrchestratedEvent {
                event_id: row.get("event_id")?,
                event_date: row.get("event_date")?,
                event_time: row.get("event_time")?,
                status: row.get("status")?,
                description: row.get("description")?,
                member_name: row.get("member_name")?,
            });
        }
        Ok(events)
    }

    fn factions_by_member_count(&self, min_members: i64) -> RepoResult<Vec<FactionHeadcount>> {
        let mut stmt = self.conn.prepare(FACTIONS_BY_MEMBER_COUNT_SQL)?;
        let mut rows = stmt.query([min_members])?;
        let mut factions = Vec::new();
        while let Some(row) = rows.next()? {
            factions.push(FactionHeadcount {
                faction_id: row.get("faction_id")?,
                aim: row.get("aim")?,
                symbol: row.get("symbol")?,
                head_name: row.get("head_name")?,
                member_count: row.get("member_count")?,
            });
        }
        Ok(factions)
    }

    fn membership_statistics(&self) -> RepoResult<MembershipStats> {
        let stats = self
            .conn
            .query_row(MEMBERSHIP_STATISTICS_SQL, [], |row| {
                Ok(MembershipStats {
                    total_members: row.get("total_members")?,
                    total_factions: row.get("total_factions")?,
                    members_per_faction: row.get("members_per_faction")?,
                })
            })?;
        Ok(stats)
    }

    fn search_artifacts_by_power(&self, substring: &str) -> RepoResult<Vec<ArtifactPowerMatch>> {
        let pattern = like_contains_pattern(substring);
        let mut stmt = self.conn.prepare(SEARCH_ARTIFACTS_BY_POWER_SQL)?;
        let mut rows = stmt.query([pattern])?;
        let mut matches = Vec::new();
        while let Some(row) = rows.next()? {
            matches.push(ArtifactPowerMatch {
                artifact_id: row.get("artifact_id")?,
                origin: row.get("origin")?,
                procured_on: row.get("procured_on")?,
                power: row.get("power")?,
                controlling_faction: row.get("controlling_faction")?,
                guard_count: row.get("guard_count")?,
            });
        }
        Ok(matches)
    }

    fn monthly_faction_report(&self, year: i32, month: u32) -> RepoResult<MonthlyFactionReport> {
        let mut stmt = self.conn.prepare(MONTHLY_MEETINGS_SQL)?;
        let mut rows = stmt.query(params![year, month])?;
        let mut meetings = Vec::new();
        while let Some(row) = rows.next()? {
            meetings.push(parse_meeting_row(row)?);
        }

        let hierarchy = rank_members(self.load_member_links()?);
        Ok(MonthlyFactionReport {
            meetings,
            hierarchy,
        })
    }

    fn surveillance_analysis(&self) -> RepoResult<SurveillanceAnalysis> {
        let individuals = self.conn.query_row(INDIVIDUAL_TARGETS_SQL, [], |row| {
            Ok(IndividualTargetStats {
                count: row.get("count")?,
                unique_nationalities: row.get("unique_nationalities")?,
                unique_locations: row.get("unique_locations")?,
            })
        })?;
        let organizations = self.conn.query_row(ORGANIZATION_TARGETS_SQL, [], |row| {
            Ok(OrganizationTargetStats {
                count: row.get("count")?,
                unique_types: row.get("unique_types")?,
                unique_presidents: row.get("unique_presidents")?,
            })
        })?;
        let summary = self.conn.query_row(SURVEILLANCE_SUMMARY_SQL, [], |row| {
            Ok(SurveillanceSummary {
                total_operations: row.get("total_operations")?,
                active_surveyors: row.get("active_surveyors")?,
                earliest: row.get("earliest")?,
                latest: row.get("latest")?,
            })
        })?;

        Ok(SurveillanceAnalysis {
            individuals,
            organizations,
            summary,
        })
    }

    fn get_sanctum(&self, mantra: &str) -> RepoResult<Option<Sanctum>> {
        let sanctum = self
            .conn
            .query_row(
                "SELECT mantra, street, city, country
                 FROM sanctums
                 WHERE mantra = ?1;",
                [mantra],
                |row| {
                    Ok(Sanctum {
                        mantra: row.get("mantra")?,
                        location: SanctumLocation {
                            street: row.get("street")?,
                            city: row.get("city")?,
                            country: row.get("country")?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(sanctum)
    }
}

fn parse_meeting_row(row: &Row<'_>) -> RepoResult<FactionMeeting> {
    Ok(FactionMeeting {
        faction_id: row.get("faction_id")?,
        aim: row.get("aim")?,
        meeting_date: row.get("meeting_date")?,
        meeting_time: row.get("meeting_time")?,
        agenda: row.get("agenda")?,
        city: row.get("city")?,
        country: row.get("country")?,
        member_count: row.get("member_count")?,
        faction_head: row.get("faction_head")?,
    })
}

/// Wraps `substring` for `LIKE ... ESCAPE '\'` so wildcards match literally.
fn like_contains_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for ch in substring.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
