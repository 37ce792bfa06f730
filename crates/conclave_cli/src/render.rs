//! Text and JSON rendering of report results.

use conclave_core::{
    ArtifactDeletion, ArtifactPowerMatch, FactionHeadcount, MembershipStats,
    MonthlyFactionReport, OrchestratedEvent, SurveillanceAnalysis,
};
use serde::Serialize;
use std::io::{self, Write};

const MISSING: &str = "n/a";

/// Pretty JSON followed by a newline.
pub fn json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

pub fn events<W: Write>(out: &mut W, title: &str, events: &[OrchestratedEvent]) -> io::Result<()> {
    writeln!(out, "\n=== Timeline events for {} ===", title.trim())?;
    if events.is_empty() {
        return writeln!(out, "No events found.");
    }
    for event in events {
        writeln!(out, "\nEvent ID: {}", event.event_id)?;
        writeln!(out, "Date: {}", event.event_date)?;
        writeln!(out, "Time: {}", event.event_time)?;
        writeln!(out, "Status: {}", event.status)?;
        writeln!(out, "Description: {}", event.description)?;
        writeln!(out, "Orchestrated by: {}", event.member_name)?;
    }
    Ok(())
}

pub fn factions<W: Write>(
    out: &mut W,
    min_members: i64,
    factions: &[FactionHeadcount],
) -> io::Result<()> {
    writeln!(out, "\n=== Factions with more than {min_members} members ===")?;
    if factions.is_empty() {
        return writeln!(out, "No factions found.");
    }
    for faction in factions {
        writeln!(out, "\nFaction ID: {}", faction.faction_id)?;
        writeln!(out, "Aim: {}", faction.aim)?;
        writeln!(out, "Symbol: {}", faction.symbol)?;
        writeln!(out, "Total Members: {}", faction.member_count)?;
        writeln!(
            out,
            "Head: {}",
            faction.head_name.as_deref().unwrap_or(MISSING)
        )?;
    }
    Ok(())
}

pub fn membership<W: Write>(out: &mut W, stats: &MembershipStats) -> io::Result<()> {
    writeln!(out, "\n=== Faction Membership Statistics ===")?;
    writeln!(out, "Total Members: {}", stats.total_members)?;
    writeln!(out, "Total Factions: {}", stats.total_factions)?;
    match stats.members_per_faction {
        Some(ratio) => writeln!(out, "Average Members per Faction: {ratio:.2}"),
        None => writeln!(out, "Average Members per Faction: {MISSING}"),
    }
}

/// Rows arrive grouped by artifact; the header is printed once per artifact.
pub fn artifacts<W: Write>(out: &mut W, matches: &[ArtifactPowerMatch]) -> io::Result<()> {
    writeln!(out, "\n=== Artifacts ===")?;
    if matches.is_empty() {
        return writeln!(out, "No artifacts found.");
    }
    let mut current = None;
    for hit in matches {
        if current != Some(hit.artifact_id) {
            current = Some(hit.artifact_id);
            writeln!(out, "\nArtifact ID: {}", hit.artifact_id)?;
            writeln!(out, "Origin: {}", hit.origin)?;
            writeln!(out, "Procurement Date: {}", hit.procured_on)?;
            writeln!(
                out,
                "Controlling Faction: {}",
                hit.controlling_faction.as_deref().unwrap_or(MISSING)
            )?;
            writeln!(out, "Number of Guards: {}", hit.guard_count)?;
            writeln!(out, "Powers:")?;
        }
        writeln!(out, "  - {}", hit.power)?;
    }
    Ok(())
}

pub fn monthly<W: Write>(out: &mut W, report: &MonthlyFactionReport) -> io::Result<()> {
    writeln!(out, "\n=== Monthly Faction Report ===")?;
    writeln!(out, "\nMeetings:")?;
    if report.meetings.is_empty() {
        writeln!(out, "No meetings this month.")?;
    }
    for meeting in &report.meetings {
        writeln!(out, "\nFaction: {}", meeting.aim)?;
        writeln!(out, "Date: {}", meeting.meeting_date)?;
        writeln!(out, "Time: {}", meeting.meeting_time)?;
        writeln!(out, "Location: {}, {}", meeting.city, meeting.country)?;
        writeln!(out, "Agenda: {}", meeting.agenda)?;
        writeln!(out, "Member Count: {}", meeting.member_count)?;
        writeln!(
            out,
            "Faction Head: {}",
            meeting.faction_head.as_deref().unwrap_or(MISSING)
        )?;
    }

    writeln!(out, "\nHierarchy:")?;
    let mut current_faction = None;
    for member in &report.hierarchy {
        if current_faction != Some(member.faction_id) {
            current_faction = Some(member.faction_id);
            writeln!(out, "\nFaction: {}", member.faction_name)?;
        }
        let indent = "  ".repeat(member.level as usize);
        writeln!(out, "{indent}└─ {} {}", member.first_name, member.last_name)?;
        writeln!(out, "{indent}   Level: {}", member.level)?;
        writeln!(out, "{indent}   Subordinates: {}", member.subordinates)?;
    }
    Ok(())
}

pub fn surveillance<W: Write>(out: &mut W, analysis: &SurveillanceAnalysis) -> io::Result<()> {
    let individuals = &analysis.individuals;
    let organizations = &analysis.organizations;
    let summary = &analysis.summary;

    writeln!(out, "\n=== Surveillance Analysis ===")?;
    writeln!(out, "\nIndividual Targets:")?;
    writeln!(out, "Total Count: {}", individuals.count)?;
    writeln!(out, "Unique Nationalities: {}", individuals.unique_nationalities)?;
    writeln!(out, "Unique Locations: {}", individuals.unique_locations)?;

    writeln!(out, "\nOrganization Targets:")?;
    writeln!(out, "Total Count: {}", organizations.count)?;
    writeln!(out, "Unique Types: {}", organizations.unique_types)?;
    writeln!(out, "Unique Presidents: {}", organizations.unique_presidents)?;

    writeln!(out, "\nSurveillance Summary:")?;
    writeln!(out, "Total Operations: {}", summary.total_operations)?;
    writeln!(out, "Active Surveyors: {}", summary.active_surveyors)?;
    match (summary.earliest, summary.latest) {
        (Some(earliest), Some(latest)) => {
            writeln!(out, "Earliest Operation: {earliest}")?;
            writeln!(out, "Latest Operation: {latest}")
        }
        _ => {
            writeln!(out, "Earliest Operation: {MISSING}")?;
            writeln!(out, "Latest Operation: {MISSING}")
        }
    }
}

pub fn deletion<W: Write>(out: &mut W, deletion: &ArtifactDeletion) -> io::Result<()> {
    writeln!(
        out,
        "Artifact deleted successfully! Removed {} rows ({} powers, {} guards, {} rituals).",
        deletion.total_rows(),
        deletion.powers,
        deletion.guards,
        deletion.rituals
    )
}

#[cfg(test)]
mod tests {
    use super::{artifacts, membership, monthly};
    use chrono::{NaiveDate, NaiveTime};
    use conclave_core::{
        ArtifactPowerMatch, FactionMeeting, HierarchyEntry, MembershipStats, MonthlyFactionReport,
    };

    fn render(write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn power(artifact_id: i64, power: &str) -> ArtifactPowerMatch {
        ArtifactPowerMatch {
            artifact_id,
            origin: "Egypt".to_string(),
            procured_on: NaiveDate::from_ymd_opt(1922, 11, 4).unwrap(),
            power: power.to_string(),
            controlling_faction: None,
            guard_count: 0,
        }
    }

    fn entry(member_id: i64, faction_id: i64, level: u32) -> HierarchyEntry {
        HierarchyEntry {
            member_id,
            first_name: "Ada".to_string(),
            last_name: format!("No{member_id}"),
            faction_id,
            faction_name: format!("Faction {faction_id}"),
            leader_id: None,
            level,
            subordinates: 0,
        }
    }

    #[test]
    fn artifact_header_is_printed_once_per_artifact() {
        let text = render(|out| {
            artifacts(
                out,
                &[power(1, "Flight"), power(1, "Sight"), power(2, "Stone")],
            )
        });

        assert_eq!(text.matches("Artifact ID: 1").count(), 1);
        assert_eq!(text.matches("Artifact ID: 2").count(), 1);
        assert!(text.contains("Powers:\n  - Flight\n  - Sight\n"));
        assert!(text.contains("Controlling Faction: n/a"));
    }

    #[test]
    fn hierarchy_is_grouped_by_faction_and_indented_by_level() {
        let report = MonthlyFactionReport {
            meetings: vec![FactionMeeting {
                faction_id: 1,
                aim: "Faction 1".to_string(),
                meeting_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                meeting_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
                agenda: "Budget".to_string(),
                city: "Zurich".to_string(),
                country: "Switzerland".to_string(),
                member_count: 2,
                faction_head: None,
            }],
            hierarchy: vec![entry(1, 1, 0), entry(2, 1, 2), entry(3, 2, 0)],
        };

        let text = render(|out| monthly(out, &report));

        assert!(text.contains("Location: Zurich, Switzerland"));
        assert!(text.contains("Time: 19:00:00"));
        assert!(text.contains("\nFaction: Faction 1\n└─ Ada No1\n"));
        assert!(text.contains("\n    └─ Ada No2\n       Level: 2\n"));
        assert!(text.contains("\nFaction: Faction 2\n└─ Ada No3\n"));
    }

    #[test]
    fn missing_ratio_renders_placeholder() {
        let text = render(|out| {
            membership(
                out,
                &MembershipStats {
                    total_members: 0,
                    total_factions: 0,
                    members_per_faction: None,
                },
            )
        });
        assert!(text.contains("Average Members per Faction: n/a"));
    }
}
