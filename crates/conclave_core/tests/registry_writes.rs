use chrono::NaiveDate;
use conclave_core::db::{open_db_in_memory, seed_demo};
use conclave_core::{
    EntityKind, ErrorKind, NewMember, RegistryRepository, RepoError, ReportRepository,
    SanctumLocation, SqliteRegistryRepository, SqliteReportRepository,
};
use rusqlite::Connection;

fn seeded() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    seed_demo(&mut conn).unwrap();
    conn
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn recruit(member_id: i64, faction_id: i64, leader_id: Option<i64>) -> NewMember {
    NewMember {
        member_id,
        first_name: "Mara".to_string(),
        middle_name: None,
        last_name: "Quill".to_string(),
        dob: NaiveDate::from_ymd_opt(1994, 2, 28).unwrap(),
        faction_id,
        leader_id,
    }
}

#[test]
fn add_member_is_visible_to_headcount_and_hierarchy() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();
    let reports = SqliteReportRepository::try_new(&conn).unwrap();

    registry.add_faction_member(&recruit(302, 3, Some(301))).unwrap();

    let factions = reports.factions_by_member_count(0).unwrap();
    let third = factions
        .iter()
        .find(|faction| faction.faction_id == 3)
        .unwrap();
    assert_eq!(third.member_count, 2);

    let hierarchy = reports.monthly_faction_report(2024, 3).unwrap().hierarchy;
    let recruit_entry = hierarchy
        .iter()
        .find(|entry| entry.member_id == 302)
        .unwrap();
    assert_eq!(recruit_entry.level, 1);
    assert_eq!(recruit_entry.leader_id, Some(301));

    let stored: (Option<String>, String) = conn
        .query_row(
            "SELECT middle_name, dob FROM faction_members WHERE member_id = 302;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(stored, (None, "1994-02-28".to_string()));
}

#[test]
fn add_member_without_leader_becomes_root() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    registry.add_faction_member(&recruit(401, 4, None)).unwrap();

    let reports = SqliteReportRepository::try_new(&conn).unwrap();
    let hierarchy = reports.monthly_faction_report(2024, 3).unwrap().hierarchy;
    let entry = hierarchy.last().unwrap();
    assert_eq!((entry.member_id, entry.faction_id, entry.level), (401, 4, 0));
}

#[test]
fn add_member_with_existing_id_leaves_store_unchanged() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let err = registry
        .add_faction_member(&recruit(101, 1, None))
        .unwrap_err();

    assert!(matches!(
        &err,
        RepoError::DuplicateKey { entity: EntityKind::Member, key } if key == "101"
    ));
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM faction_members;"), 7);
    let first_name: String = conn
        .query_row(
            "SELECT first_name FROM faction_members WHERE member_id = 101;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(first_name, "Victor");
}

#[test]
fn add_member_rejects_missing_faction() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let err = registry
        .add_faction_member(&recruit(900, 99, None))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::InvalidReference {
            entity: EntityKind::Faction,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidReference);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM faction_members;"), 7);
}

#[test]
fn add_member_rejects_leader_from_other_faction_or_missing() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let cross = registry
        .add_faction_member(&recruit(900, 1, Some(201)))
        .unwrap_err();
    assert!(matches!(
        &cross,
        RepoError::InvalidReference { entity: EntityKind::Member, key, .. } if key == "201"
    ));

    let missing = registry
        .add_faction_member(&recruit(900, 1, Some(999)))
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::InvalidReference);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM faction_members;"), 7);
}

#[test]
fn duplicate_check_runs_before_reference_checks() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let err = registry
        .add_faction_member(&recruit(101, 99, Some(999)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
}

#[test]
fn sanctum_relocation_round_trips_through_lookup() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();
    let reports = SqliteReportRepository::try_new(&conn).unwrap();
    let location = SanctumLocation {
        street: "7 Via Nascosta".to_string(),
        city: "Rome".to_string(),
        country: "Italy".to_string(),
    };

    registry
        .update_sanctum_location("Ordo ab chao", &location)
        .unwrap();

    let sanctum = reports.get_sanctum("Ordo ab chao").unwrap().unwrap();
    assert_eq!(sanctum.location, location);
    let untouched = reports.get_sanctum("Novus ordo").unwrap().unwrap();
    assert_eq!(untouched.location.city, "Munich");
}

#[test]
fn sanctum_relocation_of_unknown_mantra_is_not_found() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();
    let location = SanctumLocation {
        street: "x".to_string(),
        city: "y".to_string(),
        country: "z".to_string(),
    };

    let err = registry
        .update_sanctum_location("Silence", &location)
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Sanctum,
            ..
        }
    ));
    assert_eq!(err.to_string(), "sanctum not found: Silence");
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sanctums WHERE city = 'y';"), 0);
}

#[test]
fn delete_artifact_removes_every_dependent_row() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let deletion = registry.delete_artifact(1).unwrap();

    assert_eq!(
        (deletion.artifact_id, deletion.powers, deletion.guards, deletion.rituals),
        (1, 2, 2, 2)
    );
    assert_eq!(deletion.total_rows(), 7);
    for table in ["artifacts", "artifact_powers", "artifact_guards", "rituals"] {
        let remaining = count(
            &conn,
            &format!("SELECT COUNT(*) FROM {table} WHERE artifact_id = 1;"),
        );
        assert_eq!(remaining, 0, "{table} still references artifact 1");
    }
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM artifacts;"), 2);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM artifact_powers;"), 3);
}

#[test]
fn delete_artifact_twice_reports_not_found() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    registry.delete_artifact(2).unwrap();
    let err = registry.delete_artifact(2).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "artifact not found: 2");
}

#[test]
fn delete_artifact_without_dependents_counts_only_itself() {
    let conn = seeded();
    conn.execute("DELETE FROM artifact_powers WHERE artifact_id = 3;", [])
        .unwrap();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let deletion = registry.delete_artifact(3).unwrap();
    assert_eq!(deletion.total_rows(), 1);
}

#[test]
fn leader_title_rename_shows_in_event_report() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();
    let reports = SqliteReportRepository::try_new(&conn).unwrap();

    registry
        .update_leader_title_name("Grand Master", "Clara Weiss")
        .unwrap();

    let events = reports.events_by_member("Grand Master").unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| event.member_name == "Clara Weiss"));
}

#[test]
fn leader_title_rename_of_unknown_title_is_not_found() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let err = registry
        .update_leader_title_name("Nobody", "Someone")
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::LeaderTitle,
            ..
        }
    ));
}

#[test]
fn faction_head_change_shows_in_headcount() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();
    let reports = SqliteReportRepository::try_new(&conn).unwrap();

    registry.update_faction_head(2, "Archivist").unwrap();

    let factions = reports.factions_by_member_count(0).unwrap();
    let second = factions
        .iter()
        .find(|faction| faction.faction_id == 2)
        .unwrap();
    assert_eq!(second.head_name.as_deref(), Some("Lena Okafor"));
}

#[test]
fn faction_head_change_distinguishes_missing_faction_from_missing_title() {
    let conn = seeded();
    let registry = SqliteRegistryRepository::try_new(&conn).unwrap();

    let missing_faction = registry.update_faction_head(99, "Oracle").unwrap_err();
    assert!(matches!(
        missing_faction,
        RepoError::NotFound {
            entity: EntityKind::Faction,
            ..
        }
    ));

    let missing_title = registry.update_faction_head(2, "Nobody").unwrap_err();
    assert!(matches!(
        missing_title,
        RepoError::InvalidReference {
            entity: EntityKind::LeaderTitle,
            ..
        }
    ));

    let head: String = conn
        .query_row(
            "SELECT head_title FROM factions WHERE faction_id = 2;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(head, "Keeper of Keys");
}
