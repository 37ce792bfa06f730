use conclave_core::db::schema::{supported_version, REGISTRY_TABLES};
use conclave_core::db::{open_db, open_db_in_memory, seed_demo, DbError};
use conclave_core::{RepoError, SqliteReportRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_every_registry_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), supported_version());
    for table in REGISTRY_TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO faction_members (member_id, first_name, last_name, dob, faction_id)
             VALUES (1, 'A', 'B', '2000-01-01', 42);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn reopening_file_database_keeps_data_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conclave.db");

    let mut first = open_db(&path).unwrap();
    seed_demo(&mut first).unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), supported_version());
    let members: i64 = second
        .query_row("SELECT COUNT(*) FROM faction_members;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(members, 7);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, supported_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn seeding_twice_fails_without_partial_rows() {
    let mut conn = open_db_in_memory().unwrap();
    seed_demo(&mut conn).unwrap();

    let err = seed_demo(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::SeedConflict(_)));
    let titles: i64 = conn
        .query_row("SELECT COUNT(*) FROM leader_titles;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(titles, 4);
}

#[test]
fn repository_rejects_unbootstrapped_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteReportRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        } if expected_version == supported_version()
    ));
}

#[test]
fn repository_rejects_connection_missing_a_table() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = OFF; DROP TABLE surveyors;")
        .unwrap();

    let err = SqliteReportRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("surveyors")));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
