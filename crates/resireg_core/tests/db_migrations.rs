use resireg_core::db::migrations::latest_version;
use resireg_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

const REGISTRY_TABLES: [&str; 3] = ["students", "rooms", "allocations"];

#[test]
fn fresh_registry_has_every_table_and_position_index() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    for table in REGISTRY_TABLES {
        assert_eq!(schema_objects(&conn, "table", table), 1, "missing table {table}");
        let index = format!("idx_{table}_position");
        assert_eq!(schema_objects(&conn, "index", &index), 1, "missing index {index}");
    }
}

#[test]
fn reopening_a_registry_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("resireg.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO rooms (floor, room_number, position, room_type) VALUES (3, 14, 0, 'SA');",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let rooms: i64 = conn
        .query_row("SELECT COUNT(*) FROM rooms;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rooms, 1);
    assert_eq!(user_version(&conn), latest_version());
}

#[test]
fn registry_file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 42;")
        .unwrap();

    let err = open_db(&path).unwrap_err();

    assert_eq!(err.code(), "registry_schema_too_new");
    assert!(matches!(
        err,
        DbError::SchemaTooNew {
            file_version: 42,
            supported_version,
        } if supported_version == latest_version()
    ));
}

#[test]
fn data_file_under_a_regular_file_reports_data_dir_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let err = open_db(blocker.join("resireg.sqlite3")).unwrap_err();

    assert!(matches!(err, DbError::DataDir { .. }));
}

#[test]
fn allocation_rows_must_reference_existing_student_and_room() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO rooms (floor, room_number, position, room_type) VALUES (1, 1, 0, 'CA');",
        [],
    )
    .unwrap();

    let orphan = conn.execute(
        "INSERT INTO allocations (position, student_id, floor, room_number)
         VALUES (0, 'E0000001', 1, 1);",
        [],
    );
    assert!(orphan.is_err(), "foreign keys should be enforced");

    let bad_type = conn.execute(
        "INSERT INTO rooms (floor, room_number, position, room_type) VALUES (1, 2, 1, 'XL');",
        [],
    );
    assert!(bad_type.is_err(), "room_type check should be enforced");
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn schema_objects(conn: &Connection, kind: &str, name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2;",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}
