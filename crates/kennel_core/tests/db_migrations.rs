use kennel_core::db::migrations::latest_version;
use kennel_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "dogs");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kennel.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "dogs");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_enforces_uniqueness_and_presence_at_store_level() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO dogs (name, breed, age, created_at) VALUES ('Rex', 'Border Collie', 3, 0);",
        [],
    )
    .unwrap();

    // Same name again must violate the primary key constraint.
    let duplicate = conn.execute(
        "INSERT INTO dogs (name, breed, age, created_at) VALUES ('Rex', 'Labrador', 5, 0);",
        [],
    );
    assert!(duplicate.is_err());

    // Empty name and negative age are rejected by CHECK constraints even when
    // application-level validation is bypassed.
    let empty_name = conn.execute(
        "INSERT INTO dogs (name, breed, age, created_at) VALUES ('', 'Labrador', 5, 0);",
        [],
    );
    assert!(empty_name.is_err());

    let negative_age = conn.execute(
        "INSERT INTO dogs (name, breed, age, created_at) VALUES ('Maple', 'Labrador', -1, 0);",
        [],
    );
    assert!(negative_age.is_err());
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
