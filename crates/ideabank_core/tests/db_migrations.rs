use ideabank_core::db::migrations::latest_version;
use ideabank_core::{
    open_db, open_db_in_memory, open_db_with_config, DbError, JournalMode, RepoError,
    SqliteIdeaRepository, SqliteSequenceGenerator, StoreConfig,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "ideas");
    assert_table_exists(&conn, "counters");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideabank.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO ideas (id, title, description) VALUES (1, 'kept', 'across opens');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM ideas;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
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
fn open_db_with_config_applies_journal_mode() {
    let dir = tempfile::tempdir().unwrap();

    let wal = open_db(dir.path().join("wal.db")).unwrap();
    assert_eq!(journal_mode(&wal), "wal");

    let mut config = StoreConfig::new(dir.path().join("delete.db"));
    config.journal_mode = JournalMode::Delete;
    let delete = open_db_with_config(&config).unwrap();
    assert_eq!(journal_mode(&delete), "delete");
}

#[test]
fn repositories_reject_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteIdeaRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::StorageUnavailable(DbError::MissingRequiredTable("ideas"))
    ));

    let err = SqliteSequenceGenerator::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::StorageUnavailable(DbError::MissingRequiredTable("counters"))
    ));
}

#[test]
fn repositories_reject_table_missing_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE ideas (id INTEGER PRIMARY KEY, title TEXT);")
        .unwrap();

    let err = SqliteIdeaRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::StorageUnavailable(DbError::MissingRequiredColumn {
            table: "ideas",
            column: "description",
        })
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn journal_mode(conn: &Connection) -> String {
    conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))
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
