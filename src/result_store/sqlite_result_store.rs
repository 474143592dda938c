use super::schema::{
    CREATE_COLLECTION_INDEX, CREATE_DOCUMENTS_TABLE, DOCUMENT_COLUMNS, SCHEMA_VERSION,
};
use super::{ResultStore, StoredRecord};
use crate::provider::SearchItem;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// SQLite-backed document store.
///
/// One connection is shared by all callers; access is serialized through the
/// mutex. Records are addressed by a UUID generated at insert time.
pub struct SqliteResultStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteResultStore").finish_non_exhaustive()
    }
}

impl SqliteResultStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let conn = Connection::open(path).context("Failed to open results database")?;

        if is_new_db {
            // Fresh database - create with current schema
            info!("Creating new results database at {:?}", path);
            conn.execute(CREATE_DOCUMENTS_TABLE, [])?;
            conn.execute(CREATE_COLLECTION_INDEX, [])?;
            conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
        } else {
            // Existing database - check version and table shape
            let db_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
            if db_version != SCHEMA_VERSION {
                anyhow::bail!(
                    "Results database version {} is not supported (expected {})",
                    db_version,
                    SCHEMA_VERSION
                );
            }
            Self::validate(&conn).context("Results database schema validation failed")?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn validate(conn: &Connection) -> Result<()> {
        let mut stmt = conn.prepare("PRAGMA table_info(documents);")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if columns != DOCUMENT_COLUMNS {
            anyhow::bail!(
                "documents table has columns ({}), expected ({})",
                columns.join(", "),
                DOCUMENT_COLUMNS.join(", ")
            );
        }
        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<StoredRecord> {
        Ok(StoredRecord {
            id: row.get("id")?,
            title: row.get("title")?,
            link: row.get("link")?,
            description: row.get("snippet")?,
        })
    }
}

impl ResultStore for SqliteResultStore {
    fn insert(&self, collection: &str, item: &SearchItem) -> Result<String> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO documents (id, collection, title, link, snippet)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, collection, item.title, item.link, item.description],
        )?;

        Ok(id)
    }

    fn fetch_all(&self, collection: &str) -> Result<Vec<StoredRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, title, link, snippet FROM documents WHERE collection = ?1")?;

        let records = stmt
            .query_map(params![collection], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }
}
