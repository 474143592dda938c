//! Documents table layout.
//!
//! The version is stamped into `PRAGMA user_version` when a fresh database
//! is created; an existing database must carry the same version and table
//! shape to be opened.

pub const SCHEMA_VERSION: i64 = 1;

pub const DOCUMENT_COLUMNS: [&str; 5] = ["id", "collection", "title", "link", "snippet"];

pub const CREATE_DOCUMENTS_TABLE: &str = "\
CREATE TABLE documents (
    id TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    title TEXT NOT NULL,
    link TEXT NOT NULL,
    snippet TEXT NOT NULL
);";

pub const CREATE_COLLECTION_INDEX: &str =
    "CREATE INDEX idx_documents_collection ON documents(collection);";
