//! SQLite database for persistent command storage

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::StoreError;
use crate::types::{CommandRecord, ParsedCommand};

const SELECT_COLUMNS: &str =
    "key, slug, title, description, category, tags, content, created_at";

/// SQLite-based command database
#[derive(Clone)]
pub struct CommandDb {
    conn: Arc<Mutex<Connection>>,
}

impl CommandDb {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::database(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::database(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS commands (
                key TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                tags TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_commands_category ON commands(category);
            CREATE INDEX IF NOT EXISTS idx_commands_created_at ON commands(created_at);
        "#,
        )
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Database migrations complete");
        Ok(())
    }

    /// Insert a command; a second insert of the same id is a duplicate
    pub fn insert_command(
        &self,
        command: &ParsedCommand,
    ) -> std::result::Result<CommandRecord, StoreError> {
        let record = CommandRecord::new(command.clone());
        let tags_json = serde_json::to_string(&command.tags)
            .map_err(|e| StoreError::backend(format!("Failed to encode tags: {}", e)))?;

        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO commands (key, slug, title, description, category, tags, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.key.to_string(),
                command.id,
                command.title,
                command.description,
                command.category,
                tags_json,
                command.content,
                record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::Duplicate(command.id.clone())
            }
            other => StoreError::backend(format!("Failed to insert command: {}", other)),
        })?;

        Ok(record)
    }

    /// All commands, newest first
    pub fn list_commands(&self) -> std::result::Result<Vec<CommandRecord>, StoreError> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM commands ORDER BY created_at DESC, rowid DESC",
                SELECT_COLUMNS
            ))
            .map_err(|e| StoreError::backend(format!("Failed to prepare query: {}", e)))?;

        let records = stmt
            .query_map([], row_to_record)
            .map_err(|e| StoreError::backend(format!("Failed to list commands: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::backend(format!("Failed to read command row: {}", e)))?;

        Ok(records)
    }

    /// Get a command by id
    pub fn get_command(&self, id: &str) -> std::result::Result<Option<CommandRecord>, StoreError> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM commands WHERE slug = ?1", SELECT_COLUMNS))
            .map_err(|e| StoreError::backend(format!("Failed to prepare query: {}", e)))?;

        let record = stmt
            .query_row(params![id], row_to_record)
            .optional()
            .map_err(|e| StoreError::backend(format!("Failed to get command: {}", e)))?;

        Ok(record)
    }

    /// Number of stored commands
    pub fn count(&self) -> std::result::Result<usize, StoreError> {
        let conn = self.conn.lock();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM commands", [], |row| row.get(0))
            .map_err(|e| StoreError::backend(format!("Failed to count commands: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<CommandRecord> {
    let key_str: String = row.get(0)?;
    let tags_json: String = row.get(5)?;
    let created_at_str: String = row.get(7)?;

    let key = Uuid::parse_str(&key_str).map_err(|e| conversion_error(0, e))?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|e| conversion_error(5, e))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| conversion_error(7, e))?
        .with_timezone(&Utc);

    Ok(CommandRecord {
        key,
        command: ParsedCommand {
            id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            tags,
            content: row.get(6)?,
        },
        created_at,
    })
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}
