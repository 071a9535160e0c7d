use std::path::Path;

use chrono::DateTime;
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::history::detection_record::{DetectionRecord, Source};

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("corrupt history row: {0}")]
    CorruptRow(String),
}

/// SQLite-backed detection history.
///
/// Rows accumulate per user; timestamps are stored as RFC 3339 text so the
/// file stays readable with plain sqlite tooling.
pub struct DetectionStore {
    conn: Connection,
}

impl DetectionStore {
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS detections (
                id INTEGER PRIMARY KEY,
                timestamp TEXT NOT NULL,
                age TEXT,
                gender TEXT,
                source TEXT NOT NULL,
                user_id INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_detections_user ON detections(user_id)",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn insert(&self, record: &DetectionRecord) -> Result<(), HistoryError> {
        self.conn.execute(
            "INSERT INTO detections (timestamp, age, gender, source, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.timestamp.to_rfc3339(),
                record.age,
                record.gender,
                record.source.as_str(),
                record.user_id,
            ],
        )?;
        Ok(())
    }

    /// Inserts a batch inside one transaction.
    pub fn insert_all(&mut self, records: &[DetectionRecord]) -> Result<(), HistoryError> {
        let tx = self.conn.transaction()?;
        for record in records {
            tx.execute(
                "INSERT INTO detections (timestamp, age, gender, source, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.timestamp.to_rfc3339(),
                    record.age,
                    record.gender,
                    record.source.as_str(),
                    record.user_id,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// All records for one user, oldest first.
    pub fn for_user(&self, user_id: i64) -> Result<Vec<DetectionRecord>, HistoryError> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, age, gender, source, user_id
             FROM detections WHERE user_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (timestamp, age, gender, source, user_id) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| HistoryError::CorruptRow(format!("bad timestamp: {e}")))?
                .with_timezone(&chrono::Utc);
            let source = source.parse::<Source>().map_err(HistoryError::CorruptRow)?;
            records.push(DetectionRecord {
                timestamp,
                age,
                gender,
                source,
                user_id,
            });
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<usize, HistoryError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM detections", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
