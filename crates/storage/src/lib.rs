#![forbid(unsafe_code)]

//! Date-keyed persistence for aggregated daily stats.
//!
//! One SQLite table, one JSON payload per UTC day. Writing the same day twice
//! replaces the payload, so a day converges to its latest aggregation.

use la_core::stats::DailyStats;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE: &str = "listing_audit.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS daily_stats (
    date          TEXT PRIMARY KEY,
    payload_json  TEXT NOT NULL,
    updated_at_ms INTEGER NOT NULL
);
";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    Serde(serde_json::Error),
    InvalidInput(&'static str),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Serde(err) => write!(f, "json: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

#[derive(Debug)]
pub struct DailyStatsStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl DailyStatsStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let conn = Connection::open(storage_dir.join(DB_FILE))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Insert or replace the stats payload for the day named by `stats.date`.
    pub fn put_daily(&mut self, stats: &DailyStats) -> Result<(), StoreError> {
        validate_date(&stats.date)?;
        let payload = serde_json::to_string(stats)?;
        self.conn.execute(
            "INSERT INTO daily_stats(date, payload_json, updated_at_ms) \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT(date) DO UPDATE SET \
               payload_json = excluded.payload_json, \
               updated_at_ms = excluded.updated_at_ms",
            params![stats.date, payload, now_ms()],
        )?;
        Ok(())
    }

    pub fn get_daily(&self, date: &str) -> Result<Option<DailyStats>, StoreError> {
        validate_date(date)?;
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload_json FROM daily_stats WHERE date = ?1",
                params![date],
                |row| row.get(0),
            )
            .optional()?;
        let Some(payload) = payload else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Most recent days first, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> Result<Vec<DailyStats>, StoreError> {
        let limit =
            i64::try_from(limit).map_err(|_| StoreError::InvalidInput("limit too large"))?;
        let mut stmt = self
            .conn
            .prepare("SELECT payload_json FROM daily_stats ORDER BY date DESC LIMIT ?1")?;
        let rows = stmt.query_map(params![limit], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for payload in rows {
            out.push(serde_json::from_str(&payload?)?);
        }
        Ok(out)
    }
}

// The date is the primary key; only `YYYY-MM-DD` keeps lexicographic order
// equal to chronological order.
fn validate_date(date: &str) -> Result<(), StoreError> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(StoreError::InvalidInput("date must be YYYY-MM-DD"))
    }
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use la_core::stats::AggregatedStats;

    fn temp_dir(prefix: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = base.join(format!("{prefix}_{pid}_{nonce}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn daily(date: &str, runs: usize) -> DailyStats {
        DailyStats {
            date: date.to_string(),
            stats: AggregatedStats {
                total_runs: runs,
                ..AggregatedStats::default()
            },
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = temp_dir("la_store_roundtrip");
        let mut store = DailyStatsStore::open(&dir).expect("open");
        let stats = daily("2024-06-01", 3);
        store.put_daily(&stats).expect("put");
        let loaded = store.get_daily("2024-06-01").expect("get");
        assert_eq!(loaded, Some(stats));
    }

    #[test]
    fn missing_date_is_none() {
        let dir = temp_dir("la_store_missing");
        let store = DailyStatsStore::open(&dir).expect("open");
        assert_eq!(store.get_daily("2024-06-01").expect("get"), None);
    }

    #[test]
    fn same_day_write_replaces_the_payload() {
        let dir = temp_dir("la_store_replace");
        let mut store = DailyStatsStore::open(&dir).expect("open");
        store.put_daily(&daily("2024-06-01", 3)).expect("put");
        store.put_daily(&daily("2024-06-01", 9)).expect("put again");
        let loaded = store.get_daily("2024-06-01").expect("get").expect("some");
        assert_eq!(loaded.stats.total_runs, 9);
        assert_eq!(store.recent(10).expect("recent").len(), 1);
    }

    #[test]
    fn recent_returns_newest_first_and_honors_the_limit() {
        let dir = temp_dir("la_store_recent");
        let mut store = DailyStatsStore::open(&dir).expect("open");
        for date in ["2024-06-02", "2024-05-30", "2024-06-01"] {
            store.put_daily(&daily(date, 1)).expect("put");
        }
        let recent = store.recent(2).expect("recent");
        let dates: Vec<&str> = recent.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-02", "2024-06-01"]);
    }

    #[test]
    fn malformed_date_is_rejected() {
        let dir = temp_dir("la_store_bad_date");
        let mut store = DailyStatsStore::open(&dir).expect("open");
        let err = store.put_daily(&daily("June 1st", 1)).expect_err("reject");
        assert!(matches!(err, StoreError::InvalidInput(_)));
        let err = store.get_daily("2024/06/01").expect_err("reject");
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn store_survives_reopen() {
        let dir = temp_dir("la_store_reopen");
        {
            let mut store = DailyStatsStore::open(&dir).expect("open");
            store.put_daily(&daily("2024-06-01", 5)).expect("put");
        }
        let store = DailyStatsStore::open(&dir).expect("reopen");
        let loaded = store.get_daily("2024-06-01").expect("get").expect("some");
        assert_eq!(loaded.stats.total_runs, 5);
    }
}
