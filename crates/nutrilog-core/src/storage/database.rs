//! SQLite-based journal storage and streak persistence.
//!
//! Provides persistent storage for:
//! - Food journal entries
//! - The streak state, in a key-value table scoped to this installation

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::DatabaseError;
use crate::journal::{FoodAnalysis, GlycemicLoad, JournalEntry};
use crate::streak::{StreakState, StreakStore};

use super::data_dir;

const KV_STREAK_COUNT: &str = "streak.count";
const KV_STREAK_LAST_DAY: &str = "streak.last_day";

/// CE day number of 1970-01-01, per `NaiveDate::num_days_from_ce`.
const UNIX_EPOCH_CE_DAYS: i64 = 719_163;

fn to_epoch_day(day: NaiveDate) -> i64 {
    i64::from(day.num_days_from_ce()) - UNIX_EPOCH_CE_DAYS
}

fn from_epoch_day(days: i64) -> Option<NaiveDate> {
    i32::try_from(days + UNIX_EPOCH_CE_DAYS)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// SQLite database for journal entries and streak state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/nutrilog/nutrilog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("nutrilog.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at a specific path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS journal (
                    id            TEXT PRIMARY KEY,
                    food_name     TEXT NOT NULL,
                    description   TEXT NOT NULL DEFAULT '',
                    logged_at     TEXT NOT NULL,
                    calories      INTEGER,
                    glycemic_load INTEGER,
                    advice        TEXT
                );

                CREATE INDEX IF NOT EXISTS idx_journal_logged_at ON journal(logged_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Insert a journal entry.
    ///
    /// # Errors
    /// Returns an error if the insert fails (including a duplicate id).
    pub fn insert_entry(&self, entry: &JournalEntry) -> Result<(), DatabaseError> {
        let analysis = entry.analysis.as_ref();
        self.conn.execute(
            "INSERT INTO journal (id, food_name, description, logged_at, calories, glycemic_load, advice)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                entry.food_name,
                entry.description,
                entry.logged_at.to_rfc3339(),
                analysis.map(|a| a.calories),
                analysis.map(|a| a.glycemic_load.code()),
                analysis.map(|a| a.advice.as_str()),
            ],
        )?;
        Ok(())
    }

    /// List all journal entries, newest first.
    pub fn list_entries(&self) -> Result<Vec<JournalEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, food_name, description, logged_at, calories, glycemic_load, advice
             FROM journal
             ORDER BY logged_at DESC, id",
        )?;
        let rows = stmt.query_map([], row_to_entry)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Fetch one entry by id.
    pub fn get_entry(&self, id: &str) -> Result<Option<JournalEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, food_name, description, logged_at, calories, glycemic_load, advice
             FROM journal WHERE id = ?1",
        )?;
        match stmt.query_row(params![id], row_to_entry) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an entry's name, description and analysis.
    ///
    /// Returns `false` if no entry with that id exists.
    pub fn update_entry(
        &self,
        id: &str,
        food_name: &str,
        description: &str,
        analysis: Option<&FoodAnalysis>,
    ) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE journal
             SET food_name = ?2, description = ?3, calories = ?4, glycemic_load = ?5, advice = ?6
             WHERE id = ?1",
            params![
                id,
                food_name,
                description,
                analysis.map(|a| a.calories),
                analysis.map(|a| a.glycemic_load.code()),
                analysis.map(|a| a.advice.as_str()),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete an entry. Returns `false` if no entry with that id exists.
    pub fn delete_entry(&self, id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM journal WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<JournalEntry> {
    let logged_at_raw: String = row.get(3)?;
    let logged_at = DateTime::parse_from_rfc3339(&logged_at_raw)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    let calories: Option<u32> = row.get(4)?;
    let code: Option<u8> = row.get(5)?;
    let advice: Option<String> = row.get(6)?;
    // An analysis is present only when all three columns are, and the
    // category code is one we recognize.
    let analysis = match (calories, code.and_then(GlycemicLoad::from_code), advice) {
        (Some(calories), Some(glycemic_load), Some(advice)) => Some(FoodAnalysis {
            calories,
            glycemic_load,
            advice,
        }),
        _ => None,
    };

    Ok(JournalEntry {
        id: row.get(0)?,
        food_name: row.get(1)?,
        description: row.get(2)?,
        logged_at,
        analysis,
    })
}

impl StreakStore for Database {
    /// Missing or unparseable values degrade to the unset state; the
    /// activity path never fails because local state went bad.
    fn load_streak(&self) -> Result<StreakState, DatabaseError> {
        let count = self
            .kv_get(KV_STREAK_COUNT)?
            .and_then(|v| v.parse::<u32>().ok());
        let day = self
            .kv_get(KV_STREAK_LAST_DAY)?
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(from_epoch_day);

        match (day, count) {
            (Some(day), Some(count)) if count >= 1 => Ok(StreakState {
                last_activity_day: Some(day),
                streak_count: count,
            }),
            _ => Ok(StreakState::default()),
        }
    }

    fn save_streak(&self, state: &StreakState) -> Result<(), DatabaseError> {
        match state.last_activity_day {
            Some(day) => {
                self.kv_set(KV_STREAK_COUNT, &state.streak_count.to_string())?;
                self.kv_set(KV_STREAK_LAST_DAY, &to_epoch_day(day).to_string())?;
            }
            None => {
                self.conn.execute(
                    "DELETE FROM kv WHERE key IN (?1, ?2)",
                    params![KV_STREAK_COUNT, KV_STREAK_LAST_DAY],
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry(name: &str) -> JournalEntry {
        JournalEntry::new(name, "test meal", Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn epoch_day_round_trip() {
        for (y, m, d) in [(1970, 1, 1), (2024, 1, 1), (1969, 12, 31), (2038, 6, 15)] {
            let day = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(from_epoch_day(to_epoch_day(day)), Some(day), "{day}");
        }
        assert_eq!(to_epoch_day(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(
            to_epoch_day(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()),
            1
        );
    }

    #[test]
    fn streak_state_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_streak().unwrap().is_unset());

        let state = StreakState {
            last_activity_day: NaiveDate::from_ymd_opt(2024, 1, 2),
            streak_count: 6,
        };
        db.save_streak(&state).unwrap();
        assert_eq!(db.load_streak().unwrap(), state);

        db.save_streak(&StreakState::default()).unwrap();
        assert!(db.load_streak().unwrap().is_unset());
    }

    #[test]
    fn corrupt_streak_values_degrade_to_unset() {
        let db = Database::open_memory().unwrap();
        db.kv_set(KV_STREAK_COUNT, "not-a-number").unwrap();
        db.kv_set(KV_STREAK_LAST_DAY, "19723").unwrap();
        assert!(db.load_streak().unwrap().is_unset());

        // A zero count with a day set violates the invariant; treat as unset.
        db.kv_set(KV_STREAK_COUNT, "0").unwrap();
        assert!(db.load_streak().unwrap().is_unset());
    }

    #[test]
    fn journal_insert_and_list() {
        let db = Database::open_memory().unwrap();
        let mut breakfast = sample_entry("Oatmeal");
        breakfast.logged_at = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let lunch = sample_entry("Rice bowl").with_analysis(FoodAnalysis {
            calories: 540,
            glycemic_load: GlycemicLoad::High,
            advice: "Pair with protein.".into(),
        });

        db.insert_entry(&breakfast).unwrap();
        db.insert_entry(&lunch).unwrap();

        let entries = db.list_entries().unwrap();
        assert_eq!(entries.len(), 2);
        // Newest first.
        assert_eq!(entries[0].food_name, "Rice bowl");
        assert_eq!(
            entries[0].analysis.as_ref().unwrap().glycemic_load,
            GlycemicLoad::High
        );
        assert_eq!(entries[1].food_name, "Oatmeal");
        assert!(entries[1].analysis.is_none());
    }

    #[test]
    fn journal_get_update_delete() {
        let db = Database::open_memory().unwrap();
        let entry = sample_entry("Toast");
        db.insert_entry(&entry).unwrap();

        let fetched = db.get_entry(&entry.id).unwrap().unwrap();
        assert_eq!(fetched, entry);

        let analysis = FoodAnalysis {
            calories: 220,
            glycemic_load: GlycemicLoad::Medium,
            advice: "Whole-grain next time.".into(),
        };
        assert!(db
            .update_entry(&entry.id, "Whole-grain toast", "breakfast", Some(&analysis))
            .unwrap());
        let updated = db.get_entry(&entry.id).unwrap().unwrap();
        assert_eq!(updated.food_name, "Whole-grain toast");
        assert_eq!(updated.analysis, Some(analysis));

        assert!(db.delete_entry(&entry.id).unwrap());
        assert!(db.get_entry(&entry.id).unwrap().is_none());
        assert!(!db.delete_entry(&entry.id).unwrap());
        assert!(!db.update_entry("missing", "x", "", None).unwrap());
    }
}
