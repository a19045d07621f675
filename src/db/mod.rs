pub mod queries;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A stored activity record. `id` is assigned by the store and immutable.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityRow {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub workout: Option<String>,
    pub nutrition: Option<String>,
    pub sleep: Option<f64>,
    pub performance: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub calories_intake: Option<f64>,
}

/// Incoming activity payload. Every field is optional; unknown fields are
/// ignored at deserialization. `date` stays a raw string here so the API
/// layer can apply its lenient date policy before the record is stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewActivity {
    pub date: Option<String>,
    pub workout: Option<String>,
    pub nutrition: Option<String>,
    pub sleep: Option<f64>,
    pub performance: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub calories_intake: Option<f64>,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create DB directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite DB: {}", path.display()))?;

        let database = Self { conn };
        database.init_schema()?;

        Ok(database)
    }

    pub fn init_schema(&self) -> Result<()> {
        queries::schema_statements()
            .iter()
            .try_for_each(|statement| {
                self.conn
                    .execute(statement, [])
                    .context("Failed to initialize schema")
                    .map(|_| ())
            })
    }

    /// Inserts an activity and returns the stored row, id included.
    pub fn insert_activity(&self, date: DateTime<Utc>, fields: &NewActivity) -> Result<ActivityRow> {
        self.conn
            .execute(
                "INSERT INTO activities (date, workout, nutrition, sleep, performance, duration_minutes, calories_intake)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    date,
                    fields.workout.as_deref(),
                    fields.nutrition.as_deref(),
                    fields.sleep,
                    fields.performance,
                    fields.duration_minutes,
                    fields.calories_intake,
                ],
            )
            .context("Failed to insert activity")?;

        let id = self.conn.last_insert_rowid();
        self.activity(id)?
            .with_context(|| format!("Inserted activity not found: id={id}"))
    }

    pub fn activity(&self, id: i64) -> Result<Option<ActivityRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, date, workout, nutrition, sleep, performance, duration_minutes, calories_intake
                 FROM activities WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ActivityRow {
                        id: row.get(0)?,
                        date: row.get(1)?,
                        workout: row.get(2)?,
                        nutrition: row.get(3)?,
                        sleep: row.get(4)?,
                        performance: row.get(5)?,
                        duration_minutes: row.get(6)?,
                        calories_intake: row.get(7)?,
                    })
                },
            )
            .optional()
            .context("Failed to query activity")?;

        Ok(row)
    }

    pub fn list_activities(&self) -> Result<Vec<ActivityRow>> {
        let mut statement = self.conn.prepare(
            "SELECT id, date, workout, nutrition, sleep, performance, duration_minutes, calories_intake
             FROM activities
             ORDER BY date ASC",
        )?;

        let rows = statement
            .query_map([], |row| {
                Ok(ActivityRow {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    workout: row.get(2)?,
                    nutrition: row.get(3)?,
                    sleep: row.get(4)?,
                    performance: row.get(5)?,
                    duration_minutes: row.get(6)?,
                    calories_intake: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to query activities")?;

        Ok(rows)
    }

    pub fn activity_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))
            .context("Failed to count activities")?;

        Ok(count)
    }

    pub fn latest_activity_date(&self) -> Result<Option<DateTime<Utc>>> {
        let date = self
            .conn
            .query_row(
                "SELECT date FROM activities ORDER BY date DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query latest activity date")?;

        Ok(date)
    }

    pub fn clear_activities(&self) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM activities", [])
            .context("Failed to clear activities")?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::{Database, NewActivity};
    use chrono::Utc;

    fn open_temp_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = Database::open(&dir.path().join("fitness.db")).expect("open db");
        (dir, database)
    }

    #[test]
    fn insert_then_list_returns_matching_record() {
        let (_dir, database) = open_temp_db();
        let fields = NewActivity {
            workout: Some("run".to_string()),
            nutrition: Some("balanced".to_string()),
            sleep: Some(7.0),
            performance: Some(12.5),
            duration_minutes: Some(30.0),
            calories_intake: Some(2000.0),
            ..NewActivity::default()
        };

        let stored = database
            .insert_activity(Utc::now(), &fields)
            .expect("insert");
        let listed = database.list_activities().expect("list");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, stored.id);
        assert_eq!(listed[0].workout.as_deref(), Some("run"));
        assert_eq!(listed[0].nutrition.as_deref(), Some("balanced"));
        assert_eq!(listed[0].sleep, Some(7.0));
        assert_eq!(listed[0].performance, Some(12.5));
        assert_eq!(listed[0].duration_minutes, Some(30.0));
        assert_eq!(listed[0].calories_intake, Some(2000.0));
    }

    #[test]
    fn minimal_insert_leaves_optional_fields_unset() {
        let (_dir, database) = open_temp_db();
        let stored = database
            .insert_activity(Utc::now(), &NewActivity::default())
            .expect("insert");

        assert!(stored.workout.is_none());
        assert!(stored.nutrition.is_none());
        assert!(stored.sleep.is_none());
        assert!(stored.performance.is_none());
        assert!(stored.duration_minutes.is_none());
        assert!(stored.calories_intake.is_none());
    }

    #[test]
    fn assigned_ids_are_unique() {
        let (_dir, database) = open_temp_db();
        let first = database
            .insert_activity(Utc::now(), &NewActivity::default())
            .expect("insert first");
        let second = database
            .insert_activity(Utc::now(), &NewActivity::default())
            .expect("insert second");

        assert_ne!(first.id, second.id);
        assert_eq!(database.activity_count().expect("count"), 2);
    }

    #[test]
    fn clear_activities_empties_store() {
        let (_dir, database) = open_temp_db();
        database
            .insert_activity(Utc::now(), &NewActivity::default())
            .expect("insert");

        let deleted = database.clear_activities().expect("clear");

        assert_eq!(deleted, 1);
        assert!(database.list_activities().expect("list").is_empty());
    }

    #[test]
    fn stored_date_round_trips() {
        let (_dir, database) = open_temp_db();
        let date = Utc::now();
        let stored = database
            .insert_activity(date, &NewActivity::default())
            .expect("insert");

        assert_eq!(stored.date.timestamp(), date.timestamp());
    }
}
