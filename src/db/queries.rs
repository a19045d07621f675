pub const CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  id               INTEGER PRIMARY KEY AUTOINCREMENT,
  date             TEXT NOT NULL,
  workout          TEXT,
  nutrition        TEXT,
  sleep            REAL,
  performance      REAL,
  duration_minutes REAL,
  calories_intake  REAL
);
"#;

pub const INDEX_ACTIVITIES_DATE: &str =
    "CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);";

pub fn schema_statements() -> Vec<&'static str> {
    vec![CREATE_ACTIVITIES, INDEX_ACTIVITIES_DATE]
}
