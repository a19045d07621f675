use crate::config::Config;
use crate::db::{Database, NewActivity};
use anyhow::Result;
use chrono::{Duration, Utc};

struct DemoActivity {
    days_ago: i64,
    workout: &'static str,
    nutrition: &'static str,
    sleep: f64,
    performance: f64,
    duration_minutes: f64,
    calories_intake: f64,
}

const DEMO_ACTIVITIES: &[DemoActivity] = &[
    DemoActivity { days_ago: 13, workout: "run", nutrition: "balanced", sleep: 7.0, performance: 12.5, duration_minutes: 30.0, calories_intake: 2000.0 },
    DemoActivity { days_ago: 12, workout: "strength", nutrition: "high-protein", sleep: 6.0, performance: 14.8, duration_minutes: 45.0, calories_intake: 2400.0 },
    DemoActivity { days_ago: 11, workout: "cycle", nutrition: "balanced", sleep: 7.5, performance: 11.2, duration_minutes: 60.0, calories_intake: 2200.0 },
    DemoActivity { days_ago: 9, workout: "hiit", nutrition: "high-protein", sleep: 6.5, performance: 15.1, duration_minutes: 25.0, calories_intake: 2300.0 },
    DemoActivity { days_ago: 8, workout: "yoga", nutrition: "light", sleep: 8.0, performance: 9.8, duration_minutes: 40.0, calories_intake: 1800.0 },
    DemoActivity { days_ago: 6, workout: "run", nutrition: "balanced", sleep: 7.2, performance: 13.0, duration_minutes: 35.0, calories_intake: 2100.0 },
    DemoActivity { days_ago: 5, workout: "strength", nutrition: "high-protein", sleep: 6.8, performance: 14.2, duration_minutes: 50.0, calories_intake: 2500.0 },
    DemoActivity { days_ago: 3, workout: "cycle", nutrition: "light", sleep: 7.8, performance: 11.9, duration_minutes: 55.0, calories_intake: 2050.0 },
    DemoActivity { days_ago: 2, workout: "hiit", nutrition: "balanced", sleep: 6.2, performance: 15.6, duration_minutes: 20.0, calories_intake: 2250.0 },
    DemoActivity { days_ago: 0, workout: "run", nutrition: "balanced", sleep: 7.4, performance: 12.9, duration_minutes: 32.0, calories_intake: 2150.0 },
];

pub fn run(config: &Config, keep_existing: bool) -> Result<()> {
    let database = Database::open(&config.db_path)?;

    if !keep_existing {
        let removed = database.clear_activities()?;
        if removed > 0 {
            println!("Cleared {removed} existing activities");
        }
    }

    let now = Utc::now();
    for entry in DEMO_ACTIVITIES {
        let fields = NewActivity {
            workout: Some(entry.workout.to_string()),
            nutrition: Some(entry.nutrition.to_string()),
            sleep: Some(entry.sleep),
            performance: Some(entry.performance),
            duration_minutes: Some(entry.duration_minutes),
            calories_intake: Some(entry.calories_intake),
            ..NewActivity::default()
        };
        database.insert_activity(now - Duration::days(entry.days_ago), &fields)?;
    }

    println!(
        "Seeded {} activities into {}",
        DEMO_ACTIVITIES.len(),
        config.db_path.display()
    );

    Ok(())
}
