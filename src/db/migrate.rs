use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS meal_logs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL,
            date        TEXT NOT NULL,
            meal_type   TEXT NOT NULL,
            description TEXT NOT NULL,
            quantity    INTEGER NOT NULL CHECK (quantity BETWEEN 1 AND 4294967295),
            nutrients   TEXT NOT NULL DEFAULT '{}',
            created_at  TEXT NOT NULL,
            UNIQUE (username, date, meal_type, description)
        );
        CREATE INDEX IF NOT EXISTS idx_meal_logs_user_date ON meal_logs(username, date);

        CREATE TABLE IF NOT EXISTS health_profiles (
            username        TEXT PRIMARY KEY,
            diet_goal       TEXT NOT NULL,
            age             INTEGER NOT NULL,
            gender          TEXT NOT NULL,
            height_cm       REAL NOT NULL,
            weight_kg       REAL NOT NULL,
            activity_factor REAL NOT NULL,
            allergies       TEXT NOT NULL DEFAULT '[]',
            updated_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS candidate_meals (
            id           TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            meal_type    TEXT NOT NULL,
            diet_types   TEXT NOT NULL DEFAULT '[]',
            allergy_tags TEXT NOT NULL DEFAULT '[]',
            calories     REAL,
            serving      TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_candidate_meals_type ON candidate_meals(meal_type);",
    )?;
    Ok(())
}
