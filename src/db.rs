use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::core::SavedTrip;

/// Database for trip persistence
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Get the database file path
    pub fn db_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "tripagent", "trip-cli")
            .context("Failed to determine data directory")?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("trips.db"))
    }

    /// Open or create the database at the default location
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::db_path()?)
    }

    /// Open or create a database at a specific path
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS trips (
                id TEXT PRIMARY KEY,
                params_json TEXT NOT NULL,
                status_json TEXT NOT NULL,
                plan_json TEXT,
                saved_path TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_trips_created_at ON trips(created_at DESC);
            CREATE INDEX IF NOT EXISTS idx_trips_status ON trips(status_json);
            "#,
        )?;
        Ok(())
    }

    /// Insert a new trip
    pub fn insert_trip(&self, trip: &SavedTrip) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO trips (id, params_json, status_json, plan_json, saved_path, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                trip.id,
                serde_json::to_string(&trip.params)?,
                serde_json::to_string(&trip.status)?,
                trip.plan.as_ref().map(serde_json::to_string).transpose()?,
                trip.saved_path,
                trip.created_at.to_rfc3339(),
                trip.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Update an existing trip
    pub fn update_trip(&self, trip: &SavedTrip) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            UPDATE trips SET
                params_json = ?2,
                status_json = ?3,
                plan_json = ?4,
                saved_path = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
            params![
                trip.id,
                serde_json::to_string(&trip.params)?,
                serde_json::to_string(&trip.status)?,
                trip.plan.as_ref().map(serde_json::to_string).transpose()?,
                trip.saved_path,
                trip.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a trip by ID
    pub fn get_trip(&self, id: &str) -> Result<Option<SavedTrip>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, params_json, status_json, plan_json, saved_path, created_at, updated_at FROM trips WHERE id = ?1"
        )?;

        stmt.query_row(params![id], |row| Ok(self.row_to_trip(row)))
            .optional()?
            .transpose()
    }

    /// List trips with an optional status filter, newest first
    pub fn list_trips(&self, limit: u32, status_filter: Option<&str>) -> Result<Vec<SavedTrip>> {
        let conn = self.conn.lock().unwrap();

        let mut trips = Vec::new();

        if let Some(status) = status_filter {
            let query = "SELECT id, params_json, status_json, plan_json, saved_path, created_at, updated_at FROM trips WHERE status_json LIKE ?1 ORDER BY created_at DESC LIMIT ?2";
            let mut stmt = conn.prepare(query)?;
            let pattern = format!("%\"status\":\"{}%", status);
            let rows = stmt.query_map(params![pattern, limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?;

            for row in rows.flatten() {
                if let Ok(trip) = self.tuple_to_trip(row) {
                    trips.push(trip);
                }
            }
        } else {
            let query = "SELECT id, params_json, status_json, plan_json, saved_path, created_at, updated_at FROM trips ORDER BY created_at DESC LIMIT ?1";
            let mut stmt = conn.prepare(query)?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?;

            for row in rows.flatten() {
                if let Ok(trip) = self.tuple_to_trip(row) {
                    trips.push(trip);
                }
            }
        }

        Ok(trips)
    }

    /// Delete a trip
    pub fn delete_trip(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM trips WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Delete all trips, returning how many were removed
    pub fn clear_trips(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM trips", [])?;
        Ok(deleted)
    }

    /// Get trip count
    pub fn count_trips(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM trips", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a SavedTrip
    fn row_to_trip(&self, row: &rusqlite::Row) -> Result<SavedTrip> {
        let params_json: String = row.get(1)?;
        let status_json: String = row.get(2)?;
        let plan_json: Option<String> = row.get(3)?;
        let created_at_str: String = row.get(5)?;
        let updated_at_str: String = row.get(6)?;

        Ok(SavedTrip {
            id: row.get(0)?,
            params: serde_json::from_str(&params_json)?,
            status: serde_json::from_str(&status_json)?,
            plan: plan_json.as_deref().map(serde_json::from_str).transpose()?,
            saved_path: row.get(4)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)?.with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&updated_at_str)?.with_timezone(&Utc),
        })
    }

    /// Convert a tuple to a SavedTrip
    fn tuple_to_trip(
        &self,
        row: (
            String,
            String,
            String,
            Option<String>,
            Option<String>,
            String,
            String,
        ),
    ) -> Result<SavedTrip> {
        Ok(SavedTrip {
            id: row.0,
            params: serde_json::from_str(&row.1)?,
            status: serde_json::from_str(&row.2)?,
            plan: row.3.as_deref().map(serde_json::from_str).transpose()?,
            saved_path: row.4,
            created_at: DateTime::parse_from_rfc3339(&row.5)?.with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.6)?.with_timezone(&Utc),
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlanParams, TripPlan, TripStatus};

    fn test_db(dir: &tempfile::TempDir) -> Database {
        Database::open_at(&dir.path().join("trips.db")).unwrap()
    }

    fn trip(city: &str) -> SavedTrip {
        SavedTrip::new(PlanParams::new(city).with_dates("2026-05-01", "2026-05-03"))
    }

    fn plan(city: &str) -> TripPlan {
        serde_json::from_value(serde_json::json!({
            "city": city,
            "start_date": "2026-05-01",
            "end_date": "2026-05-03",
            "travel_days": 3,
            "days": []
        }))
        .unwrap()
    }

    #[test]
    fn insert_and_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = test_db(&dir);

        let trip = trip("Kyoto");
        db.insert_trip(&trip).unwrap();

        let loaded = db.get_trip(&trip.id).unwrap().unwrap();
        assert_eq!(loaded.id, trip.id);
        assert_eq!(loaded.params.city, "Kyoto");
        assert_eq!(loaded.status, TripStatus::Pending);
        assert!(loaded.plan.is_none());
    }

    #[test]
    fn get_missing_trip_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let db = test_db(&dir);
        assert!(db.get_trip("tp_missing").unwrap().is_none());
    }

    #[test]
    fn update_persists_plan_and_saved_path() {
        let dir = tempfile::tempdir().unwrap();
        let db = test_db(&dir);

        let mut trip = trip("Lisbon");
        db.insert_trip(&trip).unwrap();

        trip.set_completed(plan("Lisbon"));
        trip.set_saved_path("/tmp/out.json");
        db.update_trip(&trip).unwrap();

        let loaded = db.get_trip(&trip.id).unwrap().unwrap();
        assert_eq!(loaded.status, TripStatus::Completed);
        assert_eq!(loaded.plan.unwrap().city, "Lisbon");
        assert_eq!(loaded.saved_path.as_deref(), Some("/tmp/out.json"));
    }

    #[test]
    fn list_orders_newest_first_and_honors_limit() {
        let dir = tempfile::tempdir().unwrap();
        let db = test_db(&dir);

        let older = trip("Rome");
        let mut newer = trip("Paris");
        newer.created_at = older.created_at + chrono::Duration::seconds(5);
        db.insert_trip(&older).unwrap();
        db.insert_trip(&newer).unwrap();

        let all = db.list_trips(10, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].params.city, "Paris");

        let limited = db.list_trips(1, None).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].params.city, "Paris");
    }

    #[test]
    fn list_filters_by_status() {
        let dir = tempfile::tempdir().unwrap();
        let db = test_db(&dir);

        let pending = trip("Oslo");
        let mut done = trip("Berlin");
        done.set_completed(plan("Berlin"));
        db.insert_trip(&pending).unwrap();
        db.insert_trip(&done).unwrap();

        let completed = db.list_trips(10, Some("completed")).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].params.city, "Berlin");

        let pending_only = db.list_trips(10, Some("pending")).unwrap();
        assert_eq!(pending_only.len(), 1);
        assert_eq!(pending_only[0].params.city, "Oslo");
    }

    #[test]
    fn delete_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let db = test_db(&dir);

        let a = trip("Madrid");
        let b = trip("Porto");
        db.insert_trip(&a).unwrap();
        db.insert_trip(&b).unwrap();

        assert!(db.delete_trip(&a.id).unwrap());
        assert!(!db.delete_trip(&a.id).unwrap());
        assert_eq!(db.count_trips().unwrap(), 1);

        assert_eq!(db.clear_trips().unwrap(), 1);
        assert_eq!(db.count_trips().unwrap(), 0);
    }
}
