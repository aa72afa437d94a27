use crate::models::review::Review;
use rusqlite::{Connection, Error};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function to create test database
    async fn create_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.create_schema().await.unwrap();
        db
    }

    // Test database schema creation
    #[tokio::test]
    async fn test_schema_creation() {
        let db = create_test_db().await;

        let conn = db.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"reviews".to_string()));
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let db = create_test_db().await;
        db.save(&Review::new("a", "kept")).await.unwrap();

        db.create_schema().await.unwrap();
        assert_eq!(db.load_all().await.unwrap(), vec![Review::new("a", "kept")]);
    }

    #[tokio::test]
    async fn test_empty_table_loads_nothing() {
        let db = create_test_db().await;
        assert!(db.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_in_id_order() {
        let db = create_test_db().await;
        db.save(&Review::new("first", "1")).await.unwrap();
        db.save(&Review::new("second", "2")).await.unwrap();
        db.save(&Review::new("first", "1")).await.unwrap();

        let reviews = db.load_all().await.unwrap();
        assert_eq!(
            reviews,
            vec![
                Review::new("first", "1"),
                Review::new("second", "2"),
                Review::new("first", "1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let db = create_test_db().await;
        let first = db.save(&Review::new("a", "x")).await.unwrap();
        let second = db.save(&Review::new("b", "y")).await.unwrap();
        assert!(second > first);
    }

    // Rows written by other tools may hold NULLs; those are skipped
    #[tokio::test]
    async fn test_undecodable_rows_are_skipped() {
        let db = create_test_db().await;
        db.save(&Review::new("good", "before")).await.unwrap();
        {
            let conn = db.conn.lock().await;
            conn.execute("INSERT INTO reviews (name, review) VALUES (NULL, 'orphan')", [])
                .unwrap();
        }
        db.save(&Review::new("good", "after")).await.unwrap();

        let reviews = db.load_all().await.unwrap();
        assert_eq!(
            reviews,
            vec![Review::new("good", "before"), Review::new("good", "after")]
        );
    }

    #[tokio::test]
    async fn test_save_fails_without_table() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.save(&Review::new("a", "b")).await.is_err());
        assert!(db.load_all().await.is_err());
    }

    #[tokio::test]
    async fn test_file_created_and_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.db");
        assert!(!path.exists());

        {
            let db = Database::new(path.to_str().unwrap()).unwrap();
            db.create_schema().await.unwrap();
            db.save(&Review::new("persisted", "yes")).await.unwrap();
        }
        assert!(path.exists());

        let db = Database::new(path.to_str().unwrap()).unwrap();
        db.create_schema().await.unwrap();
        assert_eq!(
            db.load_all().await.unwrap(),
            vec![Review::new("persisted", "yes")]
        );
    }
}

/// SQLite mirror of the review list. Written on every accepted POST and
/// replayed once at startup.
#[derive(Debug)]
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    // Open (and create if missing) the database file
    pub fn new(db_path: &str) -> Result<Self, Error> {
        if db_path != ":memory:" && !Path::new(db_path).exists() {
            info!("Database file {} does not exist. Creating a new one.", db_path);
        }
        let conn = Connection::open(db_path)?;
        info!("Database connection established at: {}", db_path);
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // Create the reviews table if it is not there yet
    pub async fn create_schema(&self) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                review TEXT
            );",
        )
        .map_err(|e| {
            error!("Failed creating reviews table: {}", e);
            e
        })?;
        Ok(())
    }

    /// Every stored review in ascending id order.
    ///
    /// Rows whose columns do not decode as text are logged and skipped.
    pub async fn load_all(&self) -> Result<Vec<Review>, Error> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT name, review FROM reviews ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Review {
                name: row.get(0)?,
                review: row.get(1)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            match row {
                Ok(review) => result.push(review),
                Err(e) => warn!("Failed to decode stored review, skipping: {}", e),
            }
        }
        info!("Fetched {} reviews from the database", result.len());
        Ok(result)
    }

    // Insert one review, returning the row id SQLite assigned
    pub async fn save(&self, review: &Review) -> Result<i64, Error> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO reviews (name, review) VALUES (?, ?)",
            [&review.name, &review.review],
        )
        .map_err(|e| {
            error!("Failed to save review to the database: {}", e);
            e
        })?;
        Ok(conn.last_insert_rowid())
    }
}
