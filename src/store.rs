use anyhow::{Context, Result};
use tokio_rusqlite::Connection;

use crate::models::Item;

const CREATE_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

const SELECT_ITEMS: &str = "SELECT id, name FROM items";
const INSERT_ITEM: &str = "INSERT INTO items (name) VALUES (?1)";
const UPDATE_ITEM: &str = "UPDATE items SET name = ?1 WHERE id = ?2";

/// Shareable SQLite handle for use across async handlers
///
/// Cloning is cheap: every clone talks to the same background connection
/// thread, so the whole process works against a single storage handle.
#[derive(Clone)]
pub struct ItemStore {
    conn: Connection,
}

impl ItemStore {
    /// Open (or create) the database file at `path` and bootstrap the schema
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema statement fails.
    /// Callers treat this as fatal.
    pub async fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .with_context(|| format!("Failed to open database at {}", path))?;

        let store = Self { conn };
        store.bootstrap().await?;

        tracing::info!("Opened item database: {}", path);
        Ok(store)
    }

    /// Open a private in-memory database with the schema applied
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { conn };
        store.bootstrap().await?;
        Ok(store)
    }

    /// Run raw SQL against the connection, bypassing the typed operations
    #[cfg(test)]
    pub async fn execute_batch(&self, sql: &'static str) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute_batch(sql)?;
                Ok(())
            })
            .await
            .context("Failed to execute raw SQL")?;
        Ok(())
    }

    async fn bootstrap(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(CREATE_ITEMS_TABLE)?;
                Ok(())
            })
            .await
            .context("Failed to create items table")?;

        tracing::debug!("Schema bootstrap complete");
        Ok(())
    }

    /// Read every item in storage order
    ///
    /// Rows are materialized inside the connection thread; a failure on any
    /// row discards the rows already read.
    pub async fn list_items(&self) -> Result<Vec<Item>> {
        let items = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(SELECT_ITEMS)?;
                let rows = stmt.query_map([], |row| {
                    Ok(Item {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?;

                let mut items = Vec::new();
                for row in rows {
                    items.push(row?);
                }
                Ok(items)
            })
            .await
            .context("Failed to list items")?;

        tracing::debug!("Listed {} items", items.len());
        Ok(items)
    }

    /// Insert a new item and return the identifier SQLite assigned to it
    ///
    /// The identifier comes from `last_insert_rowid`, which reports 0 when no
    /// row id is available. That value is passed through as-is.
    ///
    /// # Errors
    /// Returns an error if the insert statement fails
    pub async fn insert_item(&self, name: String) -> Result<i64> {
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(INSERT_ITEM, rusqlite::params![name])?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .context("Failed to insert item")?;

        tracing::debug!("Inserted item with id: {}", id);
        Ok(id)
    }

    /// Set the name of the item with the given id
    ///
    /// Returns the number of rows affected. A missing id is not an error and
    /// yields 0.
    pub async fn update_item(&self, id: i64, name: String) -> Result<usize> {
        let affected = self
            .conn
            .call(move |conn| Ok(conn.execute(UPDATE_ITEM, rusqlite::params![name, id])?))
            .await
            .context("Failed to update item")?;

        tracing::debug!("Updated item {} ({} rows affected)", id, affected);
        Ok(affected)
    }

    /// Perform a health check by executing `SELECT 1`
    pub async fn health_check(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
                Ok(one)
            })
            .await
            .context("Failed to execute health check query")?;

        tracing::debug!("Health check query succeeded");
        Ok(())
    }

    /// Close the underlying connection
    ///
    /// Any clone still held elsewhere will fail its next call afterwards.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .context("Failed to close database connection")?;

        tracing::info!("Closed item database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("item-service-{}.db", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_store_is_clonable() {
        // Required for sharing across Axum handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<ItemStore>();
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ItemStore>();
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let store = ItemStore::open_in_memory().await.unwrap();

        let items = store.list_items().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = ItemStore::open_in_memory().await.unwrap();

        let first = store.insert_item("pen".to_string()).await.unwrap();
        let second = store.insert_item("paper".to_string()).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let items = store.list_items().await.unwrap();
        assert_eq!(
            items,
            vec![
                Item { id: 1, name: "pen".to_string() },
                Item { id: 2, name: "paper".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_accepts_empty_name() {
        let store = ItemStore::open_in_memory().await.unwrap();

        let id = store.insert_item(String::new()).await.unwrap();

        let items = store.list_items().await.unwrap();
        assert_eq!(items, vec![Item { id, name: String::new() }]);
    }

    #[tokio::test]
    async fn test_list_items_unreadable_row_fails_whole_list() {
        let store = ItemStore::open_in_memory().await.unwrap();
        store.insert_item("readable".to_string()).await.unwrap();
        // A blob in the TEXT column cannot be read back as a String
        store
            .execute_batch("INSERT INTO items (name) VALUES (X'FF')")
            .await
            .unwrap();
        store.insert_item("also readable".to_string()).await.unwrap();

        let result = store.list_items().await;

        let error = result.expect_err("an unreadable row must fail the whole list");
        assert!(error.to_string().contains("Failed to list items"));
    }

    #[tokio::test]
    async fn test_update_existing_item() {
        let store = ItemStore::open_in_memory().await.unwrap();
        let id = store.insert_item("pen".to_string()).await.unwrap();

        let affected = store.update_item(id, "pencil".to_string()).await.unwrap();
        assert_eq!(affected, 1);

        let items = store.list_items().await.unwrap();
        assert_eq!(items, vec![Item { id, name: "pencil".to_string() }]);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_noop() {
        let store = ItemStore::open_in_memory().await.unwrap();

        let affected = store.update_item(99999, "ghost".to_string()).await.unwrap();
        assert_eq!(affected, 0);
        assert!(store.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_restart() {
        let path = temp_db_path();
        let path_str = path.to_str().unwrap();

        let store = ItemStore::open(path_str).await.unwrap();
        store.insert_item("first".to_string()).await.unwrap();
        store.close().await.unwrap();

        let store = ItemStore::open(path_str).await.unwrap();
        let id = store.insert_item("second".to_string()).await.unwrap();
        assert_eq!(id, 2);
        store.close().await.unwrap();

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_bootstrap_idempotent() {
        // Reopening an existing file must keep both the schema and the data
        let path = temp_db_path();
        let path_str = path.to_str().unwrap();

        let store = ItemStore::open(path_str).await.unwrap();
        store.insert_item("kept".to_string()).await.unwrap();
        store.close().await.unwrap();

        let store = ItemStore::open(path_str).await.unwrap();
        let items = store.list_items().await.unwrap();
        assert_eq!(items, vec![Item { id: 1, name: "kept".to_string() }]);
        store.close().await.unwrap();

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_open_fails_for_unreachable_path() {
        let path = std::env::temp_dir()
            .join(uuid::Uuid::new_v4().to_string())
            .join("missing-dir")
            .join("data.db");

        let result = ItemStore::open(path.to_str().unwrap()).await;

        let error = result.err().expect("opening under a missing directory should fail");
        assert!(error.to_string().contains("Failed to open database"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = ItemStore::open_in_memory().await.unwrap();
        assert!(store.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_calls_fail_after_close() {
        let store = ItemStore::open_in_memory().await.unwrap();
        let handle = store.clone();

        store.close().await.unwrap();

        assert!(handle.list_items().await.is_err());
        assert!(handle.health_check().await.is_err());
    }
}
