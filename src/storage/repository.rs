//! Repository pattern for proverb storage
//!
//! Trait-based abstraction decoupling the acquisition core from the storage
//! engine:
//! - `SqliteProverbRepository` for production (WAL mode, bundled SQLite)
//! - `MemoryProverbRepository` for tests and ephemeral runs
//!
//! The core never relies on atomicity across calls beyond a single-item save.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, RwLock};

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{ContentItem, Origin};

/// Repository for proverb/quote storage operations
pub trait ProverbRepository: Send + Sync {
    /// Fetch the full pool, ordered by id
    fn find_all(&self) -> Result<Vec<ContentItem>>;

    /// Fetch all items for a language (case-insensitive), ordered by id
    fn find_by_language(&self, language: &str) -> Result<Vec<ContentItem>>;

    /// Persist a new item, returning it with its assigned id
    fn save(&self, item: &ContentItem) -> Result<ContentItem>;

    /// Count stored items
    fn count(&self) -> Result<usize>;
}

// ============================================================================
// SQLite Implementation
// ============================================================================

/// SQLite implementation of [`ProverbRepository`]
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection.
pub struct SqliteProverbRepository {
    conn: Mutex<Connection>,
}

impl SqliteProverbRepository {
    /// Create a new SQLite repository
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite repository initialized");
        Ok(repo)
    }

    /// Create in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;
        Ok(repo)
    }

    /// Create database schema
    fn create_schema(&self) -> Result<()> {
        let conn = self.conn.lock().expect("repository lock poisoned");
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS proverb (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                language    TEXT NOT NULL,
                text        TEXT NOT NULL,
                translation TEXT,
                meaning     TEXT,
                author      TEXT,
                category    TEXT,
                origin      TEXT NOT NULL DEFAULT 'local',
                created_at  TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_proverb_language ON proverb(language);
            CREATE INDEX IF NOT EXISTS idx_proverb_origin ON proverb(origin);
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentItem> {
        let origin: String = row.get("origin")?;
        Ok(ContentItem {
            id: row.get("id")?,
            language: row.get("language")?,
            text: row.get("text")?,
            translation: row.get("translation")?,
            meaning: row.get("meaning")?,
            author: row.get("author")?,
            category: row.get("category")?,
            origin: Origin::parse(&origin).unwrap_or(Origin::Local),
            created_at: row.get("created_at")?,
        })
    }
}

impl ProverbRepository for SqliteProverbRepository {
    fn find_all(&self) -> Result<Vec<ContentItem>> {
        let conn = self.conn.lock().expect("repository lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, language, text, translation, meaning, author, category, origin, created_at
             FROM proverb ORDER BY id",
        )?;
        let items = stmt
            .query_map([], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn find_by_language(&self, language: &str) -> Result<Vec<ContentItem>> {
        let conn = self.conn.lock().expect("repository lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, language, text, translation, meaning, author, category, origin, created_at
             FROM proverb WHERE language = ?1 COLLATE NOCASE ORDER BY id",
        )?;
        let items = stmt
            .query_map([language], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn save(&self, item: &ContentItem) -> Result<ContentItem> {
        let conn = self.conn.lock().expect("repository lock poisoned");
        conn.execute(
            "INSERT INTO proverb (language, text, translation, meaning, author, category, origin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.language,
                item.text,
                item.translation,
                item.meaning,
                item.author,
                item.category,
                item.origin.as_str(),
                item.created_at,
            ],
        )?;

        let mut saved = item.clone();
        saved.id = conn.last_insert_rowid();
        Ok(saved)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("repository lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM proverb", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

// ============================================================================
// In-Memory Implementation
// ============================================================================

/// In-memory implementation of [`ProverbRepository`]
///
/// Backs tests and ephemeral runs; id assignment mirrors the SQLite
/// autoincrement behavior.
#[derive(Default)]
pub struct MemoryProverbRepository {
    items: RwLock<Vec<ContentItem>>,
    next_id: AtomicI64,
}

impl MemoryProverbRepository {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Pre-populated repository (test helper)
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        let repo = Self::new();
        for item in &items {
            // ids in fixture data are preserved when already set
            let mut stored = item.clone();
            if stored.id == 0 {
                stored.id = repo.next_id.fetch_add(1, Ordering::SeqCst);
            } else {
                repo.next_id
                    .fetch_max(stored.id + 1, Ordering::SeqCst);
            }
            repo.items
                .write()
                .expect("repository lock poisoned")
                .push(stored);
        }
        repo
    }
}

impl ProverbRepository for MemoryProverbRepository {
    fn find_all(&self) -> Result<Vec<ContentItem>> {
        let mut items = self.items.read().expect("repository lock poisoned").clone();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    fn find_by_language(&self, language: &str) -> Result<Vec<ContentItem>> {
        let mut items: Vec<_> = self
            .items
            .read()
            .expect("repository lock poisoned")
            .iter()
            .filter(|i| i.language.eq_ignore_ascii_case(language))
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    fn save(&self, item: &ContentItem) -> Result<ContentItem> {
        let mut saved = item.clone();
        saved.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.items
            .write()
            .expect("repository lock poisoned")
            .push(saved.clone());
        Ok(saved)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.items.read().expect("repository lock poisoned").len())
    }
}
