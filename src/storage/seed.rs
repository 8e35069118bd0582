//! One-time bulk seeding of the proverb store
//!
//! Loads a JSON array of proverb records into the repository when it is
//! empty at startup. Records without an explicit origin are classified by
//! the legacy "imported quote" marker in their meaning/category text.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{ContentItem, Origin};
use crate::storage::ProverbRepository;

/// A proverb record as it appears in seed files
///
/// Accepts both the current shape (with `origin`) and legacy exports where
/// the provenance only exists as free text. `proverb` is accepted as an
/// alias for `text`.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    #[serde(default)]
    language: String,
    #[serde(alias = "proverb")]
    text: String,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    origin: Option<Origin>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl SeedRecord {
    fn into_item(self) -> ContentItem {
        let origin = self.origin.unwrap_or_else(|| {
            Origin::from_legacy_marker(self.meaning.as_deref(), self.category.as_deref())
        });
        ContentItem {
            id: 0,
            language: self.language,
            text: self.text,
            translation: self.translation,
            meaning: self.meaning,
            author: self.author,
            category: self.category,
            origin,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Seed the repository from a JSON file if it holds no items yet
///
/// Returns the number of records loaded (0 when the store already has data).
/// Records with blank text are skipped with a warning rather than failing
/// the whole load.
pub async fn seed_if_empty(repo: &dyn ProverbRepository, path: &Path) -> Result<usize> {
    if repo.count()? > 0 {
        info!("store already contains data, skipping seeding");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let records: Vec<SeedRecord> = serde_json::from_str(&raw)?;

    let mut loaded = 0;
    for record in records {
        let item = record.into_item();
        if item.text.trim().is_empty() {
            warn!(language = %item.language, "skipping seed record with blank text");
            continue;
        }
        repo.save(&item)?;
        loaded += 1;
    }

    info!(count = loaded, path = %path.display(), "store seeded");
    Ok(loaded)
}
