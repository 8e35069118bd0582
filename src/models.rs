// Core data structures for the proverbly agent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quote as normalized from any content tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

impl Quote {
    /// Create a quote, trimming surrounding whitespace
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into().trim().to_string(),
            author: author.into().trim().to_string(),
        }
    }

    /// A quote is usable only when its content is non-blank
    pub fn is_valid(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" — {}", self.content, self.author)
    }
}

/// Where a stored item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Seeded or user-added local proverb
    Local,
    /// Pulled from a remote quote tier
    Imported,
}

impl Origin {
    /// Get string representation (stored in the database)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Imported => "imported",
        }
    }

    /// Parse from the stored representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "local" => Some(Self::Local),
            "imported" => Some(Self::Imported),
            _ => None,
        }
    }

    /// Classify a legacy free-text marker ("imported quote" substring,
    /// case-insensitive) as used by old seed files.
    pub fn from_legacy_marker(meaning: Option<&str>, category: Option<&str>) -> Self {
        let marked = |s: Option<&str>| {
            s.map(|v| v.to_lowercase().contains("imported quote"))
                .unwrap_or(false)
        };
        if marked(meaning) || marked(category) {
            Self::Imported
        } else {
            Self::Local
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored proverb or imported quote
///
/// `id` is assigned by the store on save; records built in memory carry
/// `id = 0` until persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub language: String,
    pub text: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_origin")]
    pub origin: Origin,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_origin() -> Origin {
    Origin::Local
}

impl ContentItem {
    /// Build an imported item from a fetched quote and its provenance tag
    pub fn from_quote(quote: &Quote, provenance: &str) -> Self {
        Self {
            id: 0,
            language: "English".to_string(),
            text: quote.content.clone(),
            translation: None,
            meaning: None,
            author: Some(quote.author.clone()),
            category: Some(format!("{provenance} quote")),
            origin: Origin::Imported,
            created_at: Utc::now(),
        }
    }

    pub fn is_imported(&self) -> bool {
        self.origin == Origin::Imported
    }
}

impl Default for ContentItem {
    fn default() -> Self {
        Self {
            id: 0,
            language: String::new(),
            text: String::new(),
            translation: None,
            meaning: None,
            author: None,
            category: None,
            origin: Origin::Local,
            created_at: Utc::now(),
        }
    }
}

/// Digest session of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestSession {
    Morning,
    Afternoon,
    Evening,
}

impl DigestSession {
    /// Get string representation (also the no-repeat selection key)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "MORNING",
            Self::Afternoon => "AFTERNOON",
            Self::Evening => "EVENING",
        }
    }

    /// Create from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MORNING" => Some(Self::Morning),
            "AFTERNOON" => Some(Self::Afternoon),
            "EVENING" => Some(Self::Evening),
            _ => None,
        }
    }

    /// All sessions in firing order
    pub fn all() -> [Self; 3] {
        [Self::Morning, Self::Afternoon, Self::Evening]
    }

    /// Message header, which also reflects the selected item's origin
    pub fn header(&self, imported: bool) -> &'static str {
        match (self, imported) {
            (Self::Morning, true) => "Morning Inspiration Quote",
            (Self::Morning, false) => "Morning Wisdom",
            (Self::Afternoon, true) => "Afternoon Inspiration",
            (Self::Afternoon, false) => "Afternoon Proverb",
            (Self::Evening, true) => "Evening Global Reflection",
            (Self::Evening, false) => "Evening Local Reflection",
        }
    }
}

impl std::fmt::Display for DigestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
