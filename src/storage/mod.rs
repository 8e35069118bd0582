//! Persistence boundary for proverbs and imported quotes
//!
//! The core only reads full pools and writes single items; everything else
//! about storage (schema, indexing, transactions) stays behind the
//! [`ProverbRepository`] trait.

pub mod repository;
pub mod seed;

pub use repository::{MemoryProverbRepository, ProverbRepository, SqliteProverbRepository};
pub use seed::seed_if_empty;
