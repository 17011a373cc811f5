//! Storage for the cache folder.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! ├── topics.json    # seen-article state, one map per topic
//! └── log.txt        # append-only run and error log
//! ```

pub mod local;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TopicState;

// Re-export for convenience
pub use local::CacheStore;

/// On-disk envelope for the persisted topic state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// ISO 8601 timestamp of the last write
    pub updated_at: DateTime<Utc>,
    /// The per-topic seen-article mapping
    pub topics: TopicState,
}

impl StateFile {
    pub fn new(topics: TopicState) -> Self {
        Self {
            updated_at: Utc::now(),
            topics,
        }
    }
}
