//! Persisted per-topic article state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Article;

/// Mapping from topic name to the articles already seen for it.
///
/// An identifier recorded here was fetched and had a notification attempted;
/// it is never fetched or notified again for that topic. Entries are never
/// removed, so the state grows monotonically across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TopicState {
    topics: HashMap<String, HashMap<String, Article>>,
}

impl TopicState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with one empty record per topic.
    pub fn with_topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics
                .into_iter()
                .map(|topic| (topic.into(), HashMap::new()))
                .collect(),
        }
    }

    /// Make sure a record exists for the topic.
    pub fn ensure_topic(&mut self, topic: &str) {
        if !self.topics.contains_key(topic) {
            self.topics.insert(topic.to_string(), HashMap::new());
        }
    }

    /// Whether the identifier was already recorded for the topic.
    pub fn has_seen(&self, topic: &str, pmid: &str) -> bool {
        self.topics
            .get(topic)
            .is_some_and(|record| record.contains_key(pmid))
    }

    /// Record an article under its topic, keyed by PMID.
    pub fn record(&mut self, topic: &str, article: Article) {
        self.topics
            .entry(topic.to_string())
            .or_default()
            .insert(article.pmid.clone(), article);
    }

    /// Number of articles recorded for a topic.
    pub fn topic_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, HashMap::len)
    }

    /// Total number of recorded articles across all topics.
    pub fn total_count(&self) -> usize {
        self.topics.values().map(HashMap::len).sum()
    }

    /// Topic names currently present in the state.
    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}
