//! Cache-folder storage backend.
//!
//! Persists the topic state with write-then-rename so a crash mid-write
//! never truncates the previous state, and appends run/error lines to the
//! shared log file.

use std::path::PathBuf;

use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::TopicState;
use crate::storage::StateFile;

/// File name of the persisted state inside the cache folder.
const STATE_FILE: &str = "topics.json";
/// File name of the append-only run log inside the cache folder.
const LOG_FILE: &str = "log.txt";

/// Local filesystem store rooted at the cache folder.
#[derive(Clone)]
pub struct CacheStore {
    root_dir: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Create the cache folder and seed the state file if absent.
    ///
    /// Failure here is fatal and aborts the run before any topic is polled.
    pub async fn init(&self, topics: &[String]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;
        if !self.path(STATE_FILE).exists() {
            log::info!(
                "Creating new state file at {}",
                self.path(STATE_FILE).display()
            );
            self.save_state(&TopicState::with_topics(topics.iter().cloned()))
                .await?;
        }
        Ok(())
    }

    /// Load the persisted state, seeding one empty record per configured
    /// topic when no file exists yet.
    pub async fn load_state(&self, topics: &[String]) -> Result<TopicState> {
        match self.read_json::<StateFile>(STATE_FILE).await? {
            Some(file) => Ok(file.topics),
            None => Ok(TopicState::with_topics(topics.iter().cloned())),
        }
    }

    /// Persist the full state atomically.
    pub async fn save_state(&self, state: &TopicState) -> Result<()> {
        self.write_json(STATE_FILE, &StateFile::new(state.clone()))
            .await
    }

    /// Append the per-topic run line: timestamp, topic, new identifiers.
    pub async fn append_run_line(&self, topic: &str, new_ids: &[String]) -> Result<()> {
        let line = format!("{}\t{}\t{:?}\n", Local::now().to_rfc3339(), topic, new_ids);
        self.append(&line).await
    }

    /// Append an error event line with a timestamp.
    pub async fn append_error_line(&self, message: &str) -> Result<()> {
        let line = format!("ERROR {}\t{}\n", Local::now().to_rfc3339(), message);
        self.append(&line).await
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn append(&self, line: &str) -> Result<()> {
        let path = self.path(LOG_FILE);
        self.ensure_dir(&path).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;
    use tempfile::TempDir;

    fn topics(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn sample_article(pmid: &str) -> Article {
        Article {
            pmid: pmid.to_string(),
            title: Some("Title".to_string()),
            abstract_text: None,
            year: None,
            authors: vec!["Jane Doe".to_string()],
        }
    }

    #[tokio::test]
    async fn load_state_seeds_configured_topics_when_missing() {
        let tmp = TempDir::new().unwrap();
        let store = CacheStore::new(tmp.path());

        let state = store.load_state(&topics(&["RNAseq", "CRISPR"])).await.unwrap();
        assert_eq!(state.topic_count("RNAseq"), 0);
        assert_eq!(state.topic_count("CRISPR"), 0);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips_optional_fields() {
        let tmp = TempDir::new().unwrap();
        let store = CacheStore::new(tmp.path());

        let mut state = TopicState::new();
        state.record("RNAseq", sample_article("111"));
        store.save_state(&state).await.unwrap();

        let loaded = store.load_state(&topics(&["RNAseq"])).await.unwrap();
        assert_eq!(loaded, state);
        assert!(loaded.has_seen("RNAseq", "111"));
    }

    #[tokio::test]
    async fn save_state_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let store = CacheStore::new(tmp.path());

        store.save_state(&TopicState::new()).await.unwrap();
        assert!(tmp.path().join("topics.json").exists());
        assert!(!tmp.path().join("topics.tmp").exists());
    }

    #[tokio::test]
    async fn init_creates_folder_and_seeds_state() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");
        let store = CacheStore::new(&root);

        store.init(&topics(&["RNAseq"])).await.unwrap();
        assert!(root.join("topics.json").exists());

        // A second init must not clobber recorded state.
        let mut state = store.load_state(&topics(&["RNAseq"])).await.unwrap();
        state.record("RNAseq", sample_article("111"));
        store.save_state(&state).await.unwrap();

        store.init(&topics(&["RNAseq"])).await.unwrap();
        let reloaded = store.load_state(&topics(&["RNAseq"])).await.unwrap();
        assert!(reloaded.has_seen("RNAseq", "111"));
    }

    #[tokio::test]
    async fn run_and_error_lines_are_appended() {
        let tmp = TempDir::new().unwrap();
        let store = CacheStore::new(tmp.path());

        store
            .append_run_line("RNAseq", &["333".to_string()])
            .await
            .unwrap();
        store.append_run_line("RNAseq", &[]).await.unwrap();
        store.append_error_line("NCBI search failed").await.unwrap();

        let log = std::fs::read_to_string(tmp.path().join("log.txt")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\tRNAseq\t[\"333\"]"));
        assert!(lines[1].contains("\tRNAseq\t[]"));
        assert!(lines[2].starts_with("ERROR "));
        assert!(lines[2].contains("NCBI search failed"));
    }
}
