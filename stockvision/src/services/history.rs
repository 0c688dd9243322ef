//! History service
//!
//! Newest-first collection of research results mirrored to storage on
//! every mutation. The full collection is written each time.

use crate::config::HISTORY_KEY;
use crate::error::{AppError, Result};
use crate::models::ResearchResult;
use crate::storage::KeyValueStore;

/// Write-through store of past research results
pub struct HistoryStore<S> {
    store: S,
    items: Vec<ResearchResult>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Load the collection from storage; an absent slot means empty history
    pub async fn load(store: S) -> Result<Self> {
        let items = match store.get(HISTORY_KEY).await? {
            Some(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Generic(format!("Failed to parse saved history: {}", e))
            })?,
            None => {
                tracing::debug!("No saved history found, starting empty");
                Vec::new()
            }
        };

        let history = Self { store, items };
        tracing::info!("Loaded {} saved research results", history.len());
        Ok(history)
    }

    pub fn items(&self) -> &[ResearchResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ResearchResult> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepend a freshly generated result.
    ///
    /// The timestamp is bumped past every saved one, so results created within
    /// the same millisecond still get distinct, increasing timestamps.
    pub async fn append(&mut self, mut result: ResearchResult) -> Result<&[ResearchResult]> {
        if self.get(&result.id).is_some() {
            return Err(AppError::InvalidInput(format!(
                "duplicate research result id: {}",
                result.id
            )));
        }

        if let Some(latest) = self.items.iter().map(|item| item.timestamp).max() {
            result.timestamp = result.timestamp.max(latest + 1);
        }

        let mut updated = Vec::with_capacity(self.items.len() + 1);
        updated.push(result);
        updated.extend(self.items.iter().cloned());

        self.commit(updated).await?;
        tracing::info!("Saved research result: {}", self.items[0].id);
        Ok(&self.items)
    }

    /// Flip the favorite flag; unknown ids leave the collection untouched
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<&[ResearchResult]> {
        let updated: Vec<ResearchResult> = self
            .items
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if item.id == id {
                    item.is_favorite = !item.is_favorite;
                }
                item
            })
            .collect();

        self.commit(updated).await?;
        tracing::debug!("Toggled favorite for: {}", id);
        Ok(&self.items)
    }

    /// Remove the matching record; deleting twice is a no-op
    pub async fn delete(&mut self, id: &str) -> Result<&[ResearchResult]> {
        let updated: Vec<ResearchResult> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();

        let removed = self.items.len() - updated.len();
        self.commit(updated).await?;
        tracing::info!("Deleted {} research result(s) with id {}", removed, id);
        Ok(&self.items)
    }

    /// Persist first, then swap in memory, so a failed write leaves both unchanged
    async fn commit(&mut self, updated: Vec<ResearchResult>) -> Result<()> {
        let content = serde_json::to_string(&updated)?;
        self.store.set(HISTORY_KEY, &content).await.map_err(|e| {
            tracing::error!("Failed to persist history: {}", e);
            e
        })?;
        self.items = updated;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ImageStyle, MarketType, Platform};
    use crate::storage::MemoryStore;

    pub(crate) fn sample_result(id: &str, topic: &str) -> ResearchResult {
        ResearchResult {
            id: id.to_string(),
            timestamp: 1_700_000_000_000,
            topic: topic.to_string(),
            platform: Platform::Shutterstock,
            market_type: MarketType::Evergreen,
            style: ImageStyle::Realistic,
            title: format!("{} title", topic),
            description: "Description".to_string(),
            keywords: vec!["one".to_string(), "two".to_string()],
            tags: vec!["tag".to_string()],
            theme: "Theme".to_string(),
            commercial_angle: "Angle".to_string(),
            buyer_intent: "Intent".to_string(),
            ai_prompt: "Prompt".to_string(),
            is_favorite: false,
        }
    }

    async fn create_test_history() -> (HistoryStore<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let history = HistoryStore::load(store.clone()).await.unwrap();
        (history, store)
    }

    #[tokio::test]
    async fn test_load_empty_when_slot_absent() {
        let (history, _store) = create_test_history().await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_append_prepends_and_grows_by_one() {
        let (mut history, _store) = create_test_history().await;

        for (i, topic) in ["a", "b", "c"].iter().enumerate() {
            let before = history.len();
            let items = history
                .append(sample_result(&format!("id-{}", i), topic))
                .await
                .unwrap();
            assert_eq!(items.len(), before + 1);
            assert_eq!(items[0].topic, *topic);
        }

        let topics: Vec<&str> = history.items().iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(topics, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_timestamps() {
        let (mut history, _store) = create_test_history().await;

        for i in 0..5 {
            history
                .append(sample_result(&format!("id-{}", i), "same millisecond"))
                .await
                .unwrap();
        }

        let timestamps: Vec<i64> = history.items().iter().map(|r| r.timestamp).collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(timestamps[4], 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_append_keeps_later_timestamp() {
        let (mut history, _store) = create_test_history().await;
        history.append(sample_result("old", "a")).await.unwrap();

        let mut newer = sample_result("new", "b");
        newer.timestamp = 1_800_000_000_000;
        history.append(newer).await.unwrap();

        assert_eq!(history.items()[0].timestamp, 1_800_000_000_000);
    }

    #[tokio::test]
    async fn test_append_rejects_duplicate_id() {
        let (mut history, _store) = create_test_history().await;

        history.append(sample_result("same", "a")).await.unwrap();
        let result = history.append(sample_result("same", "b")).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_favorite_twice_restores() {
        let (mut history, _store) = create_test_history().await;
        history.append(sample_result("x", "a")).await.unwrap();

        history.toggle_favorite("x").await.unwrap();
        assert!(history.get("x").unwrap().is_favorite);

        history.toggle_favorite("x").await.unwrap();
        assert!(!history.get("x").unwrap().is_favorite);
    }

    #[tokio::test]
    async fn test_toggle_favorite_absent_id_is_noop() {
        let (mut history, _store) = create_test_history().await;
        history.append(sample_result("x", "a")).await.unwrap();
        let before = history.items().to_vec();

        history.toggle_favorite("missing").await.unwrap();

        assert_eq!(history.items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_and_is_idempotent() {
        let (mut history, _store) = create_test_history().await;
        history.append(sample_result("x", "a")).await.unwrap();
        history.append(sample_result("y", "b")).await.unwrap();

        history.delete("x").await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.get("x").is_none());
        assert!(history.get("y").is_some());

        history.delete("x").await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_are_written_through() {
        let (mut history, store) = create_test_history().await;
        history.append(sample_result("x", "a")).await.unwrap();
        history.toggle_favorite("x").await.unwrap();

        let reloaded = HistoryStore::load(store).await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get("x").unwrap().is_favorite);
    }

    #[tokio::test]
    async fn test_failed_write_propagates_and_keeps_memory() {
        let (mut history, store) = create_test_history().await;
        history.append(sample_result("x", "a")).await.unwrap();

        store.set_fail_writes(true);
        let result = history.append(sample_result("y", "b")).await;

        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_history_fails_to_load() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "not json").await.unwrap();

        let result = HistoryStore::load(store).await;
        assert!(matches!(result, Err(AppError::Generic(_))));
    }
}
