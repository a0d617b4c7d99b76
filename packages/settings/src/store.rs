// ABOUTME: Application state container holding the current frontend settings snapshot
// ABOUTME: Readers always see a whole snapshot; commits replace it in one step

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::types::FrontendSettings;

/// State container the updater reads from and commits to
#[async_trait]
pub trait SettingsState: Send + Sync {
    /// Current snapshot
    async fn snapshot(&self) -> FrontendSettings;

    /// Replace the current snapshot
    async fn commit(&self, settings: FrontendSettings);
}

/// In-memory settings state, owned by whoever builds the updater
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<FrontendSettings>,
    revision: AtomicU64,
}

impl SettingsStore {
    pub fn new(settings: FrontendSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
            revision: AtomicU64::new(0),
        }
    }

    /// Number of commits applied since construction
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(FrontendSettings::default())
    }
}

#[async_trait]
impl SettingsState for SettingsStore {
    async fn snapshot(&self) -> FrontendSettings {
        self.settings.read().await.clone()
    }

    async fn commit(&self, settings: FrontendSettings) {
        let mut guard = self.settings.write().await;
        *guard = settings;
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(revision, "Committed settings snapshot");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timeframe;
    use std::sync::Arc;

    #[test]
    fn test_store_starts_from_defaults() {
        let store = SettingsStore::default();
        let snapshot = tokio_test::block_on(store.snapshot());
        assert_eq!(snapshot, FrontendSettings::default());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_store_starts_from_given_snapshot() {
        let initial = FrontendSettings {
            query_period: 60,
            ..FrontendSettings::default()
        };
        let store = SettingsStore::new(initial.clone());
        assert_eq!(tokio_test::block_on(store.snapshot()), initial);
    }

    #[tokio::test]
    async fn test_commit_replaces_snapshot() {
        let store = SettingsStore::default();
        let next = FrontendSettings {
            defi_setup_done: true,
            last_known_timeframe: Timeframe::Week,
            ..FrontendSettings::default()
        };

        store.commit(next.clone()).await;

        assert_eq!(store.snapshot().await, next);
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test]
    async fn test_last_commit_wins() {
        let store = Arc::new(SettingsStore::default());
        let first = FrontendSettings {
            query_period: 10,
            ..FrontendSettings::default()
        };
        let second = FrontendSettings {
            query_period: 20,
            ..FrontendSettings::default()
        };

        store.commit(first).await;
        store.commit(second.clone()).await;

        assert_eq!(store.snapshot().await, second);
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_readers_see_whole_snapshots() {
        let store = Arc::new(SettingsStore::default());
        let candidates = [
            FrontendSettings::default(),
            FrontendSettings {
                defi_setup_done: true,
                query_period: 600,
                ..FrontendSettings::default()
            },
        ];

        let writer = {
            let store = Arc::clone(&store);
            let next = candidates[1].clone();
            tokio::spawn(async move { store.commit(next).await })
        };
        let reader = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.snapshot().await })
        };

        writer.await.unwrap();
        let seen = reader.await.unwrap();
        assert!(candidates.contains(&seen));
    }
}
