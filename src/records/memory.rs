//! In-memory record store with simulated latency.

use crate::error::{Result, StoreError};
use crate::records::RecordStore;
use crate::seed::seed_achievements;
use crate::types::{Achievement, AchievementId, AchievementInput};
use crate::validation::validate_input;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Initial contents of a [`MemoryStore`].
#[derive(Clone, Debug, Default)]
pub enum Seed {
    /// The built-in portfolio dataset.
    #[default]
    Default,
    Empty,
    Records(Vec<Achievement>),
}

impl Seed {
    fn records(&self) -> Vec<Achievement> {
        match self {
            Seed::Default => seed_achievements(),
            Seed::Empty => Vec::new(),
            Seed::Records(records) => records.clone(),
        }
    }
}

/// Memory store configuration.
#[derive(Clone, Debug)]
pub struct MemoryStoreConfig {
    /// Delay before `list` completes.
    pub list_latency: Duration,

    /// Delay before `create`, `update` and `delete` complete.
    pub mutation_latency: Duration,

    /// Records present on first load and after `reset`.
    pub seed: Seed,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            list_latency: Duration::from_millis(500),
            mutation_latency: Duration::from_millis(300),
            seed: Seed::Default,
        }
    }
}

impl MemoryStoreConfig {
    /// No simulated latency.
    pub fn instant() -> Self {
        Self {
            list_latency: Duration::ZERO,
            mutation_latency: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }
}

/// Process-local achievement collection.
///
/// Nothing survives the process; `reset` restores the seed the way a page
/// reload would. The lock is never held across a suspension point.
pub struct MemoryStore {
    config: MemoryStoreConfig,

    /// Records, newest-created first.
    items: RwLock<Vec<Achievement>>,

    /// Disambiguates ids created within the same millisecond.
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new(config: MemoryStoreConfig) -> Self {
        let items = config.seed.records();
        Self {
            config,
            items: RwLock::new(items),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seeded store with no simulated latency.
    pub fn instant() -> Self {
        Self::new(MemoryStoreConfig::instant())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Discard all mutations and restore the seed.
    pub fn reset(&self) {
        *self.items.write() = self.config.seed.records();
        debug!("memory store reset to seed");
    }

    fn fresh_id(&self, items: &[Achievement]) -> AchievementId {
        loop {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            let id = AchievementId(format!(
                "achievement-{}-{}",
                Utc::now().timestamp_millis(),
                n
            ));
            if !items.iter().any(|a| a.id == id) {
                return id;
            }
        }
    }

    async fn simulate(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(MemoryStoreConfig::default())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Achievement>> {
        self.simulate(self.config.list_latency).await;
        let items = self.items.read().clone();
        debug!(count = items.len(), "listed achievements");
        Ok(items)
    }

    async fn create(&self, input: AchievementInput) -> Result<Achievement> {
        self.simulate(self.config.mutation_latency).await;
        validate_input(&input)?;

        let mut items = self.items.write();
        let achievement = Achievement::from_input(self.fresh_id(&items), input);
        items.insert(0, achievement.clone());

        info!(id = %achievement.id, "created achievement");
        Ok(achievement)
    }

    async fn update(&self, achievement: Achievement) -> Result<Achievement> {
        self.simulate(self.config.mutation_latency).await;
        validate_input(&achievement.to_input())?;

        let mut items = self.items.write();
        let slot = items
            .iter_mut()
            .find(|a| a.id == achievement.id)
            .ok_or_else(|| StoreError::NotFound(achievement.id.clone()))?;
        *slot = achievement.clone();

        info!(id = %achievement.id, "updated achievement");
        Ok(achievement)
    }

    async fn delete(&self, id: &AchievementId) -> Result<()> {
        self.simulate(self.config.mutation_latency).await;

        let mut items = self.items.write();
        let before = items.len();
        items.retain(|a| &a.id != id);

        if items.len() < before {
            info!(%id, "deleted achievement");
        } else {
            debug!(%id, "delete of absent achievement ignored");
        }
        Ok(())
    }
}
