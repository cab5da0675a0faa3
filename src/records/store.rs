//! The record store contract.

use crate::error::Result;
use crate::types::{Achievement, AchievementId, AchievementInput};
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous access to the achievement collection.
///
/// Implementations must make every completed mutation visible to subsequent
/// `list` calls on the same store. Operations are not cancellable and two
/// overlapping `update`s of the same record resolve last-write-wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Current collection, newest-created first.
    async fn list(&self) -> Result<Vec<Achievement>>;

    /// Assign a fresh id and insert at the front of the collection.
    async fn create(&self, input: AchievementInput) -> Result<Achievement>;

    /// Replace the record with the same id.
    ///
    /// Fails with `StoreError::NotFound` when no record has that id.
    async fn update(&self, achievement: Achievement) -> Result<Achievement>;

    /// Remove a record. Removing an absent id is a no-op.
    async fn delete(&self, id: &AchievementId) -> Result<()>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn list(&self) -> Result<Vec<Achievement>> {
        (**self).list().await
    }

    async fn create(&self, input: AchievementInput) -> Result<Achievement> {
        (**self).create(input).await
    }

    async fn update(&self, achievement: Achievement) -> Result<Achievement> {
        (**self).update(achievement).await
    }

    async fn delete(&self, id: &AchievementId) -> Result<()> {
        (**self).delete(id).await
    }
}
