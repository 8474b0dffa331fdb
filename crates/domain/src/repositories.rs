//! Data access abstractions over the task and bid collections.

use async_trait::async_trait;

use crate::entities::{Bid, NewBid, NewTask, Task, TaskFilter, TaskUpdate};
use taskmarket_core::MarketResult;

/// Task collection access. Identifier arguments must match the 24-hex
/// object-id shape; implementations fail with `MarketError::InvalidId`
/// before touching the store otherwise.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &NewTask) -> MarketResult<Task>;
    async fn find_by_id(&self, id: &str) -> MarketResult<Option<Task>>;
    async fn list(&self, filter: &TaskFilter) -> MarketResult<Vec<Task>>;
    /// Merges the provided fields into the stored document and returns the
    /// post-update document, or `None` when no task has this id.
    async fn update(&self, id: &str, changes: &TaskUpdate) -> MarketResult<Option<Task>>;
    /// Returns whether a document was removed.
    async fn delete(&self, id: &str) -> MarketResult<bool>;
    /// Atomically adds 1 to the task's bids count and returns the updated
    /// document, or `None` when no task has this id.
    async fn increment_bids_count(&self, id: &str) -> MarketResult<Option<Task>>;
}

/// Bid collection access, scoped by task identifier.
#[async_trait]
pub trait BidRepository: Send + Sync {
    async fn create(&self, bid: &NewBid) -> MarketResult<Bid>;
    /// Empty result is not an error.
    async fn find_by_task(&self, task_id: &str) -> MarketResult<Vec<Bid>>;
    /// Removes every bid referencing the task and returns the removed
    /// count. Idempotent; zero matches is not an error.
    async fn delete_all_for_task(&self, task_id: &str) -> MarketResult<u64>;
}
