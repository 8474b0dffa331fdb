mod bid_repository;
mod task_repository;

pub use bid_repository::MongoBidRepository;
pub use task_repository::MongoTaskRepository;

use taskmarket_core::{MarketError, MarketResult};
use taskmarket_domain::entities::is_valid_object_id;

/// Identifiers are checked against the 24-hex object-id shape before any
/// query is issued.
pub(crate) fn require_valid_id(id: &str) -> MarketResult<()> {
    if is_valid_object_id(id) {
        Ok(())
    } else {
        Err(MarketError::invalid_id(id))
    }
}
