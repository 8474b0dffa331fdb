pub mod bids;
pub mod health;
pub mod tasks;
