pub mod database;

pub use database::manager::MongoManager;
pub use database::mongo::{MongoBidRepository, MongoTaskRepository};
