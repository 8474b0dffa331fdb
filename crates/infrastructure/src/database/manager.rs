use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::{info, warn};

use crate::database::mongo::{MongoBidRepository, MongoTaskRepository};
use taskmarket_core::config::DatabaseConfig;
use taskmarket_core::MarketResult;
use taskmarket_domain::repositories::{BidRepository, TaskRepository};

/// Process-lifecycle handle for the document store. Construction performs
/// the bounded connect-with-retry; once a `MongoManager` exists the
/// connection has been verified by a ping.
pub struct MongoManager {
    database: Database,
}

impl MongoManager {
    /// Connects with a fixed attempt count and a fixed delay between
    /// attempts. Exhausting the attempts returns the last error; callers
    /// are expected to terminate the process on failure.
    pub async fn connect(config: &DatabaseConfig) -> MarketResult<Self> {
        let mut attempt = 1u32;
        loop {
            match Self::try_connect(config).await {
                Ok(database) => {
                    info!(
                        database = %config.database,
                        attempt,
                        "connected to MongoDB"
                    );
                    return Ok(Self { database });
                }
                Err(e) if attempt < config.connect_attempts => {
                    warn!(
                        attempt,
                        max_attempts = config.connect_attempts,
                        error = %e,
                        "MongoDB connection failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(config.connect_retry_delay_seconds))
                        .await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_connect(config: &DatabaseConfig) -> MarketResult<Database> {
        let client = Client::with_uri_str(&config.url).await?;
        let database = client.database(&config.database);
        // The client connects lazily; ping so a bad URL fails here.
        database.run_command(doc! { "ping": 1 }).await?;
        Ok(database)
    }

    pub async fn ping(&self) -> MarketResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn task_repository(&self) -> Arc<dyn TaskRepository> {
        Arc::new(MongoTaskRepository::new(self.database.clone()))
    }

    pub fn bid_repository(&self) -> Arc<dyn BidRepository> {
        Arc::new(MongoBidRepository::new(self.database.clone()))
    }
}
