use anyhow::{Context, Result};
use mongodb::options::ClientOptions;
use mongodb::{
    Client, Collection, Database as MongoDatabase,
    bson::{Document, doc, oid::ObjectId},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::CONFIG;
use crate::data_models::FlowerRecord;

/// Collection names as constants for consistency
pub mod collections {
    pub const FLOWERS: &str = "flowers";
}

/// Main database wrapper providing connection management and collection access
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    db: MongoDatabase,
}

impl Database {
    /// Create a new Database instance with custom URI and database name.
    /// Useful for testing with a different database.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        let client_options = ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        let client =
            Client::with_options(client_options).context("Failed to create MongoDB client")?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to connect to MongoDB")?;

        log::info!("Connected to MongoDB database: {}", db_name);

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Create a Database instance using environment configuration
    pub async fn from_config() -> Result<Self> {
        Self::new(&CONFIG.mongo_uri, &CONFIG.mongo_db_name).await
    }

    /// Get a typed collection by name
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(name)
    }

    /// Get the underlying MongoDB client (for advanced operations)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the underlying MongoDB database (for advanced operations)
    pub fn database(&self) -> &MongoDatabase {
        &self.db
    }

    /// Get the flowers collection
    pub fn flowers(&self) -> Collection<FlowerRecord> {
        self.collection(collections::FLOWERS)
    }

    /// Get a repository for FlowerRecord documents
    pub fn flowers_repo(&self) -> Repository<FlowerRecord> {
        Repository::new(self.flowers())
    }
}

// =============================================================================
// Generic CRUD operations
// =============================================================================

/// Thin typed wrapper over a collection with the operations this service needs.
pub struct Repository<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Insert a single document
    pub async fn insert(&self, doc: &T) -> Result<ObjectId> {
        let result = self
            .collection
            .insert_one(doc)
            .await
            .context("Failed to insert document")?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow::anyhow!("Failed to get inserted ObjectId"))
    }

    /// Insert multiple documents
    pub async fn insert_many(&self, docs: &[T]) -> Result<Vec<ObjectId>> {
        let result = self
            .collection
            .insert_many(docs)
            .await
            .context("Failed to insert documents")?;

        Ok(result
            .inserted_ids
            .values()
            .filter_map(|id| id.as_object_id())
            .collect())
    }

    /// Find a single document matching a filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.collection
            .find_one(filter)
            .await
            .context("Failed to find document")
    }
}

// =============================================================================
// Flower-specific operations
// =============================================================================

/// Extended operations specific to the flowers collection
pub struct FlowerRepo {
    repo: Repository<FlowerRecord>,
}

impl FlowerRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            repo: db.flowers_repo(),
        }
    }

    /// Insert a new flower record
    pub async fn insert(&self, flower: &FlowerRecord) -> Result<ObjectId> {
        self.repo.insert(flower).await
    }

    pub async fn insert_many(&self, flowers: &[FlowerRecord]) -> Result<Vec<ObjectId>> {
        self.repo.insert_many(flowers).await
    }

    /// Find the first record whose primary name or Korean alias equals `name`.
    /// Both keys are checked in one store operation; if a name exists in both
    /// key spaces across different records, whichever the store encounters
    /// first in natural order wins.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<FlowerRecord>> {
        self.repo
            .find_one(doc! {
                "$or": [
                    { "flowername": name },
                    { "flowername_kr": name },
                ]
            })
            .await
    }
}
