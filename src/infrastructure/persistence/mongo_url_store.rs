//! MongoDB implementation of the URL store.

use async_trait::async_trait;
use mongodb::bson::{DateTime, doc};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{AliasReuse, StoreError, UrlStore};

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Stored document shape.
#[derive(Debug, Serialize, Deserialize)]
struct UrlDocument {
    alias: String,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted_at: Option<DateTime>,
}

/// URL store backed by a MongoDB collection.
///
/// A unique index on `alias` is created at connect time; duplicate inserts
/// are rejected by the server and reported as [`StoreError::AliasConflict`].
pub struct MongoUrlStore {
    client: Client,
    collection: Collection<UrlDocument>,
    reuse: AliasReuse,
}

impl MongoUrlStore {
    /// Connects, selects the collection and ensures the unique alias index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the server cannot be reached.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        reuse: AliasReuse,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await.map_err(map_mongo_error)?;
        let collection = client
            .database(database)
            .collection::<UrlDocument>(collection);

        let index = IndexModel::builder()
            .keys(doc! { "alias": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection
            .create_index(index)
            .await
            .map_err(map_mongo_error)?;

        info!(
            "✓ Connected to MongoDB collection {}.{} ({:?} alias reuse)",
            database,
            collection.name(),
            reuse
        );

        Ok(Self {
            client,
            collection,
            reuse,
        })
    }
}

#[async_trait]
impl UrlStore for MongoUrlStore {
    async fn save(&self, record: &UrlRecord) -> Result<(), StoreError> {
        let document = UrlDocument {
            alias: record.alias.clone(),
            url: record.target.clone(),
            deleted_at: None,
        };

        self.collection
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;

        debug!("Stored {} -> {}", record.alias, record.target);
        Ok(())
    }

    async fn get(&self, alias: &str) -> Result<String, StoreError> {
        self.collection
            .find_one(doc! { "alias": alias, "deleted_at": null })
            .await
            .map_err(map_mongo_error)?
            .map(|document| document.url)
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<(), StoreError> {
        let filter = doc! { "alias": alias, "deleted_at": null };

        let affected = match self.reuse {
            AliasReuse::Allow => {
                self.collection
                    .delete_one(filter)
                    .await
                    .map_err(map_mongo_error)?
                    .deleted_count
            }
            AliasReuse::Retire => {
                self.collection
                    .update_one(filter, doc! { "$set": { "deleted_at": DateTime::now() } })
                    .await
                    .map_err(map_mongo_error)?
                    .matched_count
            }
        };

        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!("MongoDB ping failed: {}", e);
                false
            }
        }
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

fn map_mongo_error(e: MongoError) -> StoreError {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY =>
        {
            StoreError::AliasConflict
        }
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Unavailable(e.to_string()),
        _ => StoreError::Internal(e.to_string()),
    }
}
