//! JSON-file adapter for the line repository port.

use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{LineRepository, LineRepositoryError};

use super::json_collection::{JsonCollection, StoreError, map_store_error};

const COLLECTION: &str = "line";

/// Line repository persisting waiting users to `line.json`, head first.
#[derive(Debug, Clone)]
pub struct JsonLineRepository {
    collection: JsonCollection,
}

impl JsonLineRepository {
    /// Open the repository under `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> io::Result<Self> {
        Ok(Self {
            collection: JsonCollection::open(data_dir, COLLECTION)?,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        self.collection.path()
    }
}

fn map_error(err: StoreError) -> LineRepositoryError {
    map_store_error(
        err,
        LineRepositoryError::connection,
        LineRepositoryError::query,
        LineRepositoryError::serialization,
    )
}

#[async_trait]
impl LineRepository for JsonLineRepository {
    async fn load(&self) -> Result<Vec<User>, LineRepositoryError> {
        self.collection.load().await.map_err(map_error)
    }

    async fn replace(&self, entries: &[User]) -> Result<(), LineRepositoryError> {
        self.collection.replace(entries).await.map_err(map_error)
    }
}
