//! JSON-file adapter for the directory repository port.

use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{DirectoryRepository, DirectoryRepositoryError};

use super::json_collection::{JsonCollection, map_store_error};

const COLLECTION: &str = "users";

/// Directory repository persisting registered users to `users.json`.
#[derive(Debug, Clone)]
pub struct JsonDirectoryRepository {
    collection: JsonCollection,
}

impl JsonDirectoryRepository {
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

#[async_trait]
impl DirectoryRepository for JsonDirectoryRepository {
    async fn load(&self) -> Result<Vec<User>, DirectoryRepositoryError> {
        self.collection.load().await.map_err(|err| {
            map_store_error(
                err,
                DirectoryRepositoryError::connection,
                DirectoryRepositoryError::query,
                DirectoryRepositoryError::serialization,
            )
        })
    }

    async fn replace(&self, records: &[User]) -> Result<(), DirectoryRepositoryError> {
        self.collection.replace(records).await.map_err(|err| {
            map_store_error(
                err,
                DirectoryRepositoryError::connection,
                DirectoryRepositoryError::query,
                DirectoryRepositoryError::serialization,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cap_fs::write_file;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn registrations_survive_reopening() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let ana = User::try_from_strings("a", "Ana", "ana@x.com", "F").expect("valid user");

        JsonDirectoryRepository::open(data_dir.path())
            .expect("open")
            .replace(std::slice::from_ref(&ana))
            .await
            .expect("write");
        let reopened = JsonDirectoryRepository::open(data_dir.path()).expect("reopen");

        assert_eq!(reopened.load().await, Ok(vec![ana]));
        assert!(reopened.path().ends_with("users.json"));
    }

    #[rstest]
    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        write_file(&data_dir.path().join("users.json"), b"{").expect("seed");
        let repo = JsonDirectoryRepository::open(data_dir.path()).expect("open");

        let err = repo.load().await.expect_err("corrupt");

        assert!(matches!(err, DirectoryRepositoryError::Serialization { .. }));
    }
}
