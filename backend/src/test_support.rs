//! Test utilities for the waitline crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests
//! or when the `test-support` feature is enabled.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls. These helpers give test suites
    //! the same `cap_std::fs::Dir` based access the persistence adapter uses.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waitline::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let path = std::env::temp_dir().join("waitline-cap-fs-example.json");
    /// write_file(&path, b"[]")?;
    /// assert_eq!(read_file_to_string(&path)?, "[]");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Names of the entries directly inside `path`.
    pub fn list_file_names(path: &Path) -> io::Result<Vec<String>> {
        let directory = Dir::open_ambient_dir(path, ambient_authority())?;
        let mut names = Vec::new();
        for entry in directory.entries()? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod memory {
    //! In-memory repository doubles.
    //!
    //! Each `load` yields to the scheduler before reading so concurrent
    //! callers genuinely interleave between their read and write.

    use std::sync::{Mutex, MutexGuard};

    use async_trait::async_trait;

    use crate::domain::User;
    use crate::domain::ports::{
        DirectoryRepository, DirectoryRepositoryError, LineRepository, LineRepositoryError,
    };

    fn lock(store: &Mutex<Vec<User>>) -> MutexGuard<'_, Vec<User>> {
        match store.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("in-memory store mutex poisoned"),
        }
    }

    /// Directory repository backed by a `Vec`.
    #[derive(Debug, Default)]
    pub struct InMemoryDirectoryRepository {
        records: Mutex<Vec<User>>,
    }

    impl InMemoryDirectoryRepository {
        pub fn with_records(records: Vec<User>) -> Self {
            Self {
                records: Mutex::new(records),
            }
        }

        pub fn snapshot(&self) -> Vec<User> {
            lock(&self.records).clone()
        }
    }

    #[async_trait]
    impl DirectoryRepository for InMemoryDirectoryRepository {
        async fn load(&self) -> Result<Vec<User>, DirectoryRepositoryError> {
            tokio::task::yield_now().await;
            Ok(self.snapshot())
        }

        async fn replace(&self, records: &[User]) -> Result<(), DirectoryRepositoryError> {
            *lock(&self.records) = records.to_vec();
            Ok(())
        }
    }

    /// Line repository backed by a `Vec`, head first.
    #[derive(Debug, Default)]
    pub struct InMemoryLineRepository {
        entries: Mutex<Vec<User>>,
    }

    impl InMemoryLineRepository {
        pub fn with_entries(entries: Vec<User>) -> Self {
            Self {
                entries: Mutex::new(entries),
            }
        }

        pub fn snapshot(&self) -> Vec<User> {
            lock(&self.entries).clone()
        }
    }

    #[async_trait]
    impl LineRepository for InMemoryLineRepository {
        async fn load(&self) -> Result<Vec<User>, LineRepositoryError> {
            tokio::task::yield_now().await;
            Ok(self.snapshot())
        }

        async fn replace(&self, entries: &[User]) -> Result<(), LineRepositoryError> {
            *lock(&self.entries) = entries.to_vec();
            Ok(())
        }
    }

    /// Line repository whose store is always unreachable.
    #[derive(Debug, Clone, Default)]
    pub struct UnavailableLineRepository {
        pub message: String,
    }

    #[async_trait]
    impl LineRepository for UnavailableLineRepository {
        async fn load(&self) -> Result<Vec<User>, LineRepositoryError> {
            Err(LineRepositoryError::connection(self.message.clone()))
        }

        async fn replace(&self, _entries: &[User]) -> Result<(), LineRepositoryError> {
            Err(LineRepositoryError::connection(self.message.clone()))
        }
    }
}

pub mod data_dir {
    //! Temporary data directories for exercising the JSON adapters.

    use std::io;
    use std::path::Path;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::outbound::persistence::{JsonDirectoryRepository, JsonLineRepository};

    /// A scratch data directory that is removed when dropped.
    pub struct TempDataDir {
        dir: TempDir,
    }

    impl TempDataDir {
        pub fn new() -> io::Result<Self> {
            Ok(Self {
                dir: tempfile::tempdir()?,
            })
        }

        pub fn path(&self) -> &Path {
            self.dir.path()
        }

        /// JSON-file repositories rooted in this directory.
        pub fn repositories(
            &self,
        ) -> io::Result<(Arc<JsonDirectoryRepository>, Arc<JsonLineRepository>)> {
            Ok((
                Arc::new(JsonDirectoryRepository::open(self.path())?),
                Arc::new(JsonLineRepository::open(self.path())?),
            ))
        }
    }
}
