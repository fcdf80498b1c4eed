//! Whole-collection JSON snapshot files.
//!
//! A collection is a JSON array of user records stored in a single file
//! inside the data directory. Reads decode the whole array; writes stage the
//! new array in a hidden temporary file and rename it over the target, so
//! readers only ever observe a complete snapshot. All filesystem access goes
//! through a `cap_std` directory handle and runs on the blocking pool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::User;

/// Failures raised while reading or writing a collection file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum StoreError {
    /// The data directory or file could not be reached.
    #[error("{path}: {message}")]
    Unavailable { path: String, message: String },
    /// Any other I/O failure.
    #[error("{path}: {message}")]
    Io { path: String, message: String },
    /// The file content is not a JSON array of users.
    #[error("{path}: {message}")]
    Decode { path: String, message: String },
}

/// Translate a store failure into a port error through its constructors.
pub(crate) fn map_store_error<E, C, Q, S>(
    error: StoreError,
    connection: C,
    query: Q,
    serialization: S,
) -> E
where
    C: FnOnce(String) -> E,
    Q: FnOnce(String) -> E,
    S: FnOnce(String) -> E,
{
    let message = error.to_string();
    match error {
        StoreError::Unavailable { .. } => connection(message),
        StoreError::Io { .. } => query(message),
        StoreError::Decode { .. } => serialization(message),
    }
}

/// One collection file inside the data directory.
#[derive(Debug, Clone)]
pub(crate) struct JsonCollection {
    dir: Arc<Dir>,
    name: &'static str,
    path: PathBuf,
}

impl JsonCollection {
    /// Open the collection `name` (stored as `<name>.json`) under
    /// `data_dir`, creating the directory when missing.
    pub(crate) fn open(data_dir: &Path, name: &'static str) -> io::Result<Self> {
        Dir::create_ambient_dir_all(data_dir, ambient_authority())?;
        let dir = Dir::open_ambient_dir(data_dir, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            name,
            path: data_dir.join(Self::file_name_for(name)),
        })
    }

    fn file_name_for(name: &str) -> String {
        format!("{name}.json")
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A file that does not exist yet is empty.
    pub(crate) async fn load(&self) -> Result<Vec<User>, StoreError> {
        let dir = Arc::clone(&self.dir);
        let file_name = Self::file_name_for(self.name);
        let contents = self
            .blocking(move || match dir.read_to_string(&file_name) {
                Ok(contents) => Ok(Some(contents)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err),
            })
            .await?;

        let Some(contents) = contents else {
            debug!(path = %self.path.display(), "collection file absent; treating as empty");
            return Ok(Vec::new());
        };
        serde_json::from_str(&contents).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "collection file is not valid");
            StoreError::Decode {
                path: self.path.display().to_string(),
                message: err.to_string(),
            }
        })
    }

    /// Atomically replace the file with `records`.
    pub(crate) async fn replace(&self, records: &[User]) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(records).map_err(|err| StoreError::Decode {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })?;
        let dir = Arc::clone(&self.dir);
        let target = Self::file_name_for(self.name);
        let staged = format!(".tmp-{}-{}.json", self.name, Uuid::new_v4());

        self.blocking(move || write_atomic(&dir, &staged, &target, &contents))
            .await?;
        debug!(path = %self.path.display(), count = records.len(), "collection written");
        Ok(())
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce() -> io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.display().to_string();
        let outcome = tokio::task::spawn_blocking(op).await.map_err(|err| StoreError::Io {
            path: path.clone(),
            message: format!("blocking task failed: {err}"),
        })?;
        outcome.map_err(|err| {
            warn!(path = %path, error = %err, "collection file I/O failed");
            classify_io_error(path, &err)
        })
    }
}

fn classify_io_error(path: String, err: &io::Error) -> StoreError {
    let message = err.to_string();
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            StoreError::Unavailable { path, message }
        }
        _ => StoreError::Io { path, message },
    }
}

fn write_atomic(dir: &Dir, staged: &str, target: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(staged, &options)?;

    let written = file.write_all(contents).and_then(|()| file.sync_all());
    drop(file);
    if let Err(err) = written.and_then(|()| rename_staged(dir, staged, target)) {
        // The staged file is garbage whatever happened; ignore cleanup failures.
        drop(dir.remove_file(staged));
        return Err(err);
    }
    Ok(())
}

#[cfg(windows)]
fn rename_staged(dir: &Dir, staged: &str, target: &str) -> io::Result<()> {
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(staged, dir, target)
}

#[cfg(not(windows))]
fn rename_staged(dir: &Dir, staged: &str, target: &str) -> io::Result<()> {
    dir.rename(staged, dir, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cap_fs::{list_file_names, read_file_to_string, write_file};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn data_dir() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    fn ana() -> User {
        User::try_from_strings("a", "Ana", "ana@x.com", "F").expect("valid user")
    }

    fn bo() -> User {
        User::try_from_strings("b", "Bo", "bo@x.com", "M").expect("valid user")
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_reads_as_empty(data_dir: TempDir) {
        let collection = JsonCollection::open(data_dir.path(), "line").expect("open");

        assert_eq!(collection.load().await, Ok(Vec::new()));
    }

    #[rstest]
    #[tokio::test]
    async fn open_creates_a_missing_data_directory(data_dir: TempDir) {
        let nested = data_dir.path().join("nested").join("data");

        let collection = JsonCollection::open(&nested, "users").expect("open");
        collection.replace(&[ana()]).await.expect("write");

        assert_eq!(collection.path(), nested.join("users.json").as_path());
    }

    #[rstest]
    #[tokio::test]
    async fn written_records_are_read_back_in_order(data_dir: TempDir) {
        let collection = JsonCollection::open(data_dir.path(), "line").expect("open");

        collection.replace(&[ana(), bo()]).await.expect("write");

        assert_eq!(collection.load().await, Ok(vec![ana(), bo()]));
    }

    #[rstest]
    #[tokio::test]
    async fn replace_leaves_no_staged_files(data_dir: TempDir) {
        let collection = JsonCollection::open(data_dir.path(), "users").expect("open");

        collection.replace(&[ana()]).await.expect("first write");
        collection.replace(&[ana(), bo()]).await.expect("second write");

        let names = list_file_names(data_dir.path()).expect("list");
        assert_eq!(names, vec!["users.json".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn file_holds_a_plain_json_array(data_dir: TempDir) {
        let collection = JsonCollection::open(data_dir.path(), "users").expect("open");
        collection.replace(&[ana()]).await.expect("write");

        let raw = read_file_to_string(&data_dir.path().join("users.json")).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");

        assert_eq!(
            value,
            serde_json::json!([
                { "id": "a", "name": "Ana", "email": "ana@x.com", "gender": "F" }
            ])
        );
    }

    #[rstest]
    #[case(b"{\"not\":\"an array\"}".as_slice())]
    #[case(b"[{\"id\":\"a\",\"name\":\"Ana\",\"email\":\"ana@d&d\",\"gender\":\"F\"}]".as_slice())]
    #[case(b"not json".as_slice())]
    #[tokio::test]
    async fn invalid_content_is_a_decode_error(data_dir: TempDir, #[case] contents: &[u8]) {
        write_file(&data_dir.path().join("line.json"), contents).expect("seed");
        let collection = JsonCollection::open(data_dir.path(), "line").expect("open");

        let err = collection.load().await.expect_err("invalid content");

        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[rstest]
    fn store_errors_map_through_the_given_constructors() {
        let err = StoreError::Unavailable {
            path: "data/line.json".to_owned(),
            message: "gone".to_owned(),
        };

        let mapped: (&str, String) = map_store_error(
            err,
            |m| ("connection", m),
            |m| ("query", m),
            |m| ("serialization", m),
        );

        assert_eq!(mapped, ("connection", "data/line.json: gone".to_owned()));
    }
}
