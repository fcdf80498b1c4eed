//! JSON-file persistence adapters.
//!
//! Each collection (registered users, waiting line) lives in its own JSON
//! array file inside the configured data directory.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only move whole snapshots between the
//!   file and the domain. No business logic resides here.
//! - **Atomic replacement**: writes stage a hidden temporary file and rename
//!   it over the target.
//! - **Capability-scoped I/O**: files are reached through a `cap_std`
//!   directory handle opened once at startup.
//!
//! # Example
//!
//! ```no_run
//! use waitline::outbound::persistence::{JsonDirectoryRepository, JsonLineRepository};
//!
//! let directory = JsonDirectoryRepository::open(std::path::Path::new("data"))?;
//! let line = JsonLineRepository::open(std::path::Path::new("data"))?;
//! # Ok::<(), std::io::Error>(())
//! ```

mod json_collection;
mod json_directory_repository;
mod json_line_repository;

pub use json_directory_repository::JsonDirectoryRepository;
pub use json_line_repository::JsonLineRepository;
