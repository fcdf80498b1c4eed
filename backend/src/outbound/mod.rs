//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: JSON snapshot files for the directory and the line.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
