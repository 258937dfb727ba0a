//! Platform plumbing shared by the relcheck crates.
//!
//! - Per-platform application directories.
//! - The persisted key-value store the host exposes for options and
//!   short-lived cached values.

mod paths;
mod store;

pub use paths::{AppPaths, AppPathsError};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
