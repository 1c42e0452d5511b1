//! Git integration for amg.
//!
//! This crate owns everything that touches the filesystem or spawns `git`:
//! locating repositories under a set of roots, fetching them, and querying
//! their porcelain status.

pub mod commands;
pub mod discover;
pub mod fetch;
pub mod status;

pub use commands::{GitError, Result};
pub use discover::{LocateError, locate_repositories};
pub use fetch::{FetchOptions, fetch_all};
pub use status::query_status;
