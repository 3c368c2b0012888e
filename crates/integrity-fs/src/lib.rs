//! Filesystem layer for the integrity manager
//!
//! Provides streamed content hashing and canonical relative-path handling
//! for the tracked file set.

pub mod checksum;
pub mod error;
pub mod relpath;

pub use checksum::{hash_bytes, hash_file};
pub use error::{Error, Result};
pub use relpath::RelPath;
