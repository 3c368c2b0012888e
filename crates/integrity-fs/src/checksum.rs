//! Streaming SHA-256 content hashing
//!
//! Digests are the canonical content fingerprint recorded in snapshots.
//! Files are read in fixed-size chunks so arbitrarily large tracked files
//! never require whole-file buffering.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Read buffer size for streamed hashing
const CHUNK_SIZE: usize = 4096;

/// Compute the hex-encoded SHA-256 digest of a file's full byte content.
///
/// Reads the file in [`CHUNK_SIZE`] chunks. Byte-identical content always
/// produces an identical digest; diffing depends on this.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or a read fails
/// mid-stream. The caller decides whether to skip or abort.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|e| Error::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the hex-encoded SHA-256 digest of an in-memory byte slice.
///
/// Matches [`hash_file`] for identical content; used by tests and callers
/// that already hold the bytes.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
