use std::io;
use std::path::PathBuf;

/// A grid built from values that break the tile invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid tile value {value} at cell {index}: expected 0 or a power of two >= 2")]
    InvalidTile { index: usize, value: u32 },
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed score file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
