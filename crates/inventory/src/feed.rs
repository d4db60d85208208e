//! Inventory feed loading.
//!
//! The feed is downloaded and converted by an external step; this module only
//! reads the resulting JSON array of records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::record::InventoryRecord;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to open inventory feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode inventory feed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parse a feed from any reader.
pub fn parse_feed<R: Read>(reader: R) -> Result<Vec<InventoryRecord>, FeedError> {
    let records: Vec<InventoryRecord> = serde_json::from_reader(reader)?;
    Ok(records)
}

/// Load the feed file at `path`.
pub fn load_feed(path: impl AsRef<Path>) -> Result<Vec<InventoryRecord>, FeedError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_feed(BufReader::new(file))?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded inventory feed");
    Ok(records)
}
