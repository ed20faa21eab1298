use std::fs;
use std::io::Write;

use camino::Utf8Path;

use crate::domain::ChannelRecord;
use crate::error::FeedError;

pub fn write_channels(path: &Utf8Path, channels: &[ChannelRecord]) -> Result<(), FeedError> {
    let content =
        serde_json::to_vec_pretty(channels).map_err(|err| FeedError::Filesystem(err.to_string()))?;
    write_bytes_atomic(path, &content)
}

pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), FeedError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => {
            fs::create_dir_all(parent.as_std_path())
                .map_err(|err| FeedError::Filesystem(err.to_string()))?;
            parent
        }
        _ => Utf8Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix("crichd-feed")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    temp.write_all(content)
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    temp.persist(path.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    Ok(())
}

pub fn read_channels(path: &Utf8Path) -> Result<Vec<ChannelRecord>, FeedError> {
    let content = fs::read_to_string(path.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))?;
    serde_json::from_str(&content).map_err(|err| FeedError::UnexpectedPayload(err.to_string()))
}
