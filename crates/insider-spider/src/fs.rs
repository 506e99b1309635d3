use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::trace;

/// Reads a `.json` file from `path`.
pub async fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    trace!("reading file path: {}", path.display());
    let file = tokio::fs::read(path).await?;
    trace!("file read; deserializing bytes ...");
    let data: T = serde_json::from_slice(&file)?;
    Ok(data)
}

/// Writes `data` to `path` as pretty-printed JSON.
///
/// Parent directories are created as necessary.
pub async fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, data: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    trace!("writing json to {}", path.display());
    let json = serde_json::to_vec_pretty(data)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
