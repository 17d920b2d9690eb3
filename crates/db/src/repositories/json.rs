use eyre::{Result, WrapErr};
use serde::{Serialize, de::DeserializeOwned};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A whole-file JSON document.
#[derive(Debug, Clone)]
pub(crate) struct JsonDocument<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            _doc: PhantomData,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when the file is missing or blank. A file that exists but
    /// does not parse is an error, so it is never silently replaced.
    pub(crate) async fn read(&self) -> Result<Option<T>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed to read {}", self.path.display()));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let doc = serde_json::from_slice(&bytes)
            .wrap_err_with(|| format!("Failed to parse {}", self.path.display()))?;

        Ok(Some(doc))
    }

    /// Replace the file with `doc` via a sibling temp file and a rename.
    pub(crate) async fn write(&self, doc: &T) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(doc)
            .wrap_err_with(|| format!("Failed to serialize {}", self.path.display()))?;
        bytes.push(b'\n');

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
