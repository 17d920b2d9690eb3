pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use std::path::{Path, PathBuf};

/// Directory holding the bot's JSON documents.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

pub async fn open_data_dir(path: impl AsRef<Path>) -> Result<DataDir> {
    let dir = DataDir::new(path.as_ref());
    schema::initialize_storage(&dir).await?;

    Ok(dir)
}
