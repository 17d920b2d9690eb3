use async_trait::async_trait;
use eyre::Result;
use rfslot_core::models::resource::ResourceRegistry;

use super::RegistryRepository;
use super::json::JsonDocument;
use crate::models::DbResourceList;
use crate::schema::RESOURCE_LIST_FILE;
use crate::DataDir;

/// Registry stored in `rf_list.json`, ids sorted ascending.
#[derive(Debug, Clone)]
pub struct FileRegistryRepository {
    doc: JsonDocument<DbResourceList>,
}

impl FileRegistryRepository {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            doc: JsonDocument::new(dir.document(RESOURCE_LIST_FILE)),
        }
    }
}

#[async_trait]
impl RegistryRepository for FileRegistryRepository {
    async fn load(&self) -> Result<ResourceRegistry> {
        let list = self.doc.read().await?.unwrap_or_default();
        Ok(list.into())
    }

    async fn save(&self, registry: &ResourceRegistry) -> Result<()> {
        self.doc.write(&DbResourceList::from(registry)).await
    }
}
