use async_trait::async_trait;
use mockall::mock;
use rfslot_core::models::{ledger::SlotLedger, resource::ResourceRegistry};

use crate::repositories::{LedgerRepository, MessageHandleRepository, RegistryRepository};

// Mock repositories for testing
mock! {
    pub RegistryRepo {}

    #[async_trait]
    impl RegistryRepository for RegistryRepo {
        async fn load(&self) -> eyre::Result<ResourceRegistry>;
        async fn save(&self, registry: &ResourceRegistry) -> eyre::Result<()>;
    }
}

mock! {
    pub LedgerRepo {}

    #[async_trait]
    impl LedgerRepository for LedgerRepo {
        async fn load(&self) -> eyre::Result<SlotLedger>;
        async fn save(&self, ledger: &SlotLedger) -> eyre::Result<()>;
    }
}

mock! {
    pub MessageHandleRepo {}

    #[async_trait]
    impl MessageHandleRepository for MessageHandleRepo {
        async fn load(&self) -> eyre::Result<Option<u64>>;
        async fn save(&self, message_id: u64) -> eyre::Result<()>;
    }
}
