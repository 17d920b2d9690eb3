pub mod ledger;
pub mod resource;
pub mod slot;
