//! # RF Slot Core
//!
//! Domain model for the RF slot monitor: the registry of reservable RF
//! numbers, the date-keyed slot ledger, time resolution in the configured
//! zone, and the renderer that turns both into a status view.
//!
//! Nothing in this crate performs I/O. Persistence lives in `rfslot-db`,
//! and the Discord surface lives in `rfslot-discord-bot`.

pub mod clock;
pub mod errors;
pub mod models;
pub mod render;
pub mod time;
