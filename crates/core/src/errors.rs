use thiserror::Error;

use crate::models::resource::ResourceId;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: '{0}' (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid RF number: '{0}'")]
    InvalidResource(String),

    #[error("RF {0} not found")]
    NotFound(ResourceId),

    #[error("RF {0} already exists")]
    AlreadyExists(ResourceId),

    #[error("RF {0} is still in use")]
    InUse(ResourceId),

    #[error("Invalid action: '{0}' (use add / remove)")]
    InvalidAction(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Publish error: {0}")]
    Publish(eyre::Report),
}

impl SlotError {
    /// Errors caused by what the user typed or asked for.
    ///
    /// These are answered privately and never leave a partial write behind.
    /// Everything else is an infrastructure failure and is reported loudly.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, SlotError::Storage(_) | SlotError::Publish(_))
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
