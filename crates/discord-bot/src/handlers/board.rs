use async_trait::async_trait;
use eyre::Result;
use rfslot_core::render::StatusView;
use serenity::{
    Error as SerenityError,
    builder::CreateEmbed,
    http::{Http, error::Error as HttpError},
    model::id::{ChannelId, MessageId},
};
use std::sync::Arc;

use crate::components;
use crate::format::{self, EmbedContent};
use crate::publisher::{EditOutcome, StatusBoard};

/// Discord JSON error code for "Unknown Message".
const UNKNOWN_MESSAGE: isize = 10008;

/// The status channel, reached over serenity's HTTP client.
pub struct ChannelBoard {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelBoard {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl StatusBoard for ChannelBoard {
    async fn send(&self, view: &StatusView) -> Result<u64> {
        let content = format::status_embed(view);
        let message = self
            .channel_id
            .send_message(&self.http, |m| {
                m.embed(|e| apply_embed(e, &content))
                    .components(components::slot_buttons)
            })
            .await?;

        Ok(message.id.0)
    }

    async fn edit(&self, message_id: u64, view: &StatusView) -> Result<EditOutcome> {
        let content = format::status_embed(view);
        let result = self
            .channel_id
            .edit_message(&self.http, MessageId(message_id), |m| {
                m.embed(|e| apply_embed(e, &content))
                    .components(components::slot_buttons)
            })
            .await;

        match result {
            Ok(_) => Ok(EditOutcome::Edited),
            Err(e) if is_unknown_message(&e) => Ok(EditOutcome::Missing),
            Err(e) => Err(e.into()),
        }
    }
}

fn apply_embed<'a>(embed: &'a mut CreateEmbed, content: &EmbedContent) -> &'a mut CreateEmbed {
    embed
        .title(&content.title)
        .description(&content.description)
        .colour(content.colour);
    for field in &content.fields {
        embed.field(&field.name, &field.value, false);
    }
    embed.footer(|f| f.text(&content.footer))
}

fn is_unknown_message(error: &SerenityError) -> bool {
    match error {
        SerenityError::Http(http_error) => match &**http_error {
            HttpError::UnsuccessfulRequest(response) => {
                response.status_code.as_u16() == 404 || response.error.code == UNKNOWN_MESSAGE
            }
            _ => false,
        },
        _ => false,
    }
}
