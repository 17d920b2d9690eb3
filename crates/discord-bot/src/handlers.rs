use serenity::{
    async_trait,
    model::{
        application::interaction::{Interaction, InteractionResponseType},
        channel::ChannelType,
        gateway::Ready,
        id::ChannelId,
    },
    prelude::*,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub mod board;
pub mod slot;

use crate::config::BotConfig;
use crate::service::SlotActions;
use board::ChannelBoard;

/// Main Discord handler that processes all events.
///
/// Routes button presses and form submissions to [`SlotActions`]; it holds
/// no slot state of its own.
pub struct Handler {
    config: BotConfig,
    actions: Arc<dyn SlotActions>,
}

impl Handler {
    /// Create a new handler
    pub fn new(config: BotConfig, actions: Arc<dyn SlotActions>) -> Self {
        Self { config, actions }
    }

    fn handler_context(&self, ctx: &Context) -> HandlerContext {
        HandlerContext {
            ctx: ctx.clone(),
            actions: self.actions.clone(),
        }
    }

    /// The configured channel id, otherwise the first guild text channel
    /// whose name matches.
    async fn find_status_channel(&self, ctx: &Context, ready: &Ready) -> Option<ChannelId> {
        if let Some(channel_id) = self.config.status_channel_id {
            return Some(ChannelId(channel_id));
        }

        for guild in &ready.guilds {
            match guild.id.channels(&ctx.http).await {
                Ok(channels) => {
                    let found = channels
                        .values()
                        .find(|channel| {
                            channel.kind == ChannelType::Text
                                && channel.name == self.config.status_channel_name
                        });
                    if let Some(channel) = found {
                        return Some(channel.id);
                    }
                }
                Err(why) => {
                    error!("Error listing channels of guild {}: {:?}", guild.id, why);
                }
            }
        }

        None
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Publish the status message once the gateway session is up.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        let Some(channel_id) = self.find_status_channel(&ctx, &ready).await else {
            warn!(
                "Status channel '{}' not found; waiting for a Refresh press",
                self.config.status_channel_name
            );
            return;
        };

        let board = ChannelBoard::new(ctx.http.clone(), channel_id);
        match self.actions.refresh(&board).await {
            Ok(published) => info!("Initial status published in {}: {:?}", channel_id, published),
            Err(e) => error!("Error publishing initial status: {}", e),
        }
    }

    /// Handle interactions (buttons and modal submits)
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::MessageComponent(component) => {
                info!("Received button: {}", component.data.custom_id);

                if let Err(e) = slot::handle_button(self.handler_context(&ctx), &component).await {
                    error!("Error handling button: {:?}", e);

                    if let Err(why) = component
                        .create_interaction_response(&ctx.http, |r| {
                            r.kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|m| {
                                    m.content(format!("❌ Error: {}", e)).ephemeral(true)
                                })
                        })
                        .await
                    {
                        error!("Failed to send error response: {:?}", why);
                    }
                }
            }
            Interaction::ModalSubmit(modal) => {
                info!("Received form: {}", modal.data.custom_id);

                if let Err(e) = slot::handle_modal_submit(self.handler_context(&ctx), &modal).await {
                    error!("Error handling form: {:?}", e);

                    if let Err(why) = modal
                        .create_followup_message(&ctx.http, |f| {
                            f.content(format!("❌ Error: {}", e)).ephemeral(true)
                        })
                        .await
                    {
                        error!("Failed to send error response: {:?}", why);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Shared context for interaction handlers.
pub struct HandlerContext {
    pub ctx: Context,
    pub actions: Arc<dyn SlotActions>,
}
