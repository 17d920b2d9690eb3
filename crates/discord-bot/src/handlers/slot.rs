use eyre::{Result, eyre};
use rfslot_core::errors::SlotError;
use serenity::{
    builder::CreateInteractionResponseData,
    model::application::{
        component::ActionRowComponent,
        interaction::{
            InteractionResponseType, message_component::MessageComponentInteraction,
            modal::ModalSubmitInteraction,
        },
    },
};
use std::collections::HashMap;
use tracing::{error, warn};

use super::HandlerContext;
use super::board::ChannelBoard;
use crate::components::{
    self, CHECK_STATUS_BUTTON, DELETE_SLOT_BUTTON, DELETE_SLOT_MODAL, FIELD_ACTION, FIELD_DATE,
    FIELD_NAME, FIELD_RF, FIELD_TIME, FILL_SLOT_BUTTON, FILL_SLOT_MODAL, MANAGE_RF_BUTTON,
    MANAGE_RF_MODAL, REFRESH_BUTTON,
};
use crate::format;
use crate::service::{DeleteSlotForm, FillSlotForm, ManageResourceForm};

type ModalBuilder =
    for<'a, 'b> fn(&'a mut CreateInteractionResponseData<'b>) -> &'a mut CreateInteractionResponseData<'b>;

/// Handle a press on one of the status message buttons
pub async fn handle_button(
    ctx: HandlerContext,
    component: &MessageComponentInteraction,
) -> Result<()> {
    match component.data.custom_id.as_str() {
        FILL_SLOT_BUTTON => open_modal(&ctx, component, components::fill_slot_modal).await,
        DELETE_SLOT_BUTTON => open_modal(&ctx, component, components::delete_slot_modal).await,
        MANAGE_RF_BUTTON => open_modal(&ctx, component, components::manage_rf_modal).await,
        CHECK_STATUS_BUTTON => handle_check_status(&ctx, component).await,
        REFRESH_BUTTON => handle_refresh(&ctx, component).await,
        other => handle_unknown_button(&ctx, component, other).await,
    }
}

async fn handle_unknown_button(
    ctx: &HandlerContext,
    component: &MessageComponentInteraction,
    custom_id: &str,
) -> Result<()> {
    warn!("Unknown button pressed: {}", custom_id);

    component
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| {
                    m.content(format::unknown_button(custom_id)).ephemeral(true)
                })
        })
        .await?;

    Ok(())
}

async fn open_modal(
    ctx: &HandlerContext,
    component: &MessageComponentInteraction,
    builder: ModalBuilder,
) -> Result<()> {
    component
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::Modal)
                .interaction_response_data(builder)
        })
        .await?;

    Ok(())
}

/// Private occupancy report; takes no lock.
async fn handle_check_status(
    ctx: &HandlerContext,
    component: &MessageComponentInteraction,
) -> Result<()> {
    let text = match ctx.actions.check_status().await {
        Ok(report) => format::status_report(&report),
        Err(e) => reply_for(&e),
    };

    component
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(text).ephemeral(true))
        })
        .await?;

    Ok(())
}

async fn handle_refresh(
    ctx: &HandlerContext,
    component: &MessageComponentInteraction,
) -> Result<()> {
    // Acknowledge first; publishing can outlast the response window.
    component
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
                .interaction_response_data(|d| d.ephemeral(true))
        })
        .await?;

    let board = ChannelBoard::new(ctx.ctx.http.clone(), component.channel_id);
    let text = match ctx.actions.refresh(&board).await {
        Ok(_) => "♻️ Refreshed".to_string(),
        Err(e) => reply_for(&e),
    };

    component
        .create_followup_message(&ctx.ctx.http, |f| f.content(text).ephemeral(true))
        .await?;

    Ok(())
}

/// Handle a submitted Fill Slot, Delete Slot or Manage RF form
pub async fn handle_modal_submit(ctx: HandlerContext, modal: &ModalSubmitInteraction) -> Result<()> {
    modal
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
                .interaction_response_data(|d| d.ephemeral(true))
        })
        .await?;

    let mut values = form_values(modal);
    let mut take = |field: &str| values.remove(field).unwrap_or_default();
    let board = ChannelBoard::new(ctx.ctx.http.clone(), modal.channel_id);

    let reply = match modal.data.custom_id.as_str() {
        FILL_SLOT_MODAL => {
            let form = FillSlotForm {
                rf: take(FIELD_RF),
                end_time: take(FIELD_TIME),
                date: take(FIELD_DATE),
                holder: take(FIELD_NAME),
            };
            ctx.actions
                .fill_slot(&board, form)
                .await
                .map(|filled| format::slot_saved(&filled))
        }
        DELETE_SLOT_MODAL => {
            let form = DeleteSlotForm { rf: take(FIELD_RF) };
            ctx.actions
                .delete_slot(&board, form)
                .await
                .map(format::slot_deleted)
        }
        MANAGE_RF_MODAL => {
            let form = ManageResourceForm {
                rf: take(FIELD_RF),
                action: take(FIELD_ACTION),
            };
            ctx.actions
                .manage_resource(form)
                .await
                .map(format::resource_changed)
        }
        other => return Err(eyre!("Unknown form: {}", other)),
    };

    let text = reply.unwrap_or_else(|e| reply_for(&e));
    modal
        .create_followup_message(&ctx.ctx.http, |f| f.content(text).ephemeral(true))
        .await?;

    Ok(())
}

/// Text input values of a submitted modal, by custom id.
fn form_values(modal: &ModalSubmitInteraction) -> HashMap<String, String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => {
                Some((input.custom_id.clone(), input.value.clone()))
            }
            _ => None,
        })
        .collect()
}

fn reply_for(error: &SlotError) -> String {
    if error.is_user_error() {
        warn!("Action rejected: {}", error);
    } else {
        error!("Action failed: {:?}", error);
    }
    format::error_reply(error)
}
