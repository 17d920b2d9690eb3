use serenity::{
    builder::{CreateComponents, CreateInteractionResponseData},
    model::application::component::{ButtonStyle, InputTextStyle},
};

pub const FILL_SLOT_BUTTON: &str = "rf_fill";
pub const DELETE_SLOT_BUTTON: &str = "rf_delete";
pub const MANAGE_RF_BUTTON: &str = "rf_manage";
pub const CHECK_STATUS_BUTTON: &str = "rf_status";
pub const REFRESH_BUTTON: &str = "rf_refresh";

pub const FILL_SLOT_MODAL: &str = "rf_fill_modal";
pub const DELETE_SLOT_MODAL: &str = "rf_delete_modal";
pub const MANAGE_RF_MODAL: &str = "rf_manage_modal";

pub const FIELD_RF: &str = "rf";
pub const FIELD_TIME: &str = "time";
pub const FIELD_DATE: &str = "date";
pub const FIELD_NAME: &str = "name";
pub const FIELD_ACTION: &str = "action";

const BUTTONS: [(&str, &str); 5] = [
    (FILL_SLOT_BUTTON, "Fill Slot"),
    (DELETE_SLOT_BUTTON, "Delete Slot"),
    (MANAGE_RF_BUTTON, "Manage RF"),
    (CHECK_STATUS_BUTTON, "Check Status"),
    (REFRESH_BUTTON, "Refresh"),
];

/// The button row attached to the status message.
pub fn slot_buttons(components: &mut CreateComponents) -> &mut CreateComponents {
    components.create_action_row(|row| {
        for (custom_id, label) in BUTTONS {
            row.create_button(|button| {
                button
                    .custom_id(custom_id)
                    .label(label)
                    .style(ButtonStyle::Primary)
            });
        }
        row
    })
}

/// Longest holder name the Fill Slot form accepts.
pub const HOLDER_MAX_LENGTH: u64 = 100;

/// Text input: custom id, label, placeholder, required, max length.
type InputField = (&'static str, &'static str, &'static str, bool, Option<u64>);

fn modal<'a, 'b>(
    data: &'a mut CreateInteractionResponseData<'b>,
    custom_id: &str,
    title: &str,
    inputs: &[InputField],
) -> &'a mut CreateInteractionResponseData<'b> {
    data.custom_id(custom_id).title(title).components(|components| {
        for &(input_id, label, placeholder, required, max_length) in inputs {
            components.create_action_row(|row| {
                row.create_input_text(|input| {
                    input
                        .custom_id(input_id)
                        .label(label)
                        .placeholder(placeholder)
                        .style(InputTextStyle::Short)
                        .required(required);
                    if let Some(max_length) = max_length {
                        input.max_length(max_length);
                    }
                    input
                })
            });
        }
        components
    })
}

pub fn fill_slot_modal<'a, 'b>(
    data: &'a mut CreateInteractionResponseData<'b>,
) -> &'a mut CreateInteractionResponseData<'b> {
    modal(
        data,
        FILL_SLOT_MODAL,
        "Fill RF Slot",
        &[
            (FIELD_RF, "RF number", "31", true, None),
            (FIELD_TIME, "End time (HH:MM)", "23:00", true, None),
            (FIELD_DATE, "Date (optional)", "YYYY-MM-DD (e.g. 2026-01-10)", false, None),
            (FIELD_NAME, "RF holder name", "Lan", true, Some(HOLDER_MAX_LENGTH)),
        ],
    )
}

pub fn delete_slot_modal<'a, 'b>(
    data: &'a mut CreateInteractionResponseData<'b>,
) -> &'a mut CreateInteractionResponseData<'b> {
    modal(
        data,
        DELETE_SLOT_MODAL,
        "Delete RF Slot",
        &[(FIELD_RF, "RF number to delete", "31", true, None)],
    )
}

pub fn manage_rf_modal<'a, 'b>(
    data: &'a mut CreateInteractionResponseData<'b>,
) -> &'a mut CreateInteractionResponseData<'b> {
    modal(
        data,
        MANAGE_RF_MODAL,
        "Manage RF",
        &[
            (FIELD_RF, "RF number", "32", true, None),
            (FIELD_ACTION, "Action (add / remove)", "add or remove", true, None),
        ],
    )
}
