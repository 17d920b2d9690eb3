//! Text for the status embed and the private replies.
//!
//! Kept free of serenity types so the wording can be tested directly;
//! [`crate::handlers::board`] copies an [`EmbedContent`] into a serenity
//! embed builder.

use rfslot_core::{
    errors::SlotError,
    models::resource::ResourceId,
    render::{DayGroup, SlotLine, StatusView, Urgency},
};

use crate::components;
use crate::service::{FilledSlot, ResourceChange, StatusReport};

pub const EMBED_COLOUR: u32 = 0x3498db;
const SPACER: &str = "\u{200b}";
const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━";

// Discord embed limits.
const MAX_FIELDS: usize = 25;
const MAX_FIELD_NAME: usize = 256;
const MAX_FIELD_VALUE: usize = 1024;
const MAX_EMBED_CHARS: usize = 6000;

/// Holder names longer than the form allows, such as ones stored before the
/// limit existed, are shortened on the card.
pub const MAX_HOLDER_CHARS: usize = components::HOLDER_MAX_LENGTH as usize;

const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl EmbedField {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: truncate(name.into(), MAX_FIELD_NAME),
            value: truncate(value.into(), MAX_FIELD_VALUE),
        }
    }

    fn spacer() -> Self {
        Self::new(SPACER, SPACER)
    }

    fn char_count(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedContent {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
    pub footer: String,
}

impl EmbedContent {
    /// Characters Discord counts against the 6000 per-embed limit.
    pub fn char_count(&self) -> usize {
        self.title.chars().count()
            + self.description.chars().count()
            + self.footer.chars().count()
            + self.fields.iter().map(EmbedField::char_count).sum::<usize>()
    }
}

pub fn status_embed(view: &StatusView) -> EmbedContent {
    let zone = view.rendered_at.format("%Z").to_string();

    let mut embed = EmbedContent {
        title: "📊 RF SLOT MONITOR".to_string(),
        description: "Times show when each slot becomes free".to_string(),
        colour: EMBED_COLOUR,
        fields: vec![
            EmbedField::spacer(),
            EmbedField::new("📊 TODAY'S SUMMARY", summary(view)),
            EmbedField::spacer(),
        ],
        footer: format!(
            "Last updated • {} {}",
            view.rendered_at.format("%d %b %Y %H:%M"),
            zone
        ),
    };

    if view.days.is_empty() {
        embed.fields.push(EmbedField::new("Info", "No slots filled yet."));
        return embed;
    }

    // Day groups are added whole while both the field count and the total
    // size leave room for the overflow note that would follow them.
    let mut used = embed.char_count();
    let mut shown = 0;
    for (idx, group) in view.days.iter().enumerate() {
        let mut block = Vec::with_capacity(2);
        if idx > 0 {
            block.push(EmbedField::spacer());
        }
        block.push(EmbedField::new(
            format!("{}\n{}", day_header(group), DIVIDER),
            day_body(group, &zone),
        ));

        let remaining = view.days.len() - idx - 1;
        let (reserve_fields, reserve_chars) = match remaining {
            0 => (0, 0),
            n => (1, more_days_field(n).char_count()),
        };
        let block_chars: usize = block.iter().map(EmbedField::char_count).sum();

        if embed.fields.len() + block.len() + reserve_fields > MAX_FIELDS
            || used + block_chars + reserve_chars > MAX_EMBED_CHARS
        {
            break;
        }

        used += block_chars;
        embed.fields.extend(block);
        shown += 1;
    }

    let hidden = view.days.len() - shown;
    if hidden > 0 {
        embed.fields.push(more_days_field(hidden));
    }

    embed
}

fn more_days_field(hidden: usize) -> EmbedField {
    let unit = if hidden == 1 { "day" } else { "days" };
    EmbedField::new("Info", format!("…and {} more {}", hidden, unit))
}

fn summary(view: &StatusView) -> String {
    let mut text = format!("**Total slots** : {}", view.total_slots);
    if !view.today_has_slots {
        text.push_str("\nNo slots today");
    } else if let Some(nearest) = &view.nearest {
        text.push_str(&format!(
            "\n**Nearest slot** : RF {} ({})",
            nearest.resource, nearest.end_time
        ));
    }
    text
}

pub fn day_header(group: &DayGroup) -> String {
    let weekday = group.date.format("%A").to_string().to_uppercase();
    let date = group.date.format("%d %b");
    if group.is_today {
        format!("🟢 TODAY — {} ({})", weekday, date)
    } else {
        format!("📅 {} ({})", weekday, date)
    }
}

/// Whole cards only; whatever does not fit is counted in a closing line.
fn day_body(group: &DayGroup, zone: &str) -> String {
    let separator = BLOCK_SEPARATOR.chars().count();
    let mut body = String::new();
    let mut len = 0;
    let mut shown = 0;

    for line in &group.slots {
        let card = slot_card(line, zone);
        let card_len = card.chars().count();
        let joined = if body.is_empty() { card_len } else { len + separator + card_len };

        let remaining = group.slots.len() - shown - 1;
        let reserve = match remaining {
            0 => 0,
            n => separator + more_slots_line(n).chars().count(),
        };
        if joined + reserve > MAX_FIELD_VALUE {
            break;
        }

        if !body.is_empty() {
            body.push_str(BLOCK_SEPARATOR);
        }
        body.push_str(&card);
        len = joined;
        shown += 1;
    }

    let hidden = group.slots.len() - shown;
    if hidden > 0 {
        if !body.is_empty() {
            body.push_str(BLOCK_SEPARATOR);
        }
        body.push_str(&more_slots_line(hidden));
    }
    body
}

fn more_slots_line(hidden: usize) -> String {
    format!("…and {} more", hidden)
}

pub fn slot_card(line: &SlotLine, zone: &str) -> String {
    format!(
        "{} **RF {}**\n└─ ⏰ {} {}\n└─ 👤 {}",
        urgency_icon(line.urgency),
        line.resource,
        line.end_time,
        zone,
        holder_name(&line.holder)
    )
}

fn holder_name(holder: &str) -> String {
    if holder.chars().count() <= MAX_HOLDER_CHARS {
        return holder.to_string();
    }
    let mut short = truncate(holder.to_string(), MAX_HOLDER_CHARS - 1);
    short.push('…');
    short
}

pub fn urgency_icon(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Urgent => "🔴",
        Urgency::Warning => "🟡",
        Urgency::Normal => "🟢",
    }
}

pub fn slot_saved(filled: &FilledSlot) -> String {
    format!(
        "✅ RF {} saved for {} {}",
        filled.resource, filled.placement.date, filled.placement.end_time
    )
}

pub fn slot_deleted(resource: ResourceId) -> String {
    format!("🗑️ RF {} deleted", resource)
}

pub fn resource_changed(change: ResourceChange) -> String {
    match change {
        ResourceChange::Added(id) => format!("✅ RF {} added", id),
        ResourceChange::Removed(id) => format!("🗑️ RF {} removed", id),
    }
}

pub fn status_report(report: &StatusReport) -> String {
    format!(
        "📊 **SLOT STATUS**\n\n🔄 **In use** : {}\n📭 **Free** : {}\n🗂️ **Total** : {}\n\nToday at {}",
        report.counts.used,
        report.counts.free,
        report.counts.total,
        report.checked_at.format("%H:%M")
    )
}

/// Private reply for a button this version does not know.
pub fn unknown_button(custom_id: &str) -> String {
    format!("❌ Unknown button '{}'; press Refresh for a current status message", custom_id)
}

/// Private reply for a failed action.
pub fn error_reply(error: &SlotError) -> String {
    match error {
        SlotError::NotFound(id) => format!("⚠️ RF {} not found", id),
        SlotError::AlreadyExists(id) => format!("⚠️ RF {} already exists", id),
        SlotError::InvalidAction(_) => "❌ Invalid action (use add / remove)".to_string(),
        SlotError::Storage(_) | SlotError::Publish(_) => {
            format!("❌ Action failed: {}", error)
        }
        other => format!("❌ {}", other),
    }
}

fn truncate(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}
