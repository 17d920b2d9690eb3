use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::{Asia::Jakarta, Tz};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rfslot_core::{
    errors::SlotError,
    models::{
        ledger::{Placement, SlotLedger},
        resource::ResourceId,
        slot::Slot,
    },
    render::{Renderer, StatusCounts, StatusView, Urgency},
};
use rfslot_discord_bot::{
    format,
    service::{FilledSlot, ResourceChange, StatusReport},
};

fn rf(value: u32) -> ResourceId {
    ResourceId::new(value).expect("valid resource id")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).expect("valid date")
}

fn now() -> DateTime<Tz> {
    Jakarta
        .with_ymd_and_hms(2026, 10, 19, 10, 0, 0)
        .single()
        .expect("valid Jakarta time")
}

fn render(ledger: &SlotLedger) -> StatusView {
    Renderer::new(Jakarta).render(ledger, &now())
}

fn slot(id: u32, time: &str, holder: &str) -> Slot {
    Slot::new(rf(id), time.parse().expect("valid time"), holder)
}

#[test]
fn test_status_embed_layout() {
    let mut ledger = SlotLedger::new();
    ledger.place(day(19), slot(3, "10:15", "Sari"));
    ledger.place(day(19), slot(2, "11:00", "Budi"));
    ledger.place(day(21), slot(7, "08:00", "Dewi"));

    let embed = format::status_embed(&render(&ledger));

    assert_eq!(embed.title, "📊 RF SLOT MONITOR");
    assert_eq!(embed.colour, format::EMBED_COLOUR);
    assert_eq!(embed.footer, "Last updated • 19 Oct 2026 10:00 WIB");

    let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "\u{200b}",
            "📊 TODAY'S SUMMARY",
            "\u{200b}",
            "🟢 TODAY — MONDAY (19 Oct)\n━━━━━━━━━━━━━━━━━━━━",
            "\u{200b}",
            "📅 WEDNESDAY (21 Oct)\n━━━━━━━━━━━━━━━━━━━━",
        ]
    );
    assert_eq!(
        embed.fields[1].value,
        "**Total slots** : 3\n**Nearest slot** : RF 3 (10:15)"
    );
    assert_eq!(
        embed.fields[3].value,
        "🔴 **RF 3**\n└─ ⏰ 10:15 WIB\n└─ 👤 Sari\n\n🟡 **RF 2**\n└─ ⏰ 11:00 WIB\n└─ 👤 Budi"
    );
    assert_eq!(embed.fields[5].value, "🟢 **RF 7**\n└─ ⏰ 08:00 WIB\n└─ 👤 Dewi");
}

#[rstest]
#[case(Urgency::Urgent, "🔴")]
#[case(Urgency::Warning, "🟡")]
#[case(Urgency::Normal, "🟢")]
fn test_urgency_icon(#[case] urgency: Urgency, #[case] icon: &str) {
    assert_eq!(format::urgency_icon(urgency), icon);
}

#[test]
fn test_status_embed_without_slots() {
    let embed = format::status_embed(&render(&SlotLedger::new()));

    assert_eq!(embed.fields[1].value, "**Total slots** : 0\nNo slots today");
    assert_eq!(embed.fields[3].name, "Info");
    assert_eq!(embed.fields[3].value, "No slots filled yet.");
}

#[test]
fn test_status_embed_today_only_past_slots() {
    let mut ledger = SlotLedger::new();
    ledger.place(day(19), slot(1, "09:00", "Lan"));

    let embed = format::status_embed(&render(&ledger));
    assert_eq!(embed.fields[1].value, "**Total slots** : 1");
}

#[test]
fn test_status_embed_respects_field_limit() {
    let mut ledger = SlotLedger::new();
    for (idx, d) in (1..=14).enumerate() {
        ledger.place(
            NaiveDate::from_ymd_opt(2026, 11, d).expect("valid date"),
            slot(idx as u32 + 1, "12:00", "Lan"),
        );
    }

    let embed = format::status_embed(&render(&ledger));

    assert_eq!(embed.fields.len(), 25);
    let last = embed.fields.last().expect("has fields");
    assert_eq!(last.name, "Info");
    assert_eq!(last.value, "…and 3 more days");
}

#[test]
fn test_day_body_keeps_whole_cards() {
    let mut ledger = SlotLedger::new();
    for id in 1..=40 {
        ledger.place(day(20), slot(id, "12:00", &format!("Holder {}", id)));
    }

    let embed = format::status_embed(&render(&ledger));
    let body = &embed.fields[3].value;
    assert!(body.chars().count() <= 1024);

    let parts: Vec<&str> = body.split("\n\n").collect();
    let (overflow, cards) = parts.split_last().expect("body has parts");
    let hidden: usize = overflow
        .strip_prefix("…and ")
        .and_then(|rest| rest.strip_suffix(" more"))
        .and_then(|n| n.parse().ok())
        .expect("overflow line counts the hidden slots");

    assert!(hidden > 0);
    assert_eq!(cards.len() + hidden, 40);
    for (idx, card) in cards.iter().enumerate() {
        let id = idx + 1;
        assert_eq!(
            *card,
            format!("🟢 **RF {}**\n└─ ⏰ 12:00 WIB\n└─ 👤 Holder {}", id, id)
        );
    }
}

#[test]
fn test_day_body_without_overflow_has_no_note() {
    let mut ledger = SlotLedger::new();
    for id in 1..=3 {
        ledger.place(day(20), slot(id, "12:00", "Lan"));
    }

    let embed = format::status_embed(&render(&ledger));
    assert!(!embed.fields[3].value.contains("more"));
    assert_eq!(embed.fields[3].value.split("\n\n").count(), 3);
}

#[test]
fn test_long_holder_is_shortened_on_card() {
    let mut ledger = SlotLedger::new();
    ledger.place(day(20), slot(1, "12:00", &"x".repeat(2000)));

    let embed = format::status_embed(&render(&ledger));
    let holder = embed.fields[3]
        .value
        .rsplit("👤 ")
        .next()
        .expect("card has a holder line");

    assert_eq!(holder.chars().count(), format::MAX_HOLDER_CHARS);
    assert!(holder.ends_with('…'));
}

#[rstest]
#[case::few_long_holders(8, 1, 900)]
#[case::full_days(11, 12, 100)]
#[case::many_days(30, 6, 60)]
fn test_status_embed_stays_within_total_size(
    #[case] days: u32,
    #[case] slots_per_day: u32,
    #[case] holder_len: usize,
) {
    let mut ledger = SlotLedger::new();
    let mut id = 0;
    for d in 0..days {
        let date = day(20) + chrono::Duration::days(d.into());
        for _ in 0..slots_per_day {
            id += 1;
            ledger.place(date, slot(id, "12:00", &"n".repeat(holder_len)));
        }
    }

    let embed = format::status_embed(&render(&ledger));
    assert!(embed.char_count() <= 6000, "embed has {} chars", embed.char_count());
    assert!(embed.fields.len() <= 25);

    let shown = embed
        .fields
        .iter()
        .filter(|field| field.name.contains('━'))
        .count();
    let hidden = days as usize - shown;
    if hidden > 0 {
        let last = embed.fields.last().expect("has fields");
        let unit = if hidden == 1 { "day" } else { "days" };
        assert_eq!(last.value, format!("…and {} more {}", hidden, unit));
    }
}

#[test]
fn test_char_count_includes_every_part() {
    let embed = format::status_embed(&render(&SlotLedger::new()));

    let expected = embed.title.chars().count()
        + embed.description.chars().count()
        + embed.footer.chars().count()
        + embed
            .fields
            .iter()
            .map(|f| f.name.chars().count() + f.value.chars().count())
            .sum::<usize>();
    assert_eq!(embed.char_count(), expected);
}

#[test]
fn test_replies() {
    let filled = FilledSlot {
        resource: rf(31),
        placement: Placement {
            date: day(20),
            end_time: "23:00".parse().expect("valid time"),
        },
    };
    assert_eq!(format::slot_saved(&filled), "✅ RF 31 saved for 2026-10-20 23:00");
    assert_eq!(format::slot_deleted(rf(31)), "🗑️ RF 31 deleted");
    assert_eq!(format::resource_changed(ResourceChange::Added(rf(32))), "✅ RF 32 added");
    assert_eq!(format::resource_changed(ResourceChange::Removed(rf(32))), "🗑️ RF 32 removed");
}

#[test]
fn test_error_replies() {
    assert_eq!(format::error_reply(&SlotError::NotFound(rf(8))), "⚠️ RF 8 not found");
    assert_eq!(format::error_reply(&SlotError::AlreadyExists(rf(8))), "⚠️ RF 8 already exists");
    assert_eq!(format::error_reply(&SlotError::InUse(rf(8))), "❌ RF 8 is still in use");
    assert_eq!(
        format::error_reply(&SlotError::InvalidAction("drop".to_string())),
        "❌ Invalid action (use add / remove)"
    );
    assert_eq!(
        format::error_reply(&SlotError::InvalidDate("2026/01/10".to_string())),
        "❌ Invalid date format: '2026/01/10' (expected YYYY-MM-DD)"
    );
    assert!(
        format::error_reply(&SlotError::Storage(eyre::eyre!("disk full")))
            .starts_with("❌ Action failed:")
    );
}

#[test]
fn test_unknown_button_reply() {
    let reply = format::unknown_button("rf_legacy");
    assert!(reply.starts_with("❌ Unknown button 'rf_legacy'"));
}

#[test]
fn test_status_report() {
    let report = StatusReport {
        counts: StatusCounts { total: 3, used: 1, free: 2 },
        checked_at: now(),
    };

    assert_eq!(
        format::status_report(&report),
        "📊 **SLOT STATUS**\n\n🔄 **In use** : 1\n📭 **Free** : 2\n🗂️ **Total** : 3\n\nToday at 10:00"
    );
}
