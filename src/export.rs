use crate::keys;
use crate::storage::RecordStore;
use chrono::NaiveDate;

/// Non-empty monthly day notes as (date, trimmed text) pairs.
pub fn month_events(store: &RecordStore, year: i32, month: u32) -> Vec<(NaiveDate, String)> {
    let Some(last_day) = days_in_month(year, month) else {
        return Vec::new();
    };
    (1..=last_day)
        .filter_map(|day| {
            let key = keys::note_key(keys::NoteScope::Monthly, 0, &keys::month_day_field(day));
            let text = store.note(&key)?;
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some((date, text.to_string()))
        })
        .collect()
}

/// Renders the month's notes as a minimal iCalendar file: one all-day event
/// per non-empty day. `None` when there is nothing to export.
pub fn export_month(store: &RecordStore, year: i32, month: u32) -> Option<String> {
    let events = month_events(store, year, month);
    if events.is_empty() {
        return None;
    }

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//journal_app//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
    ];
    for (date, text) in events {
        let stamp = date.format("%Y%m%d");
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("DTSTART;VALUE=DATE:{stamp}"));
        lines.push(format!("DTEND;VALUE=DATE:{stamp}"));
        lines.push(format!("SUMMARY:{}", escape_text(&text)));
        lines.push("DESCRIPTION:Journal entry".to_string());
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());

    Some(lines.join("\r\n"))
}

pub fn ics_filename(year: i32, month: u32) -> String {
    format!("journal_{year}_{month}.ics")
}

/// Pre-filled "create event" link for an external calendar service.
pub fn calendar_event_url(date: NaiveDate, text: &str) -> String {
    let stamp = date.format("%Y%m%d");
    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={stamp}/{stamp}&details={}",
        urlencoding::encode(text),
        urlencoding::encode("Journal entry"),
    )
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

fn escape_text(text: &str) -> String {
    text.replace('\r', "").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{NoteScope, month_day_field, note_key};

    fn store_with_note(day: u32, text: &str) -> RecordStore {
        let mut store = RecordStore::default();
        store.set_note(
            &note_key(NoteScope::Monthly, 0, &month_day_field(day)),
            text.to_string(),
        );
        store
    }

    #[test]
    fn single_note_exports_one_all_day_event() {
        let store = store_with_note(15, "Gym");
        let ics = export_month(&store, 2026, 3).expect("export produced no file");

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("DTSTART;VALUE=DATE:20260315"));
        assert!(ics.contains("DTEND;VALUE=DATE:20260315"));
        assert!(ics.contains("SUMMARY:Gym"));
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.ends_with("END:VCALENDAR"));
        assert!(ics.contains("\r\n"));
    }

    #[test]
    fn empty_month_exports_nothing() {
        let store = RecordStore::default();
        assert_eq!(export_month(&store, 2026, 3), None);
    }

    #[test]
    fn whitespace_only_notes_are_skipped() {
        let store = store_with_note(4, "   \n  ");
        assert_eq!(export_month(&store, 2026, 3), None);
    }

    #[test]
    fn embedded_line_breaks_are_escaped() {
        let store = store_with_note(2, "Dentist\n9 AM");
        let ics = export_month(&store, 2026, 5).expect("export produced no file");
        assert!(ics.contains("SUMMARY:Dentist\\n9 AM"));
        assert!(!ics.contains("SUMMARY:Dentist\n"));
    }

    #[test]
    fn filename_carries_year_and_month() {
        assert_eq!(ics_filename(2026, 3), "journal_2026_3.ics");
        assert_eq!(ics_filename(2026, 12), "journal_2026_12.ics");
    }

    #[test]
    fn event_url_encodes_the_note_text() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let url = calendar_event_url(date, "Gym & Sauna");
        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(url.contains("text=Gym%20%26%20Sauna"));
        assert!(url.contains("dates=20260315/20260315"));
    }

    #[test]
    fn month_lengths_respect_the_calendar() {
        assert_eq!(days_in_month(2026, 2), Some(28));
        assert_eq!(days_in_month(2028, 2), Some(29));
        assert_eq!(days_in_month(2026, 12), Some(31));
        assert_eq!(days_in_month(2026, 13), None);
    }
}
