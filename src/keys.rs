use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const WEEKLY_PREFIX: &str = "weekly_v1";
pub const STRATEGY_PREFIX: &str = "strategy_v1";
pub const MONTHLY_PREFIX: &str = "monthly_v1";
pub const ROADMAP_PREFIX: &str = "roadmap_v1";

/// Scopes for free-form notes kept in the local store.
///
/// Monthly and roadmap keys carry no date component: monthly notes are shared
/// across all months and the roadmap is a single 13-week plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteScope {
    Strategy,
    Monthly,
    Roadmap,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 1-based count of 7-day blocks elapsed since the tracked year's first day.
pub fn week_number(year_start: NaiveDate, date: NaiveDate) -> i64 {
    (date - year_start).num_days().div_euclid(7) + 1
}

/// First day of the given week block. Day 0 of every week falls on whatever
/// weekday the tracked year starts on, not on a calendar-week boundary.
pub fn week_start(year_start: NaiveDate, week: i64) -> NaiveDate {
    year_start + Duration::days((week - 1) * 7)
}

pub fn weekly_check_key(week: i64, habit_index: usize, day_index: usize) -> String {
    format!("{WEEKLY_PREFIX}_w{week}_habit_{habit_index}_day_{day_index}")
}

pub fn parse_weekly_check_key(key: &str) -> Option<(i64, usize, usize)> {
    let rest = key.strip_prefix(WEEKLY_PREFIX)?.strip_prefix("_w")?;
    let (week, rest) = rest.split_once("_habit_")?;
    let (habit, day) = rest.split_once("_day_")?;
    Some((week.parse().ok()?, habit.parse().ok()?, day.parse().ok()?))
}

pub fn note_key(scope: NoteScope, week: i64, field: &str) -> String {
    match scope {
        NoteScope::Strategy => format!("w{week}_{STRATEGY_PREFIX}_{field}"),
        NoteScope::Monthly => format!("{MONTHLY_PREFIX}_{field}"),
        NoteScope::Roadmap => format!("{ROADMAP_PREFIX}_{field}"),
    }
}

pub fn target_field(index: u8) -> String {
    format!("target_{index}")
}

pub fn target_completed_field(index: u8) -> String {
    format!("target_{index}_completed")
}

/// Field name for a day slot in the monthly grid (`day_01`..`day_31`).
pub fn month_day_field(day: u32) -> String {
    format!("day_{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan1() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn week_number_is_stable_within_a_block() {
        let start = jan1();
        for offset in 0..7 {
            let date = start + Duration::days(offset);
            assert_eq!(week_number(start, date), 1);
        }
        assert_eq!(week_number(start, start + Duration::days(7)), 2);
        assert_eq!(week_number(start, start + Duration::days(13)), 2);
        assert_eq!(week_number(start, start + Duration::days(14)), 3);
    }

    #[test]
    fn week_start_inverts_week_number() {
        let start = jan1();
        for week in 1..=13 {
            let first = week_start(start, week);
            assert_eq!(week_number(start, first), week);
        }
    }

    #[test]
    fn weekly_check_key_round_trips() {
        let key = weekly_check_key(4, 2, 6);
        assert_eq!(key, "weekly_v1_w4_habit_2_day_6");
        assert_eq!(parse_weekly_check_key(&key), Some((4, 2, 6)));
        assert_eq!(parse_weekly_check_key("weekly_v1_w4_habit_x_day_6"), None);
        assert_eq!(parse_weekly_check_key("roadmap_v1_main_goal"), None);
    }

    #[test]
    fn note_keys_do_not_collide_across_scopes() {
        let strategy = note_key(NoteScope::Strategy, 3, "notes");
        let monthly = note_key(NoteScope::Monthly, 3, "notes");
        let roadmap = note_key(NoteScope::Roadmap, 3, "notes");
        assert_eq!(strategy, "w3_strategy_v1_notes");
        assert_eq!(monthly, "monthly_v1_notes");
        assert_eq!(roadmap, "roadmap_v1_notes");
        assert_ne!(strategy, monthly);
        assert_ne!(monthly, roadmap);
    }

    #[test]
    fn note_keys_are_deterministic() {
        assert_eq!(
            note_key(NoteScope::Strategy, 7, "weekly_milestone_2"),
            note_key(NoteScope::Strategy, 7, "weekly_milestone_2"),
        );
    }

    #[test]
    fn field_helpers_match_stored_layout() {
        assert_eq!(target_field(1), "target_1");
        assert_eq!(target_completed_field(3), "target_3_completed");
        assert_eq!(month_day_field(5), "day_05");
        assert_eq!(month_day_field(15), "day_15");
    }
}
