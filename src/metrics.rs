use crate::keys;
use crate::models::WeeklyInsights;
use crate::storage::RecordStore;
use chrono::{Duration, NaiveDate};

const TARGETS_PER_DAY: u8 = 3;

// Everything here recomputes from raw stored records on each call. Habit
// lists and past entries can be edited retroactively, so there are no
// running counters to keep in sync.

/// `round(100 * completed / (habits * 7))`, 0 when the habit list is empty.
pub fn habit_score(store: &RecordStore, week: i64) -> u32 {
    let habit_count = store.remote.habits.len();
    if habit_count == 0 {
        return 0;
    }
    let completed = store
        .weekly_checks(week)
        .iter()
        .filter(|c| c.completed && c.habit_index < habit_count)
        .count();
    let possible = (habit_count * 7) as f64;
    ((completed as f64 / possible) * 100.0).round() as u32
}

/// Consecutive days ending at `date` with at least one completed target.
/// The walk never leaves the tracked year.
pub fn day_streak(store: &RecordStore, year_start: NaiveDate, date: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = date;
    loop {
        if completed_targets_on(store, day) == 0 {
            break;
        }
        streak += 1;
        if day <= year_start {
            break;
        }
        day -= Duration::days(1);
    }
    streak
}

pub fn weekly_insights(store: &RecordStore, year_start: NaiveDate, week: i64) -> WeeklyInsights {
    let habits = &store.remote.habits;
    let mut per_habit = vec![0u32; habits.len()];
    for check in store.weekly_checks(week) {
        if check.completed && check.habit_index < habits.len() {
            per_habit[check.habit_index] += 1;
        }
    }
    // Ties go to the first index.
    let most_consistent_habit = per_habit
        .iter()
        .enumerate()
        .max_by(|(a_idx, a), (b_idx, b)| a.cmp(b).then(b_idx.cmp(a_idx)))
        .filter(|(_, count)| **count > 0)
        .map(|(index, _)| shorten(&habits[index]));

    let start = keys::week_start(year_start, week);
    let mut targets_mastered = 0;
    let mut daily_wins = [0u32; 7];
    for (slot, wins) in daily_wins.iter_mut().enumerate() {
        let day = start + Duration::days(slot as i64);
        *wins = completed_targets_on(store, day);
        targets_mastered += *wins;
    }
    let peak_day = daily_wins
        .iter()
        .enumerate()
        .max_by(|(a_idx, a), (b_idx, b)| a.cmp(b).then(b_idx.cmp(a_idx)))
        .filter(|(_, wins)| **wins > 0)
        .map(|(slot, _)| {
            (start + Duration::days(slot as i64))
                .format("%A")
                .to_string()
        });

    WeeklyInsights {
        habit_score: habit_score(store, week),
        targets_mastered,
        most_consistent_habit,
        peak_day,
    }
}

pub fn completed_targets_on(store: &RecordStore, date: NaiveDate) -> u32 {
    let key = keys::date_key(date);
    let Some(entry) = store.remote.days.get(&key) else {
        return 0;
    };
    (1..=TARGETS_PER_DAY)
        .filter(|i| {
            entry
                .get(&keys::target_completed_field(*i))
                .and_then(|v| v.as_bool())
                == Some(true)
        })
        .count() as u32
}

fn shorten(name: &str) -> String {
    if name.chars().count() > 20 {
        let head: String = name.chars().take(17).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldMap;
    use serde_json::json;

    fn year_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn complete_target(store: &mut RecordStore, date: NaiveDate, target: u8) {
        store.upsert_entry(
            &keys::date_key(date),
            FieldMap::from([(keys::target_completed_field(target), json!(true))]),
        );
    }

    #[test]
    fn habit_score_rounds_completed_over_possible() {
        let mut store = RecordStore::default();
        store.set_habits((0..7).map(|i| format!("Habit {i}")).collect());
        for i in 0..5 {
            assert!(store.set_weekly_check(1, i, i, true));
        }
        // 5 of 49 checks -> 10%.
        assert_eq!(habit_score(&store, 1), 10);
    }

    #[test]
    fn habit_score_is_zero_without_habits() {
        let store = RecordStore::default();
        assert_eq!(habit_score(&store, 1), 0);
    }

    #[test]
    fn habit_score_ignores_unchecked_boxes() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["A".into(), "B".into()]);
        assert!(store.set_weekly_check(2, 0, 0, true));
        assert!(store.set_weekly_check(2, 1, 0, false));
        // 1 of 14 -> 7%.
        assert_eq!(habit_score(&store, 2), 7);
    }

    #[test]
    fn streak_counts_consecutive_days_with_a_completed_target() {
        let mut store = RecordStore::default();
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        complete_target(&mut store, date, 1);
        complete_target(&mut store, date - Duration::days(1), 2);
        complete_target(&mut store, date - Duration::days(2), 3);
        // Gap at day -3, then another completed day further back.
        complete_target(&mut store, date - Duration::days(4), 1);

        assert_eq!(day_streak(&store, year_start(), date), 3);
        assert_eq!(day_streak(&store, year_start(), date - Duration::days(3)), 0);
        assert_eq!(day_streak(&store, year_start(), date - Duration::days(4)), 1);
    }

    #[test]
    fn streak_is_zero_when_nothing_was_completed() {
        let store = RecordStore::default();
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(day_streak(&store, year_start(), date), 0);
    }

    #[test]
    fn streak_stops_at_the_year_start() {
        let mut store = RecordStore::default();
        let start = year_start();
        complete_target(&mut store, start, 1);
        complete_target(&mut store, start + Duration::days(1), 1);
        // A completed day in the prior year must not extend the streak.
        complete_target(&mut store, start - Duration::days(1), 1);

        assert_eq!(day_streak(&store, start, start + Duration::days(1)), 2);
    }

    #[test]
    fn insights_pick_first_habit_on_ties() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["First".into(), "Second".into()]);
        assert!(store.set_weekly_check(1, 0, 0, true));
        assert!(store.set_weekly_check(1, 1, 1, true));

        let insights = weekly_insights(&store, year_start(), 1);
        assert_eq!(insights.most_consistent_habit.as_deref(), Some("First"));
    }

    #[test]
    fn insights_report_none_when_nothing_is_checked() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["A".into()]);
        let insights = weekly_insights(&store, year_start(), 1);
        assert_eq!(insights.most_consistent_habit, None);
        assert_eq!(insights.peak_day, None);
        assert_eq!(insights.targets_mastered, 0);
        assert_eq!(insights.habit_score, 0);
    }

    #[test]
    fn insights_week_is_anchored_at_the_year_start() {
        let mut store = RecordStore::default();
        // 2026-01-01 is a Thursday, so week 1 runs Thu..Wed.
        let start = year_start();
        complete_target(&mut store, start, 1);
        complete_target(&mut store, start, 2);
        complete_target(&mut store, start + Duration::days(6), 1);

        let insights = weekly_insights(&store, start, 1);
        assert_eq!(insights.targets_mastered, 3);
        assert_eq!(insights.peak_day.as_deref(), Some("Thursday"));
    }

    #[test]
    fn long_habit_names_are_shortened_in_insights() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["Quality Time with Family/Friends".into()]);
        assert!(store.set_weekly_check(1, 0, 0, true));

        let insights = weekly_insights(&store, year_start(), 1);
        assert_eq!(
            insights.most_consistent_habit.as_deref(),
            Some("Quality Time with...")
        );
    }
}
