use crate::errors::AppError;
use crate::keys;
use crate::models::{DEFAULT_HABITS, FieldMap, LocalData, RemoteData, WeeklyCheck};
use serde::de::DeserializeOwned;
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::error;

const REMOTE_FILE: &str = "remote.json";
const LOCAL_FILE: &str = "local.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Remote,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    DailyEntry,
    HabitList,
    WeeklyCheck,
    StrategyNote,
    MonthlyNote,
    RoadmapNote,
}

/// Policy table routing each data category to its backend. Structured records
/// live in the remote store, free-form note text in the local one.
pub fn backend_for(category: Category) -> Backend {
    match category {
        Category::DailyEntry | Category::HabitList | Category::WeeklyCheck => Backend::Remote,
        Category::StrategyNote | Category::MonthlyNote | Category::RoadmapNote => Backend::Local,
    }
}

/// Both backends behind one interface. All mutations are in-memory; callers
/// persist after a confirmed change.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub remote: RemoteData,
    pub local: LocalData,
}

impl RecordStore {
    /// Cloned field map for a date, empty when no entry exists yet.
    pub fn entry(&self, date_key: &str) -> FieldMap {
        self.remote.days.get(date_key).cloned().unwrap_or_default()
    }

    /// Merge-upsert: creates the record if absent, last write wins per field.
    pub fn upsert_entry(&mut self, date_key: &str, fields: FieldMap) {
        let entry = self.remote.days.entry(date_key.to_string()).or_default();
        for (field, value) in fields {
            entry.insert(field, value);
        }
    }

    /// The habit list, seeded with defaults on first access.
    pub fn habits(&mut self) -> Vec<String> {
        if self.remote.habits.is_empty() {
            self.remote.habits = DEFAULT_HABITS.iter().map(|h| h.to_string()).collect();
        }
        self.remote.habits.clone()
    }

    pub fn set_habits(&mut self, habits: Vec<String>) {
        self.remote.habits = habits;
    }

    pub fn add_habit(&mut self, name: String) {
        self.habits();
        self.remote.habits.push(name);
    }

    /// Removes the habit at `index` and re-keys every stored weekly check so
    /// checks stay attached to the habit they were recorded for: checks of
    /// the deleted index are dropped, higher indices shift down by one.
    pub fn delete_habit(&mut self, index: usize) -> bool {
        if index >= self.remote.habits.len() {
            return false;
        }
        self.remote.habits.remove(index);

        let mut rekeyed = std::collections::BTreeMap::new();
        for (key, completed) in &self.remote.checks {
            let Some((week, habit, day)) = keys::parse_weekly_check_key(key) else {
                continue;
            };
            if habit == index {
                continue;
            }
            let habit = if habit > index { habit - 1 } else { habit };
            rekeyed.insert(keys::weekly_check_key(week, habit, day), *completed);
        }
        self.remote.checks = rekeyed;
        true
    }

    pub fn weekly_checks(&self, week: i64) -> Vec<WeeklyCheck> {
        self.remote
            .checks
            .iter()
            .filter_map(|(key, completed)| {
                let (w, habit_index, day_index) = keys::parse_weekly_check_key(key)?;
                (w == week).then_some(WeeklyCheck {
                    habit_index,
                    day_index,
                    completed: *completed,
                })
            })
            .collect()
    }

    /// Returns false when the indices fall outside the current habit list or
    /// the 7-day week.
    pub fn set_weekly_check(
        &mut self,
        week: i64,
        habit_index: usize,
        day_index: usize,
        completed: bool,
    ) -> bool {
        if week < 1 || habit_index >= self.remote.habits.len() || day_index > 6 {
            return false;
        }
        self.remote
            .checks
            .insert(keys::weekly_check_key(week, habit_index, day_index), completed);
        true
    }

    pub fn note(&self, key: &str) -> Option<String> {
        self.local.values.get(key).cloned()
    }

    pub fn set_note(&mut self, key: &str, value: String) {
        self.local.values.insert(key.to_string(), value);
    }
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("APP_DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("data")
}

pub async fn load_store(dir: &Path) -> RecordStore {
    RecordStore {
        remote: load_json(&dir.join(REMOTE_FILE)).await,
        local: load_json(&dir.join(LOCAL_FILE)).await,
    }
}

async fn load_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse {}: {err}", path.display());
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            T::default()
        }
    }
}

pub async fn persist_store(dir: &Path, store: &RecordStore) -> Result<(), AppError> {
    let remote = serde_json::to_vec_pretty(&store.remote).map_err(AppError::internal)?;
    let local = serde_json::to_vec_pretty(&store.local).map_err(AppError::internal)?;
    fs::write(dir.join(REMOTE_FILE), remote)
        .await
        .map_err(AppError::internal)?;
    fs::write(dir.join(LOCAL_FILE), local)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn policy_table_routes_structured_records_to_remote() {
        assert_eq!(backend_for(Category::DailyEntry), Backend::Remote);
        assert_eq!(backend_for(Category::HabitList), Backend::Remote);
        assert_eq!(backend_for(Category::WeeklyCheck), Backend::Remote);
        assert_eq!(backend_for(Category::StrategyNote), Backend::Local);
        assert_eq!(backend_for(Category::MonthlyNote), Backend::Local);
        assert_eq!(backend_for(Category::RoadmapNote), Backend::Local);
    }

    #[test]
    fn upsert_merges_fields_per_key() {
        let mut store = RecordStore::default();
        store.upsert_entry(
            "2026-03-05",
            FieldMap::from([("target_1".into(), json!("Morning run"))]),
        );
        store.upsert_entry(
            "2026-03-05",
            FieldMap::from([
                ("target_1_completed".into(), json!(true)),
                ("target_1".into(), json!("Morning jog")),
            ]),
        );

        let entry = store.entry("2026-03-05");
        assert_eq!(entry.get("target_1"), Some(&json!("Morning jog")));
        assert_eq!(entry.get("target_1_completed"), Some(&json!(true)));
        assert!(store.entry("2026-03-06").is_empty());
    }

    #[test]
    fn habit_list_is_seeded_on_first_access() {
        let mut store = RecordStore::default();
        let habits = store.habits();
        assert_eq!(habits.len(), 7);
        assert_eq!(habits[0], "Daily Exercise / Movement");
        // Subsequent access returns the stored list, not a fresh seed.
        store.set_habits(vec!["Stretch".into()]);
        assert_eq!(store.habits(), vec!["Stretch".to_string()]);
    }

    #[test]
    fn delete_habit_preserves_order_and_reindexes_checks() {
        let mut store = RecordStore::default();
        store.set_habits(vec![
            "A".into(),
            "B".into(),
            "C".into(),
            "D".into(),
            "E".into(),
        ]);
        assert!(store.set_weekly_check(1, 1, 0, true));
        assert!(store.set_weekly_check(1, 2, 3, true));
        assert!(store.set_weekly_check(1, 3, 4, true));
        assert!(store.set_weekly_check(2, 4, 6, true));

        assert!(store.delete_habit(2));
        assert_eq!(
            store.remote.habits,
            vec!["A".to_string(), "B".into(), "D".into(), "E".into()]
        );

        let week1 = store.weekly_checks(1);
        assert_eq!(week1.len(), 2);
        assert!(week1.iter().any(|c| c.habit_index == 1 && c.day_index == 0));
        // The check recorded for "D" (index 3) now lives at index 2.
        assert!(week1.iter().any(|c| c.habit_index == 2 && c.day_index == 4));
        // "C"'s check is gone.
        assert!(!week1.iter().any(|c| c.day_index == 3));

        let week2 = store.weekly_checks(2);
        assert_eq!(week2.len(), 1);
        assert_eq!(week2[0].habit_index, 3);
    }

    #[test]
    fn delete_habit_rejects_out_of_bounds_index() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["A".into()]);
        assert!(!store.delete_habit(1));
        assert_eq!(store.remote.habits.len(), 1);
    }

    #[test]
    fn weekly_check_bounds_are_enforced() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["A".into(), "B".into()]);
        assert!(store.set_weekly_check(1, 1, 6, true));
        assert!(!store.set_weekly_check(1, 2, 0, true));
        assert!(!store.set_weekly_check(1, 0, 7, true));
        assert!(!store.set_weekly_check(0, 0, 0, true));
    }

    #[test]
    fn weekly_checks_are_scoped_to_their_week() {
        let mut store = RecordStore::default();
        store.set_habits(vec!["A".into()]);
        assert!(store.set_weekly_check(3, 0, 1, true));
        assert!(store.set_weekly_check(4, 0, 1, false));

        let week3 = store.weekly_checks(3);
        assert_eq!(week3.len(), 1);
        assert!(week3[0].completed);
        let week4 = store.weekly_checks(4);
        assert_eq!(week4.len(), 1);
        assert!(!week4[0].completed);
        assert!(store.weekly_checks(5).is_empty());
    }

    #[test]
    fn notes_round_trip_through_the_local_store() {
        let mut store = RecordStore::default();
        assert_eq!(store.note("roadmap_v1_roadmap_main_goal"), None);
        store.set_note("roadmap_v1_roadmap_main_goal", "Run a half marathon".into());
        assert_eq!(
            store.note("roadmap_v1_roadmap_main_goal"),
            Some("Run a half marathon".to_string())
        );
    }
}
