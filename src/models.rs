use crate::keys::NoteScope;
use crate::state::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Arbitrary per-day record fields: target texts, completion flags, gratitude
/// and reflection entries, half-hour timeline slots.
pub type FieldMap = BTreeMap<String, Value>;

pub const DEFAULT_HABITS: [&str; 7] = [
    "Daily Exercise / Movement",
    "Read 20 Mins / Learn Skill",
    "Mindfulness / Meditation",
    "Quality Time with Family/Friends",
    "Hydration (8 Glasses)",
    "Plan Tomorrow's Priorities",
    "Review Finances / Budget",
];

pub const DEFAULT_MORNING_ROUTINE: &str = "1. Hydrate & Make Bed\n2. 10 Mins Meditation/Mindfulness\n3. 30 Mins Exercise\n4. Review Daily Targets";
pub const DEFAULT_NIGHTLY_ROUTINE: &str = "1. Disconnect from Screens\n2. 15 Mins Reading\n3. Plan Tomorrow's 3 Targets\n4. Reflect on 3 Wins Today";

/// Per-day entry records plus the habit list and weekly checks. Mirrors the
/// remote backend's record layout.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteData {
    pub days: BTreeMap<String, FieldMap>,
    pub habits: Vec<String>,
    pub checks: BTreeMap<String, bool>,
}

/// Flat string key/value map for free-form notes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalData {
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyCheck {
    pub habit_index: usize,
    pub day_index: usize,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub action: String,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntrySaveRequest {
    pub date: Option<String>,
    pub fields: FieldMap,
}

#[derive(Debug, Deserialize)]
pub struct HabitListRequest {
    pub habits: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HabitAddRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub habit_index: usize,
    pub day_index: usize,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NoteSaveRequest {
    pub scope: NoteScope,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: u32,
}

#[derive(Debug, Deserialize)]
pub struct NoteQuery {
    pub scope: NoteScope,
    pub field: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub view: View,
    pub date: String,
    pub week_number: i64,
    pub year: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub date: String,
    pub fields: FieldMap,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitListResponse {
    pub habits: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TargetStatus {
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: String,
    pub week_number: i64,
    pub targets: Vec<TargetStatus>,
    pub completed_count: u32,
    pub day_streak: u32,
    pub habit_score: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyInsights {
    pub habit_score: u32,
    pub targets_mastered: u32,
    pub most_consistent_habit: Option<String>,
    pub peak_day: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyResponse {
    pub week_number: i64,
    pub habits: Vec<String>,
    pub checks: Vec<WeeklyCheck>,
    pub totals: Vec<u32>,
    pub insights: WeeklyInsights,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarLinkResponse {
    pub url: String,
}
