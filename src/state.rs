use crate::storage::RecordStore;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Daily,
    Monthly,
    Strategy,
    Weekly,
    Roadmap,
    Help,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Daily => "daily",
            View::Monthly => "monthly",
            View::Strategy => "strategy",
            View::Weekly => "weekly",
            View::Roadmap => "roadmap",
            View::Help => "help",
        }
    }
}

/// Current view and selected date. The date never leaves the tracked year;
/// navigation that would cross the boundary is a no-op.
#[derive(Debug, Clone)]
pub struct Session {
    pub view: View,
    pub date: NaiveDate,
    pub year: i32,
}

impl Session {
    pub fn new(year: i32) -> Self {
        let mut session = Self {
            view: View::Dashboard,
            date: Local::now().date_naive(),
            year,
        };
        session.date = session.clamp(session.date);
        session
    }

    pub fn year_start(&self) -> NaiveDate {
        // Jan 1 / Dec 31 exist for every year.
        NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap_or_default()
    }

    pub fn year_end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 12, 31).unwrap_or_default()
    }

    pub fn week_number(&self) -> i64 {
        crate::keys::week_number(self.year_start(), self.date)
    }

    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    /// Returns whether the date actually moved.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        if date.year() != self.year {
            return false;
        }
        self.date = date;
        true
    }

    pub fn prev_day(&mut self) -> bool {
        self.set_date(self.date - Duration::days(1))
    }

    pub fn next_day(&mut self) -> bool {
        self.set_date(self.date + Duration::days(1))
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.year_start(), self.year_end())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub store: Arc<Mutex<RecordStore>>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, store: RecordStore, year: i32) -> Self {
        Self {
            data_dir,
            store: Arc::new(Mutex::new(store)),
            session: Arc::new(Mutex::new(Session::new(year))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(year: i32, month: u32, day: u32) -> Session {
        let mut session = Session::new(year);
        session.date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        session
    }

    #[test]
    fn date_navigation_stops_at_year_boundaries() {
        let mut session = session_at(2026, 1, 1);
        assert!(!session.prev_day());
        assert_eq!(session.date, session.year_start());

        session.date = session.year_end();
        assert!(!session.next_day());
        assert_eq!(session.date, session.year_end());
    }

    #[test]
    fn date_navigation_moves_within_the_year() {
        let mut session = session_at(2026, 6, 15);
        assert!(session.next_day());
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2026, 6, 16).unwrap());
        assert!(session.prev_day());
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2026, 6, 15).unwrap());
    }

    #[test]
    fn set_date_rejects_other_years() {
        let mut session = session_at(2026, 6, 15);
        assert!(!session.set_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!session.set_date(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()));
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2026, 6, 15).unwrap());
    }

    #[test]
    fn week_number_follows_selected_date() {
        let mut session = session_at(2026, 1, 1);
        assert_eq!(session.week_number(), 1);
        session.date = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        assert_eq!(session.week_number(), 2);
    }
}
