use crate::errors::AppError;
use crate::export;
use crate::keys::{self, NoteScope};
use crate::metrics;
use crate::models::{
    CalendarLinkResponse, CheckRequest, DEFAULT_MORNING_ROUTINE, DEFAULT_NIGHTLY_ROUTINE,
    DashboardResponse, DateRequest, DayQuery, EntryQuery, EntryResponse, EntrySaveRequest,
    HabitAddRequest, HabitListRequest, HabitListResponse, NoteQuery, NoteResponse,
    NoteSaveRequest, SessionResponse, TargetStatus, ViewRequest, WeeklyResponse,
};
use crate::state::{AppState, Session};
use crate::storage::{RecordStore, persist_store};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, NaiveDate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_index(
        &keys::date_key(session.date),
        session.view.as_str(),
        session.year,
    ))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(session_response(&session))
}

pub async fn switch_view(
    State(state): State<AppState>,
    Json(payload): Json<ViewRequest>,
) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    session.select_view(payload.view);
    Json(session_response(&session))
}

/// Date navigation. A step or jump that would leave the tracked year is a
/// silent no-op: the response carries the unchanged session and the page
/// reverts to it.
pub async fn navigate_date(
    State(state): State<AppState>,
    Json(payload): Json<DateRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    match payload.action.trim() {
        "prev" => {
            session.prev_day();
        }
        "next" => {
            session.next_day();
        }
        "set" => {
            let raw = payload
                .date
                .as_deref()
                .ok_or_else(|| AppError::bad_request("'set' requires a date"))?;
            session.set_date(parse_iso_date(raw)?);
        }
        _ => return Err(AppError::bad_request("action must be 'prev', 'next' or 'set'")),
    }
    Ok(Json(session_response(&session)))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let session = state.session.lock().await;
    let store = state.store.lock().await;

    let entry = store.entry(&keys::date_key(session.date));
    let targets = (1..=3u8)
        .map(|i| TargetStatus {
            text: entry
                .get(&keys::target_field(i))
                .and_then(|v| v.as_str())
                .filter(|t| !t.is_empty())
                .unwrap_or("No target set")
                .to_string(),
            completed: entry
                .get(&keys::target_completed_field(i))
                .and_then(|v| v.as_bool())
                == Some(true),
        })
        .collect::<Vec<_>>();
    let completed_count = targets.iter().filter(|t| t.completed).count() as u32;

    Json(DashboardResponse {
        date: keys::date_key(session.date),
        week_number: session.week_number(),
        completed_count,
        day_streak: metrics::day_streak(&store, session.year_start(), session.date),
        habit_score: metrics::habit_score(&store, session.week_number()),
        targets,
    })
}

pub async fn get_entry(
    State(state): State<AppState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<EntryResponse>, AppError> {
    let session = state.session.lock().await;
    let date = resolve_date(&session, query.date.as_deref())?;
    let store = state.store.lock().await;
    let key = keys::date_key(date);
    Ok(Json(EntryResponse {
        fields: store.entry(&key),
        date: key,
    }))
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntrySaveRequest>,
) -> Result<Json<EntryResponse>, AppError> {
    let session = state.session.lock().await;
    let date = resolve_date(&session, payload.date.as_deref())?;
    drop(session);

    let mut store = state.store.lock().await;
    let key = keys::date_key(date);
    store.upsert_entry(&key, payload.fields);
    persist_store(&state.data_dir, &store).await?;
    Ok(Json(EntryResponse {
        fields: store.entry(&key),
        date: key,
    }))
}

pub async fn get_habits(State(state): State<AppState>) -> Result<Json<HabitListResponse>, AppError> {
    let mut store = state.store.lock().await;
    let seeded = store.remote.habits.is_empty();
    let habits = store.habits();
    if seeded {
        persist_store(&state.data_dir, &store).await?;
    }
    Ok(Json(HabitListResponse { habits }))
}

pub async fn put_habits(
    State(state): State<AppState>,
    Json(payload): Json<HabitListRequest>,
) -> Result<Json<HabitListResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.set_habits(payload.habits);
    persist_store(&state.data_dir, &store).await?;
    Ok(Json(HabitListResponse {
        habits: store.remote.habits.clone(),
    }))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitAddRequest>,
) -> Result<Json<HabitListResponse>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }
    let mut store = state.store.lock().await;
    store.add_habit(name.to_string());
    persist_store(&state.data_dir, &store).await?;
    Ok(Json(HabitListResponse {
        habits: store.remote.habits.clone(),
    }))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<HabitListResponse>, AppError> {
    let mut store = state.store.lock().await;
    if !store.delete_habit(index) {
        return Err(AppError::bad_request("habit index out of bounds"));
    }
    persist_store(&state.data_dir, &store).await?;
    Ok(Json(HabitListResponse {
        habits: store.remote.habits.clone(),
    }))
}

pub async fn get_weekly(State(state): State<AppState>) -> Result<Json<WeeklyResponse>, AppError> {
    let session = state.session.lock().await;
    let week = session.week_number();
    let year_start = session.year_start();
    drop(session);

    let mut store = state.store.lock().await;
    let seeded = store.remote.habits.is_empty();
    let habits = store.habits();
    if seeded {
        persist_store(&state.data_dir, &store).await?;
    }
    Ok(Json(weekly_response(&store, habits, year_start, week)))
}

pub async fn set_weekly_check(
    State(state): State<AppState>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<WeeklyResponse>, AppError> {
    let session = state.session.lock().await;
    let week = session.week_number();
    let year_start = session.year_start();
    drop(session);

    let mut store = state.store.lock().await;
    if !store.set_weekly_check(week, payload.habit_index, payload.day_index, payload.completed) {
        return Err(AppError::bad_request("habit or day index out of bounds"));
    }
    persist_store(&state.data_dir, &store).await?;
    let habits = store.remote.habits.clone();
    Ok(Json(weekly_response(&store, habits, year_start, week)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Query(query): Query<NoteQuery>,
) -> Result<Json<NoteResponse>, AppError> {
    let session = state.session.lock().await;
    let week = session.week_number();
    drop(session);

    let mut store = state.store.lock().await;
    let key = keys::note_key(query.scope, week, &query.field);

    // Strategy routines start from the suggested defaults.
    if query.scope == NoteScope::Strategy && store.note(&key).is_none() {
        let default = match query.field.as_str() {
            "strategy_morning_routine" => Some(DEFAULT_MORNING_ROUTINE),
            "strategy_nightly_routine" => Some(DEFAULT_NIGHTLY_ROUTINE),
            _ => None,
        };
        if let Some(default) = default {
            store.set_note(&key, default.to_string());
            persist_store(&state.data_dir, &store).await?;
        }
    }

    Ok(Json(NoteResponse {
        value: store.note(&key).unwrap_or_default(),
    }))
}

pub async fn save_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteSaveRequest>,
) -> Result<Json<NoteResponse>, AppError> {
    let session = state.session.lock().await;
    let week = session.week_number();
    drop(session);

    let mut store = state.store.lock().await;
    let key = keys::note_key(payload.scope, week, &payload.field);
    store.set_note(&key, payload.value);
    persist_store(&state.data_dir, &store).await?;
    Ok(Json(NoteResponse {
        value: store.note(&key).unwrap_or_default(),
    }))
}

pub async fn export_month(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    let (year, month) = (session.date.year(), session.date.month());
    drop(session);

    let store = state.store.lock().await;
    let Some(ics) = export::export_month(&store, year, month) else {
        return Err(AppError::unprocessable(
            "No events found to export for this month.",
        ));
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::ics_filename(year, month)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar;charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        ics,
    )
        .into_response())
}

pub async fn calendar_link(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<CalendarLinkResponse>, AppError> {
    let session = state.session.lock().await;
    let (year, month) = (session.date.year(), session.date.month());
    drop(session);

    let date = NaiveDate::from_ymd_opt(year, month, query.day)
        .ok_or_else(|| AppError::bad_request("day is outside the current month"))?;

    let store = state.store.lock().await;
    let key = keys::note_key(NoteScope::Monthly, 0, &keys::month_day_field(query.day));
    let text = store.note(&key).unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::unprocessable(
            "Please enter an event description first.",
        ));
    }

    Ok(Json(CalendarLinkResponse {
        url: export::calendar_event_url(date, text),
    }))
}

fn weekly_response(
    store: &RecordStore,
    habits: Vec<String>,
    year_start: NaiveDate,
    week: i64,
) -> WeeklyResponse {
    let checks = store.weekly_checks(week);
    let mut totals = vec![0u32; habits.len()];
    for check in &checks {
        if check.completed && check.habit_index < totals.len() {
            totals[check.habit_index] += 1;
        }
    }
    WeeklyResponse {
        week_number: week,
        insights: metrics::weekly_insights(store, year_start, week),
        habits,
        checks,
        totals,
    }
}

fn session_response(session: &Session) -> SessionResponse {
    SessionResponse {
        view: session.view,
        date: keys::date_key(session.date),
        week_number: session.week_number(),
        year: session.year,
    }
}

fn resolve_date(session: &Session, raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let Some(raw) = raw else {
        return Ok(session.date);
    };
    let date = parse_iso_date(raw)?;
    if date.year() != session.year {
        return Err(AppError::bad_request(format!(
            "date must fall inside {}",
            session.year
        )));
    }
    Ok(date)
}

fn parse_iso_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))
}
