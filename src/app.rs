use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/session", get(handlers::get_session))
        .route("/api/view", post(handlers::switch_view))
        .route("/api/date", post(handlers::navigate_date))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/entry", get(handlers::get_entry).post(handlers::save_entry))
        .route(
            "/api/habits",
            get(handlers::get_habits)
                .put(handlers::put_habits)
                .post(handlers::add_habit),
        )
        .route("/api/habits/:index", delete(handlers::delete_habit))
        .route("/api/weekly", get(handlers::get_weekly))
        .route("/api/weekly/check", post(handlers::set_weekly_check))
        .route("/api/note", get(handlers::get_note).post(handlers::save_note))
        .route("/api/export/month", get(handlers::export_month))
        .route("/api/calendar-link", get(handlers::calendar_link))
        .with_state(state)
}
