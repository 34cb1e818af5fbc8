pub mod app;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod keys;
pub mod metrics;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_store, resolve_data_dir};
