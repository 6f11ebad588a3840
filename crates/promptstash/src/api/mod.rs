mod categories;
mod prompts;


use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use promptstash_db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub fn create_router(db: Arc<Database>, ui_dir: &Path) -> Router {
    let state = AppState { db };

    Router::new()
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/api/categories/{id}", delete(categories::delete_category))
        .route(
            "/api/prompts",
            get(prompts::list_prompts).post(prompts::create_prompt),
        )
        .route(
            "/api/prompts/{id}",
            put(prompts::update_prompt).delete(prompts::delete_prompt),
        )
        .route_service("/", ServeFile::new(ui_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(ui_dir.join("static")))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map a storage failure to a 500, logging the underlying error.
fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    tracing::error!("storage error: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
