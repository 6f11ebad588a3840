use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use promptstash_db::CategoryRow;

use super::{internal_error, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryRow>>, (StatusCode, String)> {
    let categories = state.db.categories().list().map_err(internal_error)?;

    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryRow>), (StatusCode, String)> {
    let category = state
        .db
        .categories()
        .create(&req.name)
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut categories = state.db.categories();

    if categories.get(id).map_err(internal_error)?.is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Category {} not found", id)));
    }

    categories.delete(id).map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
