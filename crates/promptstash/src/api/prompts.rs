//! Prompt CRUD handlers.
//!
//! Updates are patches: only the fields present in the JSON body change.
//! For `category_id` an absent field leaves the category alone, while an
//! explicit `null` clears it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Deserializer};

use promptstash_db::{PromptPatch, PromptRow};

use super::{internal_error, AppState};

#[derive(Debug, Deserialize)]
pub struct ListPromptsQuery {
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePromptRequest {
    pub name: String,
    pub contents: String,
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePromptRequest {
    pub name: Option<String>,
    pub contents: Option<String>,
    #[serde(default, deserialize_with = "patch_field")]
    pub category_id: Option<Option<i64>>,
}

/// Deserialize a field that was present, keeping `null` distinct from absent.
fn patch_field<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

pub async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<ListPromptsQuery>,
) -> Result<Json<Vec<PromptRow>>, (StatusCode, String)> {
    let prompts = state
        .db
        .prompts()
        .list(query.category_id)
        .map_err(internal_error)?;

    Ok(Json(prompts))
}

pub async fn create_prompt(
    State(state): State<AppState>,
    Json(req): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptRow>), (StatusCode, String)> {
    let prompt = state
        .db
        .prompts()
        .create(&req.name, &req.contents, req.category_id)
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(prompt)))
}

pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePromptRequest>,
) -> Result<Json<PromptRow>, (StatusCode, String)> {
    let prompts = state.db.prompts();

    if prompts.get(id).map_err(internal_error)?.is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Prompt {} not found", id)));
    }

    let patch = PromptPatch {
        name: req.name,
        contents: req.contents,
        category_id: req.category_id,
    };

    let prompt = prompts
        .update(id, &patch)
        .map_err(internal_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Prompt {} not found", id)))?;

    Ok(Json(prompt))
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let prompts = state.db.prompts();

    if prompts.get(id).map_err(internal_error)?.is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Prompt {} not found", id)));
    }

    prompts.delete(id).map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
