use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    catalog,
    content::{self, ContentPart, ContentResponse, RegeneratedPart},
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics/{topic_id}/content", get(topic_content))
        .route("/topics/{topic_id}/regenerate", post(regenerate))
}

async fn list_topics() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "chapters": catalog::CHAPTERS,
        "topics": catalog::TOPICS,
    }))
}

async fn topic_content(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<Json<ContentResponse>, AppError> {
    let topic =
        catalog::lookup_topic(&topic_id).ok_or(AppError::NotFound("unknown topic"))?;

    let response = content::get_or_create(&state.db, &state.generators, topic)
        .await
        .reject("could not build topic content")?;

    Ok(Json(response))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegenerateBody {
    part: ContentPart,
    #[serde(default)]
    problem_index: usize,
}

async fn regenerate(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
    Json(body): Json<RegenerateBody>,
) -> Result<Json<RegeneratedPart>, AppError> {
    let topic =
        catalog::lookup_topic(&topic_id).ok_or(AppError::NotFound("unknown topic"))?;

    let part = content::regenerate_part(
        &state.db,
        &state.generators,
        topic,
        body.part,
        body.problem_index,
    )
    .await
    .reject("could not regenerate content part")?
    .ok_or(AppError::NotFound("topic has no content to regenerate"))?;

    Ok(Json(part))
}
