use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    catalog,
    models::TopicProgress,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/topics/{topic_id}/progress",
            get(get_progress).post(record_attempt),
        )
        .route(
            "/topics/{topic_id}/questions/{question_id}/rating",
            post(rate_question),
        )
}

async fn get_progress(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<Json<TopicProgress>, AppError> {
    let topic =
        catalog::lookup_topic(&topic_id).ok_or(AppError::NotFound("unknown topic"))?;

    let progress = state
        .db
        .progress(topic.id)
        .await
        .reject("could not load progress")?;

    Ok(Json(progress))
}

#[derive(Deserialize)]
struct AttemptBody {
    correct: bool,
}

async fn record_attempt(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
    Json(body): Json<AttemptBody>,
) -> Result<Json<TopicProgress>, AppError> {
    let topic =
        catalog::lookup_topic(&topic_id).ok_or(AppError::NotFound("unknown topic"))?;

    let progress = state
        .db
        .record_attempt(topic.id, body.correct)
        .await
        .reject("could not record attempt")?;

    Ok(Json(progress))
}

#[derive(Deserialize)]
struct RatingBody {
    rating: i64,
}

async fn rate_question(
    State(state): State<AppState>,
    Path((topic_id, question_id)): Path<(String, String)>,
    Json(body): Json<RatingBody>,
) -> Result<StatusCode, AppError> {
    let topic =
        catalog::lookup_topic(&topic_id).ok_or(AppError::NotFound("unknown topic"))?;

    if !(1..=5).contains(&body.rating) {
        return Err(AppError::Input("rating must be between 1 and 5"));
    }

    state
        .db
        .rate_entry(topic.id, &question_id, body.rating)
        .await
        .reject("could not record rating")?;

    Ok(StatusCode::NO_CONTENT)
}
