use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::{
    catalog, enhance, manage,
    manage::ReviewOutcome,
    models::{ContentStats, EnhanceOptions, EnhanceOutcome},
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(stats))
        .route("/admin/enhance/{topic_id}", post(enhance_topic))
        .route("/admin/enhance-all", post(enhance_all))
        .route("/admin/review-quality", post(review_quality))
        .route("/admin/backup", post(backup))
}

async fn stats(State(state): State<AppState>) -> Result<Json<ContentStats>, AppError> {
    let stats = manage::content_stats(&state.db)
        .await
        .reject("could not compute content stats")?;

    Ok(Json(stats))
}

async fn enhance_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
    Json(options): Json<EnhanceOptions>,
) -> Result<Json<EnhanceOutcome>, AppError> {
    let topic =
        catalog::lookup_topic(&topic_id).ok_or(AppError::NotFound("unknown topic"))?;

    let outcome = enhance::run_enhancement(&state.db, &state.generators, topic, options)
        .await
        .reject("enhancement run failed")?;

    Ok(Json(outcome))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicEnhanceOutcome {
    topic_id: &'static str,
    #[serde(flatten)]
    outcome: EnhanceOutcome,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnhanceAllOutcome {
    topics: Vec<TopicEnhanceOutcome>,
    failed: usize,
}

/// Run enhancement over the entire catalog with default options, one
/// topic at a time. Per-topic failures are counted and the sweep carries on.
async fn enhance_all(State(state): State<AppState>) -> Json<EnhanceAllOutcome> {
    let options = EnhanceOptions::default();
    let mut result = EnhanceAllOutcome {
        topics: Vec::new(),
        failed: 0,
    };

    for topic in catalog::TOPICS {
        match enhance::run_enhancement(&state.db, &state.generators, topic, options).await {
            Ok(outcome) => result.topics.push(TopicEnhanceOutcome {
                topic_id: topic.id,
                outcome,
            }),
            Err(e) => {
                tracing::error!("enhancement failed for {}: {e}", topic.id);
                result.failed += 1;
            }
        }
    }

    Json(result)
}

async fn review_quality(
    State(state): State<AppState>,
) -> Result<Json<ReviewOutcome>, AppError> {
    let outcome = manage::review_all(&state.db)
        .await
        .reject("bulk quality review failed")?;

    Ok(Json(outcome))
}

async fn backup(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let backup_id = state
        .db
        .backup_all()
        .await
        .reject("could not write backup")?;

    Ok(Json(serde_json::json!({ "backupId": backup_id })))
}
