//! Read-side rollups and write-side batch actions over the whole corpus.

use color_eyre::Result;
use serde::Serialize;

use crate::db::Db;
use crate::models::ContentStats;
use crate::names;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedTopic {
    pub topic_id: String,
    pub quality_score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub reviewed: Vec<ReviewedTopic>,
    pub failed: usize,
}

pub async fn content_stats(db: &Db) -> Result<ContentStats> {
    let row = db.content_stats_row().await?;
    let topics_needing_attention = db
        .topics_needing_attention(names::ATTENTION_QUALITY_THRESHOLD)
        .await?;

    Ok(ContentStats {
        total_topics: row.total_topics,
        reviewed_topics: row.reviewed_topics,
        avg_version: row.avg_version,
        total_questions: row.total_questions,
        avg_quality: row.avg_quality,
        topics_needing_attention,
    })
}

/// Recompute one topic's content quality as the mean of its pool's scores
/// and stamp it reviewed. An empty pool reviews to the unscored default.
pub async fn review_topic_quality(db: &Db, topic_id: &str) -> Result<f64> {
    let bank = db.bank(topic_id).await?;
    let quality_score = if bank.questions.is_empty() {
        names::UNSCORED_QUALITY
    } else {
        bank.questions.iter().map(|q| q.quality_score).sum::<f64>() / bank.questions.len() as f64
    };

    db.mark_reviewed(topic_id, quality_score).await?;
    Ok(quality_score)
}

/// Bulk review across every topic that has content. Per-topic failures are
/// counted, not fatal.
pub async fn review_all(db: &Db) -> Result<ReviewOutcome> {
    let mut outcome = ReviewOutcome {
        reviewed: Vec::new(),
        failed: 0,
    };

    for record in db.all_content().await? {
        match review_topic_quality(db, &record.topic_id).await {
            Ok(quality_score) => outcome.reviewed.push(ReviewedTopic {
                topic_id: record.topic_id,
                quality_score,
            }),
            Err(e) => {
                tracing::error!("quality review failed for {}: {e}", record.topic_id);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
