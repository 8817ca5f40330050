use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::video::{AnalysisRecord, RawVideoRecord};

/// Channel-wide comparison statistics across a set of analyzed videos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_videos: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub average_views: f64,
    pub average_likes: f64,
    pub average_engagement: f64,
    pub top_performer: Option<AnalysisRecord>,
    pub best_engagement: Option<AnalysisRecord>,
}

/// Normalize at most `limit` raw records, in order, as of right now.
pub fn analyze(raw_records: &[RawVideoRecord], limit: usize) -> Result<Vec<AnalysisRecord>> {
    analyze_at(raw_records, limit, Utc::now())
}

/// Like [`analyze`] with an explicit analysis instant.
pub fn analyze_at(
    raw_records: &[RawVideoRecord],
    limit: usize,
    now: DateTime<Utc>,
) -> Result<Vec<AnalysisRecord>> {
    raw_records
        .iter()
        .take(limit)
        .map(|raw| raw.normalize(now))
        .collect()
}

/// The most viewed record. Ties go to the earliest one.
pub fn top_performer(records: &[AnalysisRecord]) -> Option<&AnalysisRecord> {
    let (first, rest) = records.split_first()?;
    Some(rest.iter().fold(first, |top, r| if top.views < r.views { r } else { top }))
}

/// The record with the highest engagement rate. Ties go to the earliest one.
pub fn best_engagement(records: &[AnalysisRecord]) -> Option<&AnalysisRecord> {
    let (first, rest) = records.split_first()?;
    Some(rest.iter().fold(first, |best, r| {
        if r.engagement_rate > best.engagement_rate { r } else { best }
    }))
}

pub fn comparison_summary(records: &[AnalysisRecord]) -> ComparisonSummary {
    if records.is_empty() {
        return ComparisonSummary::default();
    }

    let count = records.len();
    let total = |counter: fn(&AnalysisRecord) -> u64| {
        records.iter().map(counter).fold(0u64, u64::saturating_add)
    };
    let total_views = total(|r| r.views);
    let total_likes = total(|r| r.likes);
    let total_comments = total(|r| r.comments);
    let engagement_sum: f64 = records.iter().map(|r| r.engagement_rate).sum();

    ComparisonSummary {
        total_videos: count,
        total_views,
        total_likes,
        total_comments,
        average_views: total_views as f64 / count as f64,
        average_likes: total_likes as f64 / count as f64,
        average_engagement: engagement_sum / count as f64,
        top_performer: top_performer(records).cloned(),
        best_engagement: best_engagement(records).cloned(),
    }
}

/// Keep the records meeting both thresholds (inclusive). A `None` threshold
/// doesn't filter.
pub fn filter_by_performance(
    records: &[AnalysisRecord],
    min_views: Option<u64>,
    min_engagement: Option<f64>,
) -> Vec<AnalysisRecord> {
    records
        .iter()
        .filter(|r| min_views.is_none_or(|min| r.views >= min))
        .filter(|r| min_engagement.is_none_or(|min| r.engagement_rate >= min))
        .cloned()
        .collect()
}
