use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::{engagement_rate, growth_score};

/// Offset-less timestamp layouts, read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Video resource as returned by the YouTube Data API `videos` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVideoRecord {
    pub id: Option<String>,
    pub snippet: Option<Snippet>,
    pub statistics: Option<Statistics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: Option<String>,
    pub published_at: Option<String>,
}

/// Counters arrive as decimal strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// Flat, typed view of one video with its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub title: String,
    pub video_id: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_rate: f64,
    pub growth_score: f64,
    pub days_old: u64,
    pub published_at: String,
}

impl RawVideoRecord {
    /// Normalize into an [`AnalysisRecord`] as seen at `now`.
    ///
    /// Missing counters count as zero and a missing title becomes "Unknown".
    /// A zero-view video fails with [`Error::DivisionByZero`] from the
    /// engagement rate.
    pub fn normalize(&self, now: DateTime<Utc>) -> Result<AnalysisRecord> {
        let snippet = self.snippet.as_ref();
        let stats = self.statistics.as_ref();

        let views = parse_counter("viewCount", stats.and_then(|s| s.view_count.as_deref()))?;
        let likes = parse_counter("likeCount", stats.and_then(|s| s.like_count.as_deref()))?;
        let comments = parse_counter(
            "commentCount",
            stats.and_then(|s| s.comment_count.as_deref()),
        )?;

        let title = snippet
            .and_then(|s| s.title.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let published_at = snippet
            .and_then(|s| s.published_at.clone())
            .unwrap_or_default();

        let days_old = days_since(&published_at, now)?;

        Ok(AnalysisRecord {
            title,
            video_id: self.id.clone().unwrap_or_default(),
            views,
            likes,
            comments,
            engagement_rate: engagement_rate(likes, views)?,
            growth_score: growth_score(views, days_old),
            days_old,
            published_at,
        })
    }
}

fn parse_counter(field: &'static str, value: Option<&str>) -> Result<u64> {
    let value = value.unwrap_or("0");
    value.trim().parse().map_err(|_| Error::MalformedCounter {
        field,
        value: value.to_string(),
    })
}

/// Parse an ISO-8601 publish timestamp. A trailing `Z` means UTC and a
/// missing offset is read as UTC.
pub fn parse_timestamp(published: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(published) {
        return Ok(dt);
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(published, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(published, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(Error::MalformedTimestamp(published.to_string()))
}

/// Whole days between `published` and `now`, measured in the timestamp's own
/// offset. Empty timestamps and future dates give zero.
pub fn days_since(published: &str, now: DateTime<Utc>) -> Result<u64> {
    if published.is_empty() {
        return Ok(0);
    }

    let published = parse_timestamp(published)?;
    let now = now.with_timezone(published.offset());
    let days = (now - published).num_days();

    Ok(days.max(0) as u64)
}
