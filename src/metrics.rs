use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Views-per-day breakpoints and the base growth score they earn, highest first.
const GROWTH_BREAKPOINTS: [(f64, f64); 5] = [
    (1_000_000.0, 10.0),
    (500_000.0, 8.0),
    (100_000.0, 6.0),
    (50_000.0, 4.0),
    (10_000.0, 2.0),
];

const BASE_GROWTH_SCORE: f64 = 1.0;

const VIRAL_THRESHOLD: f64 = 0.02;
const TRENDING_THRESHOLD: f64 = 0.01;

/// Coarse virality classification of a single video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Virality {
    Viral,
    Trending,
    Normal,
}

impl Virality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Virality::Viral => "viral",
            Virality::Trending => "trending",
            Virality::Normal => "normal",
        }
    }
}

impl fmt::Display for Virality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to `places` decimals on the exact binary value, ties to even
/// (`3.125 -> 3.12`, `6.25 -> 6.2`).
fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Likes as a percentage of views, rounded to 2 decimals.
///
/// Zero views is an error rather than a silent zero; callers decide how to
/// treat videos nobody has watched yet.
pub fn engagement_rate(likes: u64, views: u64) -> Result<f64> {
    if views == 0 {
        return Err(Error::DivisionByZero);
    }
    Ok(round_to(likes as f64 / views as f64 * 100.0, 2))
}

/// Heuristic growth score from view velocity and recency.
///
/// The base score comes from views per day (a same-day video counts as one
/// day old), then gets a x1.5 bonus under a week old and x1.2 under a month.
/// The result is not clamped: a very recent viral video scores 15.
pub fn growth_score(views: u64, days_old: u64) -> f64 {
    let days = days_old.max(1);
    let views_per_day = views as f64 / days as f64;

    let base = GROWTH_BREAKPOINTS
        .iter()
        .find(|(min_velocity, _)| views_per_day >= *min_velocity)
        .map(|(_, score)| *score)
        .unwrap_or(BASE_GROWTH_SCORE);

    let recency = match days_old {
        0..7 => 1.5,
        7..30 => 1.2,
        _ => 1.0,
    };

    round_to(base * recency, 2)
}

/// Classify a video from its interaction density and view velocity.
pub fn virality_index(views: u64, likes: u64, comments: u64, days_old: u64) -> Virality {
    let days = days_old.max(1);

    let interaction_score = if views > 0 {
        (likes as f64 * 2.0 + comments as f64 * 3.0) / views as f64
    } else {
        0.0
    };
    let velocity = views as f64 / days as f64;

    let virality = interaction_score * 1000.0 + velocity / 10_000.0;

    if virality > VIRAL_THRESHOLD {
        Virality::Viral
    } else if virality > TRENDING_THRESHOLD {
        Virality::Trending
    } else {
        Virality::Normal
    }
}

/// Rank of `video_views` within `all_views` as a percentage, rounded to 1 decimal.
///
/// The rank is the index of the first equal value in the ascending list, so
/// duplicates share the lowest rank and the maximum of `n` distinct values
/// lands on `(n - 1) / n`. A value missing from the list ranks at its
/// insertion point.
pub fn performance_percentile(video_views: u64, all_views: &[u64]) -> f64 {
    if all_views.is_empty() {
        return 0.0;
    }

    let mut sorted = all_views.to_vec();
    sorted.sort_unstable();

    let position = sorted.partition_point(|&v| v < video_views);
    round_to(position as f64 / sorted.len() as f64 * 100.0, 1)
}
