use serde::Serialize;

use crate::analyzer::ComparisonSummary;
use crate::error::Result;
use crate::metrics::{performance_percentile, virality_index};
use crate::video::AnalysisRecord;

const TABLE_WIDTH: usize = 50;

/// Everything the analyze command shows, for `--json`
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub channel: &'a str,
    pub videos: &'a [AnalysisRecord],
    pub summary: &'a ComparisonSummary,
}

impl AnalysisReport<'_> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Format large numbers with K/M suffixes
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        format!("{}", num.trunc() as u64)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Format a single video's data as a readable report
pub fn format_video_report(video: &AnalysisRecord) -> String {
    let lines = [
        format!("📹 {}", video.title),
        format!("   Views: {}", format_number(video.views as f64)),
        format!("   Likes: {}", format_number(video.likes as f64)),
        format!("   Comments: {}", format_number(video.comments as f64)),
        format!("   Engagement Rate: {:.2}%", video.engagement_rate),
        format!("   Growth Score: {:.1}/10", video.growth_score),
        format!("   Published: {} days ago", video.days_old),
        String::new(),
    ];
    lines.join("\n")
}

/// Format comparison data as a summary table
pub fn format_comparison_table(summary: &ComparisonSummary) -> String {
    let heavy = "=".repeat(TABLE_WIDTH);
    let light = "-".repeat(TABLE_WIDTH);

    let mut lines = vec![
        heavy.clone(),
        "📊 CHANNEL PERFORMANCE SUMMARY".to_string(),
        heavy.clone(),
        format!("Total Videos Analyzed: {}", summary.total_videos),
        format!("Total Views: {}", format_number(summary.total_views as f64)),
        format!("Total Likes: {}", format_number(summary.total_likes as f64)),
        format!("Total Comments: {}", format_number(summary.total_comments as f64)),
        light.clone(),
        format!("Average Views: {}", format_number(summary.average_views)),
        format!("Average Likes: {}", format_number(summary.average_likes)),
        format!("Average Engagement: {:.2}%", summary.average_engagement),
        light,
    ];

    if let Some(top) = &summary.top_performer {
        lines.push(format!("🏆 Top Performer: {}...", truncate(&top.title, 40)));
        lines.push(format!("   ({} views)", format_number(top.views as f64)));
    }

    if let Some(best) = &summary.best_engagement {
        lines.push(format!("💎 Best Engagement: {}...", truncate(&best.title, 40)));
        lines.push(format!("   ({:.2}% engagement)", best.engagement_rate));
    }

    lines.push(heavy);
    lines.join("\n")
}

/// Format videos as numbered entries. Percentiles rank each video against
/// `ranked_against`, which may be larger than the listed subset.
pub fn format_video_list(videos: &[AnalysisRecord], ranked_against: &[AnalysisRecord]) -> String {
    let all_views: Vec<u64> = ranked_against.iter().map(|v| v.views).collect();

    let mut lines = Vec::new();
    for (i, video) in videos.iter().enumerate() {
        let virality = virality_index(video.views, video.likes, video.comments, video.days_old);
        let percentile = performance_percentile(video.views, &all_views);

        lines.push(format!("{}. {}", i + 1, truncate(&video.title, 50)));
        lines.push(format!(
            "   {} views | {:.2}% engagement | {} | {:.1} percentile",
            format_number(video.views as f64),
            video.engagement_rate,
            virality,
            percentile
        ));
        lines.push(String::new());
    }
    lines.join("\n")
}
