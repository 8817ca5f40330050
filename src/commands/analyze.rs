use tracing::debug;

use super::fetch_videos;
use crate::analyzer::{analyze, comparison_summary};
use crate::error::Result;
use crate::report::{format_comparison_table, format_video_report, AnalysisReport};

pub async fn run(channel: Option<&str>, count: usize, limit: Option<usize>, json: bool) -> Result<()> {
    let (channel, raw_videos) = fetch_videos(channel, count).await?;

    let limit = limit.unwrap_or(count);
    debug!(limit, fetched = raw_videos.len(), "analyzing videos");

    eprintln!("Analyzing performance metrics...\n");
    let results = analyze(&raw_videos, limit)?;
    let summary = comparison_summary(&results);

    if json {
        let report = AnalysisReport {
            channel: &channel,
            videos: &results,
            summary: &summary,
        };
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", "=".repeat(60));
    println!("🎬 Video Performance Analyzer");
    println!("   Channel: {}", channel);
    println!("{}", "=".repeat(60));
    println!();

    println!("📹 VIDEO DETAILS");
    println!("{}", "-".repeat(60));
    for video in &results {
        println!("{}", format_video_report(video));
    }

    println!("{}", format_comparison_table(&summary));

    if let Some(top) = &summary.top_performer {
        println!();
        println!("🏆 TOP PERFORMER DETAILS:");
        println!("{}", format_video_report(top));
    }

    Ok(())
}
