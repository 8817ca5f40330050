use super::fetch_videos;
use crate::analyzer::{analyze, filter_by_performance};
use crate::error::Result;
use crate::report::format_video_list;

pub async fn run(
    channel: Option<&str>,
    count: usize,
    min_views: Option<u64>,
    min_engagement: Option<f64>,
) -> Result<()> {
    let (channel, raw_videos) = fetch_videos(channel, count).await?;

    let results = analyze(&raw_videos, count)?;
    let filtered = filter_by_performance(&results, min_views, min_engagement);

    if filtered.is_empty() {
        println!("No videos from {} meet the given thresholds.", channel);
        return Ok(());
    }

    println!("{} of {} video(s) from {}:\n", filtered.len(), results.len(), channel);
    println!("{}", format_video_list(&filtered, &results));

    Ok(())
}
