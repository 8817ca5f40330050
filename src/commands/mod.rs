pub mod analyze;
pub mod init;
pub mod list;

use crate::config::Config;
use crate::error::Result;
use crate::video::RawVideoRecord;
use crate::youtube::YouTubeClient;

/// Resolve the channel and fetch its latest `count` uploads
async fn fetch_videos(channel: Option<&str>, count: usize) -> Result<(String, Vec<RawVideoRecord>)> {
    let config = Config::from_env()?;
    let channel = config.channel_or_default(channel)?;
    let client = YouTubeClient::new(&config)?;

    eprintln!("Fetching latest {} videos from {}...", count, channel);
    let videos = client.fetch_recent_videos(&channel, count).await?;
    eprintln!("Found {} video(s)\n", videos.len());

    Ok((channel, videos))
}
