use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yt_analyzer::commands;
use yt_analyzer::config::load_env;

#[derive(Parser)]
#[command(name = "yt-analyzer")]
#[command(about = "Analyze the performance of a YouTube channel's latest videos")]
#[command(version)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest videos and print a full performance report
    Analyze {
        /// Channel ID, @handle or URL (default: YOUTUBE_CHANNEL_ID)
        channel: Option<String>,

        /// Number of videos to fetch (default: 5)
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Maximum number of fetched videos to analyze (default: all fetched)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the latest videos that meet minimum performance thresholds.
    /// Percentiles rank each listed video against every analyzed video.
    List {
        /// Channel ID, @handle or URL (default: YOUTUBE_CHANNEL_ID)
        channel: Option<String>,

        /// Number of videos to fetch (default: 5)
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Only show videos with at least this many views
        #[arg(long)]
        min_views: Option<u64>,

        /// Only show videos with at least this engagement rate (percent)
        #[arg(long)]
        min_engagement: Option<f64>,
    },

    /// Save the YouTube API key (and optional default channel)
    Init {
        /// YouTube Data API key
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Default channel to analyze
        #[arg(short, long)]
        channel: Option<String>,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("yt_analyzer=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Load environment variables
    load_env();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze { channel, count, limit, json } => {
            commands::analyze::run(channel.as_deref(), count, limit, json).await
        }
        Commands::List { channel, count, min_views, min_engagement } => {
            commands::list::run(channel.as_deref(), count, min_views, min_engagement).await
        }
        Commands::Init { api_key, channel, force } => commands::init::run(api_key, channel, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
