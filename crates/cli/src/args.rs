use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct AppArgs {
    /// Logging verbosity (error, warn, info, debug)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Use interactive prompts to edit arguments before execution
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Anime name to search for
    #[arg(short, long)]
    pub name: Option<String>,

    /// Search result to select (1-indexed)
    #[arg(short, long)]
    pub anime: Option<usize>,

    /// Episode to select (1-indexed)
    #[arg(short, long)]
    pub episode: Option<usize>,

    /// Site base URL, for mirrors of the default host
    #[arg(short, long, env = "GOGO_BASE_URL")]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub app_args: AppArgs,
}

#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    /// Output path for the downloaded file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output directory for downloaded files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

#[derive(Debug, Clone)]
pub struct RuntimeArgs {
    pub name: String,
    pub anime: Option<usize>,
    pub episode: Option<usize>,
    pub base_url: Option<String>,
}

impl RuntimeArgs {
    pub fn new(
        name: String,
        anime: Option<usize>,
        episode: Option<usize>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            name,
            anime,
            episode,
            base_url,
        }
    }
}
