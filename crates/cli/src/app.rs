use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use gogo::prelude::*;
use gogo_downloader::DownloadRequest;

use crate::args::*;
use crate::episode::*;
use crate::logger::*;
use crate::utils::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub download_args: DownloadArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve an episode and print its play and download URLs
    Resolve(ResolveArgs),
    /// Resolve an episode and download it with ffmpeg (the default)
    Download(DownloadArgs),
}

pub struct App {
    cli: Cli,
    logger: Arc<CliLogger>,
}

impl App {
    pub fn new() -> Self {
        let cli = Cli::parse();
        let log_level = match &cli.command {
            Some(Commands::Resolve(args)) => &args.app_args.log_level,
            Some(Commands::Download(args)) => &args.resolve.app_args.log_level,
            None => &cli.download_args.resolve.app_args.log_level,
        };
        let logger = Arc::new(CliLogger::new(log_level));
        init_tracing(Arc::clone(&logger));

        Self { cli, logger }
    }

    pub async fn run(&self) {
        if let Err(err) = match &self.cli.command {
            Some(Commands::Resolve(args)) => self.resolve(args.clone()).await,
            Some(Commands::Download(args)) => self.download(args.clone()).await,
            None => self.download(self.cli.download_args.clone()).await,
        } {
            self.logger.failed(format!("{err}"));
            std::process::exit(1);
        }
    }

    async fn resolve(&self, args: ResolveArgs) -> Result<()> {
        let target = resolve_episode_target(args, &self.logger).await?;

        self.logger
            .success(format!("to watch, open {}", target.play_url.yellow()));
        self.logger
            .success(format!("to download, open {}", target.download_url.yellow()));

        Ok(())
    }

    async fn download(&self, args: DownloadArgs) -> Result<()> {
        let logger = &self.logger;
        let target = resolve_episode_target(args.resolve, logger).await?;

        let file_name: PathBuf = match &args.output {
            Some(path) => path.into(),
            None => suggested_filename(&target.episode_title).into(),
        };

        let output = match &args.dir {
            Some(dir) => dir.join(file_name),
            None => file_name,
        };

        let output_str = output.to_string_lossy().into_owned();

        logger
            .while_loading(
                format!("downloading to {}", output_str.yellow()),
                gogo_downloader::download(DownloadRequest::new(target.download_url, output)),
            )
            .await
            .map_err(|err| GogoError::Message(format!("download failed: {err}")))?;

        logger.success(format!("downloaded to {}", output_str.yellow()));
        Ok(())
    }
}
