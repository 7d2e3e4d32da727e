use owo_colors::OwoColorize;

use gogo::prelude::*;

use crate::args::*;
use crate::constants::*;
use crate::logger::*;
use crate::prompt::*;
use crate::utils::*;

/// pipeline output for one chosen episode.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub episode_title: String,
    pub play_url: String,
    pub download_url: String,
}

/// runs the search -> listing -> resolution pipeline, prompting between
/// stages unless a flag already pins the selection.
pub async fn resolve_episode_target(
    args: ResolveArgs,
    logger: &CliLogger,
) -> Result<ResolvedTarget> {
    let runtime = match args {
        args if args.app_args.interactive => prompt_for_args(args)?,
        ResolveArgs {
            name: Some(name),
            anime,
            episode,
            base_url,
            ..
        } => RuntimeArgs::new(name, anime, episode, base_url),
        args => prompt_for_args(args)?,
    };

    logger.loading("initializing");
    let gogo = GogoBuilder::new()
        .base_url(runtime.base_url.as_deref().unwrap_or(GOGOANIME_BASE_URL))
        .build()?;
    logger.success("initialized");

    let results = logger
        .while_loading(
            format!("searching for {}", runtime.name.yellow()),
            gogo.search(&runtime.name),
        )
        .await?;

    if results.is_empty() {
        return Err(GogoError::NoSearchResults {
            query: runtime.name,
        });
    }

    logger.success(format!("found {} result(s)", results.len().yellow()));

    let anime = match runtime.anime {
        Some(n) => &results[checked_selection(n, results.len())?],
        None => prompt_select("choose an anime:", &results, |result| result.title.clone())?,
    };
    logger.success(format!("anime: {}", anime.title.yellow()));
    logger.debug("episode", format!("anime link: {}", anime.url.yellow()));

    let episodes = logger
        .while_loading(
            format!("listing episodes for {}", anime.title.yellow()),
            gogo.fetch_episode_list(&anime.url),
        )
        .await?;

    if episodes.is_empty() {
        return Err(GogoError::NoEpisodes {
            title: anime.title.clone(),
        });
    }

    logger.success(format!("found {} episode(s)", episodes.len().yellow()));

    let episode = match runtime.episode {
        Some(n) => &episodes[checked_selection(n, episodes.len())?],
        None => prompt_select("choose an episode:", &episodes, |episode| episode.title.clone())?,
    };
    logger.debug("episode", format!("episode link: {}", episode.url.yellow()));

    let resolved = logger
        .while_loading(
            format!("resolving {}", episode.title.yellow()),
            gogo.resolve_episode(&episode.url),
        )
        .await?;

    logger.success(format!("episode: {}", episode.title.yellow()));
    logger.success(format!("play: {}", resolved.play_url.yellow()));
    logger.success(format!("download: {}", resolved.download_url.yellow()));

    Ok(ResolvedTarget {
        episode_title: episode.title.clone(),
        play_url: resolved.play_url,
        download_url: resolved.download_url,
    })
}
