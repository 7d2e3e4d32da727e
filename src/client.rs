use rand::seq::SliceRandom;
use reqwest::Client as ReqwestClient;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

use crate::errors::{GogoError, Result};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// browser user-agents sampled when no explicit one is configured.
const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:140.0) Gecko/20100101 Firefox/140.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.5 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36 Edg/138.0.0.0",
];

pub(crate) fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    /// site-relative path to the anime page.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeEntry {
    pub title: String,
    /// site-relative path to the episode page.
    pub url: String,
}

/// play/download url pair resolved from a single episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEpisode {
    /// absolute url of the embedded player.
    pub play_url: String,
    /// absolute `.m3u8` playlist url derived from the player source.
    pub download_url: String,
}

pub struct GogoClient {
    base_url: String,
    user_agent: String,
    client: ReqwestClient,
}

impl GogoClient {
    /// creates a client with the default timeout and a randomized user-agent.
    pub fn new(base_url: String) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_TIMEOUT, random_user_agent().to_string())
    }

    pub(crate) fn with_options(
        base_url: String,
        timeout: Duration,
        user_agent: String,
    ) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(GogoError::BuildClient)?;

        Ok(Self {
            base_url,
            user_agent,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        if let Ok(v) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, v);
        }

        headers
    }

    async fn ensure_success(response: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read error body>".to_string());

        Err(GogoError::HttpStatus {
            context: context.to_string(),
            status,
            body,
        })
    }

    async fn fetch(&self, url: &str, context: &str) -> Result<String> {
        debug!(%url, "sending GET request");

        let resp = self
            .client
            .get(url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|source| GogoError::Request {
                context: context.to_string(),
                source,
            })?;

        let resp = Self::ensure_success(resp, context).await?;

        resp.text().await.map_err(|source| GogoError::ResponseBody {
            context: context.to_string(),
            source,
        })
    }

    /// searches the site for anime matching a free-text name.
    ///
    /// returns the result anchors in document order. an empty list means the
    /// results container was present but had no entries.
    pub async fn search(&self, name: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search/{name}", self.base_url);
        let body = self.fetch(&url, &format!("searching for {name}")).await?;

        let results = Self::parse_search_results(&body, name)?;
        debug!(count = results.len(), "parsed search results");
        Ok(results)
    }

    /// lists the episodes of an anime given its site-relative path.
    pub async fn fetch_episode_list(&self, anime_path: &str) -> Result<Vec<EpisodeEntry>> {
        let url = format!("{}{anime_path}", self.base_url);
        let body = self
            .fetch(&url, &format!("listing episodes for {anime_path}"))
            .await?;

        let episodes = Self::parse_episode_list(&body, anime_path)?;
        debug!(count = episodes.len(), "parsed episode list");
        Ok(episodes)
    }

    /// resolves an episode page into its play url and `.m3u8` download url.
    pub async fn resolve_episode(&self, episode_path: &str) -> Result<ResolvedEpisode> {
        let url = format!("{}{episode_path}", self.base_url);
        let body = self
            .fetch(&url, &format!("resolving episode {episode_path}"))
            .await?;

        let resolved = Self::resolve_from_page(&self.base_url, &body, episode_path)?;
        debug!(play_url = %resolved.play_url, "resolved player frame");
        Ok(resolved)
    }

    fn parse_search_results(body: &str, query: &str) -> Result<Vec<SearchResult>> {
        let doc = Html::parse_document(body);
        let list_sel = Selector::parse("ul.items").expect("invalid selector");
        let item_sel = Selector::parse("li").unwrap();
        let anchor_sel = Selector::parse("a").unwrap();

        let list = doc
            .select(&list_sel)
            .next()
            .ok_or_else(|| GogoError::SearchListMissing {
                query: query.to_string(),
            })?;

        let mut results = Vec::new();

        for item in list.select(&item_sel) {
            let Some(anchor) = item.select(&anchor_sel).next() else {
                continue;
            };
            let (Some(title), Some(href)) =
                (anchor.value().attr("title"), anchor.value().attr("href"))
            else {
                continue;
            };

            results.push(SearchResult {
                title: title.to_string(),
                url: href.to_string(),
            });
        }

        Ok(results)
    }

    fn parse_episode_list(body: &str, path: &str) -> Result<Vec<EpisodeEntry>> {
        let doc = Html::parse_document(body);
        let list_sel = Selector::parse("ul#episode_related").expect("invalid selector");
        let item_sel = Selector::parse("li").unwrap();
        let anchor_sel = Selector::parse("a").unwrap();
        let name_sel = Selector::parse("div.name").unwrap();

        let list = doc
            .select(&list_sel)
            .next()
            .ok_or_else(|| GogoError::EpisodeListMissing {
                path: path.to_string(),
            })?;

        let mut episodes = Vec::new();

        for item in list.select(&item_sel) {
            let Some(href) = item
                .select(&anchor_sel)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
            else {
                continue;
            };
            let Some(name) = item.select(&name_sel).next() else {
                continue;
            };

            episodes.push(EpisodeEntry {
                title: name.text().collect::<String>().trim().to_string(),
                url: href.to_string(),
            });
        }

        Ok(episodes)
    }

    fn resolve_from_page(base_url: &str, body: &str, path: &str) -> Result<ResolvedEpisode> {
        let doc = Html::parse_document(body);
        let frame_sel = Selector::parse("iframe#playerframe").expect("invalid selector");

        let frame = doc
            .select(&frame_sel)
            .next()
            .ok_or_else(|| GogoError::PlayerFrameMissing {
                path: path.to_string(),
            })?;

        let play_path = frame
            .value()
            .attr("src")
            .ok_or_else(|| GogoError::PlayerFrameSource {
                path: path.to_string(),
            })?;

        Ok(ResolvedEpisode {
            play_url: format!("{base_url}{play_path}"),
            download_url: format!("{base_url}{}", Self::derive_download_path(play_path)),
        })
    }

    /// rewrites a player embed path into its `.m3u8` playlist path.
    ///
    /// only the first `/embed/` segment is rewritten; a source without one is
    /// kept as-is and just gets the playlist extension appended.
    fn derive_download_path(play_path: &str) -> String {
        format!("{}.m3u8", play_path.replacen("/embed/", "/playlist/", 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://example.test";

    const SEARCH_PAGE: &str = r#"
        <html><body>
        <ul class="items">
            <li><a href="/anime/sample" title="Sample Anime"><img src="x.png"></a></li>
            <li><a href="/anime/sample-second-season" title="Sample Anime Second Season"></a></li>
        </ul>
        </body></html>
    "#;

    const EPISODE_PAGE: &str = r#"
        <html><body>
        <ul id="episode_related">
            <li><a href="/sample/ep-1"><div class="name"><span>EP</span> 1 </div></a></li>
            <li><a href="/sample/ep-2"><div class="name"> EP 2</div></a></li>
        </ul>
        </body></html>
    "#;

    const PLAY_PAGE: &str = r#"
        <html><body>
        <div class="play-video">
            <iframe id="playerframe" src="/embed/xyz"></iframe>
        </div>
        </body></html>
    "#;

    #[test]
    fn search_returns_entries_in_document_order() {
        let results = GogoClient::parse_search_results(SEARCH_PAGE, "sample").expect("should parse");
        assert_eq!(
            results,
            vec![
                SearchResult {
                    title: "Sample Anime".to_string(),
                    url: "/anime/sample".to_string(),
                },
                SearchResult {
                    title: "Sample Anime Second Season".to_string(),
                    url: "/anime/sample-second-season".to_string(),
                },
            ]
        );
    }

    #[test]
    fn search_fails_without_results_container() {
        let err = GogoClient::parse_search_results("<html><body></body></html>", "missing show")
            .expect_err("missing container should error");
        assert!(matches!(err, GogoError::SearchListMissing { .. }));
        assert!(err.to_string().contains("missing show"));
    }

    #[test]
    fn search_returns_empty_for_empty_container() {
        let body = r#"<html><body><ul class="items"></ul></body></html>"#;
        let results = GogoClient::parse_search_results(body, "sample").expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn search_skips_items_without_usable_anchor() {
        let body = r#"
            <ul class="items">
                <li><span>no anchor here</span></li>
                <li><a href="/anime/ok" title="Ok"></a></li>
                <li><a href="/anime/untitled"></a></li>
            </ul>
        "#;
        let results = GogoClient::parse_search_results(body, "ok").expect("should parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Ok");
    }

    #[test]
    fn episode_list_returns_trimmed_titles_in_order() {
        let episodes =
            GogoClient::parse_episode_list(EPISODE_PAGE, "/anime/sample").expect("should parse");
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].title, "EP 1");
        assert_eq!(episodes[0].url, "/sample/ep-1");
        assert_eq!(episodes[1].title, "EP 2");
        assert_eq!(episodes[1].url, "/sample/ep-2");
    }

    #[test]
    fn episode_list_fails_without_container() {
        let err = GogoClient::parse_episode_list("<html></html>", "/anime/sample")
            .expect_err("missing container should error");
        assert!(matches!(err, GogoError::EpisodeListMissing { .. }));
        assert!(err.to_string().contains("/anime/sample"));
    }

    #[test]
    fn derive_download_path_rewrites_embed_segment() {
        assert_eq!(
            GogoClient::derive_download_path("/embed/abc123"),
            "/playlist/abc123.m3u8"
        );
    }

    #[test]
    fn derive_download_path_rewrites_only_first_embed_segment() {
        assert_eq!(
            GogoClient::derive_download_path("/embed/x/embed/y"),
            "/playlist/x/embed/y.m3u8"
        );
    }

    #[test]
    fn derive_download_path_without_embed_segment_appends_extension_only() {
        assert_eq!(
            GogoClient::derive_download_path("/streaming/abc123"),
            "/streaming/abc123.m3u8"
        );
    }

    #[test]
    fn resolve_builds_absolute_play_and_download_urls() {
        let resolved = GogoClient::resolve_from_page(BASE_URL, PLAY_PAGE, "/sample/ep-1")
            .expect("should resolve");
        assert_eq!(resolved.play_url, "https://example.test/embed/xyz");
        assert_eq!(resolved.download_url, "https://example.test/playlist/xyz.m3u8");
    }

    #[test]
    fn resolve_fails_without_player_frame() {
        let err = GogoClient::resolve_from_page(BASE_URL, "<html></html>", "/sample/ep-1")
            .expect_err("missing frame should error");
        assert!(matches!(err, GogoError::PlayerFrameMissing { .. }));
        assert!(err.to_string().contains("/sample/ep-1"));
    }

    #[test]
    fn resolve_fails_without_frame_source() {
        let body = r#"<iframe id="playerframe"></iframe>"#;
        let err = GogoClient::resolve_from_page(BASE_URL, body, "/sample/ep-1")
            .expect_err("missing src should error");
        assert!(matches!(err, GogoError::PlayerFrameSource { .. }));
    }

    #[test]
    fn sample_flow_resolves_end_to_end() {
        let results = GogoClient::parse_search_results(SEARCH_PAGE, "sample").expect("search");
        assert_eq!(results[0].title, "Sample Anime");
        assert_eq!(results[0].url, "/anime/sample");

        let episodes =
            GogoClient::parse_episode_list(EPISODE_PAGE, &results[0].url).expect("episodes");
        assert_eq!(episodes[0].title, "EP 1");
        assert_eq!(episodes[0].url, "/sample/ep-1");

        let resolved =
            GogoClient::resolve_from_page(BASE_URL, PLAY_PAGE, &episodes[0].url).expect("resolve");
        assert_eq!(resolved.play_url, "https://example.test/embed/xyz");
        assert_eq!(resolved.download_url, "https://example.test/playlist/xyz.m3u8");
    }

    #[test]
    fn random_user_agent_comes_from_pool() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
    }
}
