use async_trait::async_trait;

use crate::errors::ScrapeError;
use crate::fetch::Fetcher;
use crate::page::Page;
use crate::site::{rapidvideo, EpisodeRef, MediaTarget, ResolvedLink, SeriesRef, Site};

pub const SITE_BASE: &str = "https://www5.gogoanime.tv";
pub const AJAX_BASE: &str = "https://ajax.apimovie.xyz";

const TITLE_PATTERN: &str = r"https://vidstream.co/download\?id=[\w=]+&typesub=[\w-]+&title=(.*)";
const EPISODE_PATTERN: &str = r"[\w-]+-episode-([\d-]+)";

pub struct GogoAnime {
    fetcher: Fetcher,
    site_base: String,
    ajax_base: String,
}

impl GogoAnime {
    pub fn new(fetcher: Fetcher) -> GogoAnime {
        GogoAnime::with_bases(fetcher, SITE_BASE, AJAX_BASE)
    }

    pub fn with_bases(fetcher: Fetcher, site_base: &str, ajax_base: &str) -> GogoAnime {
        GogoAnime {
            fetcher,
            site_base: site_base.trim_end_matches('/').to_string(),
            ajax_base: ajax_base.trim_end_matches('/').to_string(),
        }
    }
}

/// Last non-empty path segment of the category URL.
pub fn series_slug(category_url: &str) -> Result<String, ScrapeError> {
    let url = reqwest::Url::parse(category_url)
        .map_err(|e| ScrapeError::Validation(format!("invalid series url {category_url}: {e}")))?;
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(str::to_owned)
        .ok_or_else(|| ScrapeError::Validation(format!("series url {category_url} has no path")))
}

/// Returns `(id, title)` from a category page.
pub fn parse_category(html: &str) -> Result<(String, String), ScrapeError> {
    let page = Page::parse(html);
    let id = page
        .attr(".movie_id", "value")?
        .ok_or_else(|| ScrapeError::parse("movie id from gga page"))?;
    let title = page.text(".anime_info_body_bg h1")?;
    Ok((id, title))
}

/// Episode labels in the order the listing shows them (newest first).
pub fn parse_episode_list(html: &str) -> Result<Vec<String>, ScrapeError> {
    let re = regex::Regex::new(EPISODE_PATTERN)?;
    Page::parse(html)
        .attrs("li a", "href")?
        .iter()
        .map(|href| {
            re.captures(href)
                .map(|caps| caps[1].to_string())
                .ok_or_else(|| ScrapeError::ParseFailed(format!("episode number from {href}")))
        })
        .collect()
}

/// Returns `(host_url, title)` from an episode page.
pub fn parse_episode_page(html: &str) -> Result<(String, String), ScrapeError> {
    let page = Page::parse(html);
    let host_url = page
        .first_child_attr(".rapidvideo", "data-video")?
        .ok_or_else(|| ScrapeError::parse("video url"))?;
    let title_raw = page
        .first_child_attr(".download-anime", "href")?
        .ok_or_else(|| ScrapeError::parse("anime title"))?;

    let re = regex::Regex::new(TITLE_PATTERN)?;
    let escaped = re
        .captures(&title_raw)
        .map(|caps| caps[1].replace('+', " "))
        .ok_or_else(|| ScrapeError::ParseFailed(format!("anime title from {title_raw}")))?;
    let title = urlencoding::decode(&escaped)
        .map_err(|_| ScrapeError::ParseFailed(format!("decoded anime title from {escaped}")))?
        .into_owned();

    Ok((absolute(&host_url), title))
}

fn absolute(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

#[async_trait]
impl Site for GogoAnime {
    async fn series(&self, category_url: &str) -> Result<SeriesRef, ScrapeError> {
        let slug = series_slug(category_url)?;
        let html = self.fetcher.get(category_url).await?;
        let (id, title) = parse_category(&html)?;
        Ok(SeriesRef { slug, id, title })
    }

    async fn episodes(&self, series_id: &str) -> Result<Vec<EpisodeRef>, ScrapeError> {
        let url = format!(
            "{}/ajax/load-list-episode?ep_start=0&ep_end=9999&id={}",
            self.ajax_base, series_id
        );
        let html = self.fetcher.get(&url).await?;
        let mut labels = parse_episode_list(&html)?;
        labels.reverse();
        Ok(labels
            .into_iter()
            .map(|label| EpisodeRef { label })
            .collect())
    }

    fn episode_url(&self, series: &SeriesRef, episode: &EpisodeRef) -> String {
        format!("{}/{}-episode-{}", self.site_base, series.slug, episode.label)
    }

    async fn episode_link(&self, episode_url: &str) -> Result<ResolvedLink, ScrapeError> {
        let html = self.fetcher.get(episode_url).await?;
        let (host_url, title) = parse_episode_page(&html)?;
        Ok(ResolvedLink { host_url, title })
    }

    async fn media_url(&self, host_url: &str) -> Result<MediaTarget, ScrapeError> {
        rapidvideo::resolve(&self.fetcher, host_url).await
    }
}
