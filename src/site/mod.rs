pub mod gogoanime;
pub mod rapidvideo;

use async_trait::async_trait;
pub use gogoanime::GogoAnime;

use crate::errors::ScrapeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRef {
    pub slug: String,
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub host_url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTarget {
    pub direct_url: String,
}

/// The scraping chain from a category page down to a direct media URL.
#[async_trait]
pub trait Site {
    async fn series(&self, category_url: &str) -> Result<SeriesRef, ScrapeError>;

    /// Episodes ordered oldest first.
    async fn episodes(&self, series_id: &str) -> Result<Vec<EpisodeRef>, ScrapeError>;

    fn episode_url(&self, series: &SeriesRef, episode: &EpisodeRef) -> String;

    async fn episode_link(&self, episode_url: &str) -> Result<ResolvedLink, ScrapeError>;

    async fn media_url(&self, host_url: &str) -> Result<MediaTarget, ScrapeError>;
}
