use crate::errors::ScrapeError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin GET wrapper shared by every scraping stage.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Fetcher, ScrapeError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Fetcher { client })
    }

    /// Returns the body of `url`. Anything but 200 counts as not found.
    pub async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        log::debug!("GET {url}");
        let resp = self.client.get(url).send().await?;
        if resp.status() != reqwest::StatusCode::OK {
            log::debug!("{} answered {}", url, resp.status());
            return Err(ScrapeError::NotFound(url.to_string()));
        }
        Ok(resp.text().await?)
    }
}
