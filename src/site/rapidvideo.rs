use crate::errors::ScrapeError;
use crate::fetch::Fetcher;
use crate::page::Page;
use crate::site::MediaTarget;

/// How many times a missing quality may be swapped for the host's alternative.
pub const MAX_FALLBACK_HOPS: usize = 2;

const FALLBACK_LINK: &str = "#home_video > div:nth-of-type(2) > a:last-of-type";

#[derive(Debug, PartialEq, Eq)]
pub enum HostPage {
    Direct(String),
    Fallback(String),
}

pub fn parse_host_page(html: &str) -> Result<HostPage, ScrapeError> {
    let page = Page::parse(html);
    if let Some(src) = page.attr("source", "src")? {
        return Ok(HostPage::Direct(src));
    }
    page.attr(FALLBACK_LINK, "href")?
        .map(HostPage::Fallback)
        .ok_or_else(|| ScrapeError::parse("URL from rapidvideo"))
}

/// Appends the requested quality to a host URL, keeping its existing query.
pub fn with_quality(host_url: &str, quality: &str) -> Result<String, ScrapeError> {
    let mut url = reqwest::Url::parse(host_url)
        .map_err(|e| ScrapeError::ParseFailed(format!("host url {host_url}: {e}")))?;
    url.query_pairs_mut().append_pair("q", quality);
    Ok(url.into())
}

pub async fn resolve(fetcher: &Fetcher, host_url: &str) -> Result<MediaTarget, ScrapeError> {
    let mut url = host_url.to_string();
    for hop in 0..=MAX_FALLBACK_HOPS {
        let html = fetcher.get(&url).await?;
        match parse_host_page(&html)? {
            HostPage::Direct(direct_url) => return Ok(MediaTarget { direct_url }),
            HostPage::Fallback(href) if hop < MAX_FALLBACK_HOPS => {
                let next = reqwest::Url::parse(&url)
                    .and_then(|base| base.join(&href))
                    .map_err(|e| ScrapeError::ParseFailed(format!("fallback url {href}: {e}")))?;
                log::debug!("retrying mp4 scrape with new url: {next}");
                log::info!("episode was not available in the requested quality, trying a lower one");
                url = next.into();
            }
            HostPage::Fallback(_) => break,
        }
    }
    Err(ScrapeError::ParseFailed(format!(
        "URL from rapidvideo within {MAX_FALLBACK_HOPS} fallbacks"
    )))
}
