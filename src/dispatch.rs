use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use crate::config::Config;
use crate::errors::ScrapeError;
use crate::site::{rapidvideo, Site};

/// Arguments handed to the external downloader for one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub url: String,
    pub threads: u32,
    pub output: PathBuf,
}

#[async_trait]
pub trait Launcher {
    async fn launch(&self, job: &DownloadJob) -> anyhow::Result<()>;
}

/// Runs an aria2c-compatible program with inherited stdio and waits for it.
pub struct Aria2 {
    program: String,
}

impl Aria2 {
    pub fn new(program: &str) -> Aria2 {
        Aria2 {
            program: program.to_string(),
        }
    }
}

#[async_trait]
impl Launcher for Aria2 {
    async fn launch(&self, job: &DownloadJob) -> anyhow::Result<()> {
        let status = tokio::process::Command::new(&self.program)
            .arg(&job.url)
            .arg("-x")
            .arg(job.threads.to_string())
            .arg("-o")
            .arg(&job.output)
            .status()
            .await
            .with_context(|| format!("failed to run {}", self.program))?;
        log::debug!("{} exited with {}", self.program, status);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub dispatched: usize,
    pub skipped: usize,
}

/// Keeps `[a-zA-Z0-9\s\-_]`, replacing every other run with one `_`.
pub fn clean_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || c == '-' || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

pub struct Dispatcher<'a, S, L> {
    config: &'a Config,
    site: S,
    launcher: L,
}

impl<'a, S: Site, L: Launcher> Dispatcher<'a, S, L> {
    pub fn new(config: &'a Config, site: S, launcher: L) -> Self {
        Dispatcher {
            config,
            site,
            launcher,
        }
    }

    pub async fn run(&self) -> anyhow::Result<Summary> {
        let config = self.config;
        if config.dryrun {
            log::info!("Doing a dry-run, no files will be downloaded!");
        }

        let series = self
            .site
            .series(&config.series)
            .await
            .with_context(|| format!("failed to get anime id from {}", config.series))?;
        log::debug!("[id: '{}', title: '{}']", series.id, series.title);

        let episodes = self
            .site
            .episodes(&series.id)
            .await
            .context("failed to get episodes")?;
        log::debug!(
            "[episodes: {:?}]",
            episodes.iter().map(|e| e.label.as_str()).collect::<Vec<_>>()
        );

        check_bounds(config.start, config.end, episodes.len(), &series.title)?;

        let dir = series_dir(&config.output, &series.title);
        if !config.dryrun {
            std::fs::create_dir_all(&dir).with_context(|| {
                format!(
                    "failed to create a directory ({}) to download into",
                    dir.display()
                )
            })?;
        }

        log::info!(
            "downloading {} ep {}-{} ({} total episodes)",
            series.title,
            config.start,
            config.end,
            episodes.len()
        );

        let mut summary = Summary::default();
        // 1-based and inclusive; start > end leaves this empty.
        let selected = episodes
            .iter()
            .take(config.end)
            .skip(config.start.saturating_sub(1));
        for episode in selected {
            log::info!("scraping episode {}", episode.label);
            let link = match self
                .site
                .episode_link(&self.site.episode_url(&series, episode))
                .await
            {
                Ok(link) => link,
                Err(e) => {
                    log::warn!("failed to parse GGA for episode {}: {}", episode.label, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            log::debug!("[rv: '{}', title: '{}']", link.host_url, link.title);

            let host_url = rapidvideo::with_quality(&link.host_url, &config.quality.to_string())
                .with_context(|| format!("failed to get mp4 for episode {}", episode.label))?;
            let media = self
                .site
                .media_url(&host_url)
                .await
                .with_context(|| format!("failed to get mp4 for episode {}", episode.label))?;
            log::debug!("[mp4: '{}']", media.direct_url);

            let file_name = format!("{}.mp4", clean_name(&link.title));
            log::info!("downloading episode {} to '{}'", episode.label, file_name);
            let job = DownloadJob {
                url: media.direct_url,
                threads: config.threads,
                output: dir.join(&file_name),
            };

            if config.dryrun {
                log::info!(
                    "would run: {} {} -x {} -o {}",
                    config.downloader,
                    job.url,
                    job.threads,
                    job.output.display()
                );
                continue;
            }

            if let Err(e) = self.launcher.launch(&job).await {
                log::debug!("{e:#}");
            }
            summary.dispatched += 1;
        }
        Ok(summary)
    }
}

fn check_bounds(start: usize, end: usize, available: usize, title: &str) -> Result<(), ScrapeError> {
    if start == 0 || end == 0 {
        return Err(ScrapeError::Validation(
            "episode numbers start at 1".to_string(),
        ));
    }
    if start > available || end > available {
        return Err(ScrapeError::Validation(format!(
            "series {title} does not have {} episodes, try a lower number!",
            start.max(end)
        )));
    }
    Ok(())
}

pub fn series_dir(output: &Path, title: &str) -> PathBuf {
    output.join(clean_name(title))
}
