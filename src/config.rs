use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Video resolutions the host is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Quality {
    #[value(name = "480p")]
    Low,
    #[value(name = "720p")]
    Medium,
    #[value(name = "1080p")]
    High,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::Low => "480p",
            Quality::Medium => "720p",
            Quality::High => "1080p",
        };
        f.write_str(s)
    }
}

/// Download anime episodes from a series category page
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Category page for the anime you want to download
    #[arg(long)]
    pub series: String,

    /// First episode to download (1-based)
    #[arg(long)]
    pub start: usize,

    /// Last episode to download (inclusive)
    #[arg(long)]
    pub end: usize,

    /// Quality of video to download
    #[arg(long, value_enum, default_value_t = Quality::Medium)]
    pub quality: Quality,

    /// Connections per download handed to the downloader
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=16))]
    pub threads: u32,

    /// Print all sorts of garbage to your console
    #[arg(long)]
    pub debug: bool,

    /// Resolve every link but don't actually download anything
    #[arg(long)]
    pub dryrun: bool,

    /// Directory the series folder is created in
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// External download utility
    #[arg(long, default_value = "aria2c")]
    pub downloader: String,
}
