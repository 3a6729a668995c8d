mod config;
mod dispatch;
mod errors;
mod fetch;
mod page;
mod site;

use std::process::ExitCode;

use clap::Parser;

use crate::config::Config;
use crate::dispatch::{Aria2, Dispatcher};
use crate::fetch::Fetcher;
use crate::site::GogoAnime;

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder
        .filter_level(log::LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let site = GogoAnime::new(Fetcher::new()?);
    let launcher = Aria2::new(&config.downloader);
    let summary = Dispatcher::new(config, site, launcher).run().await?;
    log::info!(
        "done: {} episode(s) dispatched, {} skipped",
        summary.dispatched,
        summary.skipped
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };
    init_logging(config.debug);
    log::info!(
        "GoGoDownload - A tool to download anime from GoGoAnime, version {}",
        env!("CARGO_PKG_VERSION")
    );

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
