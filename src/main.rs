//! bundlesync - remote resource bundles for application builds
//!
//! Run from a build phase: fetches the manifest of bundles for the application
//! being built, caches each bundle version once, and stages the current
//! version of every bundle into the application's resources directory.

use clap::CommandFactory;

mod archive;
mod cache;
mod cli;
mod common;
mod config;
mod error;
mod fetch;
mod logging;
mod manifest;
mod stage;
mod sync;
mod ui;

use cache::CacheStats;
use cli::Cli;
use config::{BuildEnvironment, SyncConfig};
use error::{Result, SyncError};
use fetch::HttpFetcher;
use sync::{SyncReport, Synchronizer};

fn run(cli: &Cli, token: &str) -> Result<(SyncReport, Option<CacheStats>)> {
    let env = BuildEnvironment::from_env();
    let config = SyncConfig::from_cli(cli, &env)?;

    tracing::debug!("API base: {}", config.api_base);
    tracing::debug!(
        "Application: {} {} ({}), debug build: {}",
        config.identity.bundle_id,
        config.identity.short_version,
        config.identity.build_number,
        config.identity.debug_flag()
    );
    tracing::debug!("Cache: {}", config.cache_root.display());

    // An unusable HTTP client leaves the manifest just as unreachable
    let fetcher = match HttpFetcher::new(config.timeout) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            let report = sync::skip_unavailable_manifest(config.manifest_failure, e)?;
            return Ok((report, None));
        }
    };
    let synchronizer = Synchronizer::new(&config, &fetcher);
    let mut reporter = ui::reporter_for_stderr();
    let report = synchronizer.run(token, reporter.as_mut())?;

    let stats = if config.verbose {
        cache::cache_stats(synchronizer.cache().root())
            .inspect_err(|e| tracing::debug!("Cache statistics unavailable: {}", e))
            .ok()
    } else {
        None
    };

    Ok((report, stats))
}

fn main() {
    let cli = Cli::parse_args();

    let Some(token) = cli.token.clone() else {
        eprintln!("Error: {}", SyncError::MissingToken);
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    };

    logging::init(cli.verbose);
    if !cli.ignored.is_empty() {
        tracing::warn!("Ignoring unrecognized arguments: {}", cli.ignored.join(" "));
    }

    match run(&cli, &token) {
        Ok((report, stats)) => ui::summary::print_summary(&report, stats.as_ref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
