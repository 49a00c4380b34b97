//! End-of-run summary

use console::Style;

use crate::cache::CacheStats;
use crate::sync::{BundleOutcome, CacheSource, SyncReport};

/// Summary lines for a finished run, without styling
pub fn summary_lines(report: &SyncReport) -> Vec<String> {
    if let Some(reason) = &report.manifest_error {
        return vec![format!("Skipped remote bundles for this build: {reason}")];
    }

    let mut lines: Vec<String> = report
        .bundles
        .iter()
        .map(|bundle| match &bundle.outcome {
            BundleOutcome::Staged { source, staged } => {
                let how = match source {
                    CacheSource::Cached => "cached",
                    CacheSource::Downloaded => "downloaded",
                };
                let failures = if staged.failed > 0 {
                    format!(", {} item(s) failed to copy", staged.failed)
                } else {
                    String::new()
                };
                format!("  {} {} ({how}{failures})", bundle.name, bundle.version)
            }
            BundleOutcome::Skipped { reason } => {
                format!("  {} {} skipped: {reason}", bundle.name, bundle.version)
            }
        })
        .collect();

    lines.insert(
        0,
        format!(
            "Synchronized {} bundle(s): {} downloaded, {} cached, {} skipped",
            report.bundles.len(),
            report.downloaded(),
            report.cache_hits(),
            report.skipped()
        ),
    );
    lines
}

/// Print the run summary, plus cache statistics when available
pub fn print_summary(report: &SyncReport, stats: Option<&CacheStats>) {
    let mut lines = summary_lines(report).into_iter();
    if let Some(headline) = lines.next() {
        let style = if report.manifest_error.is_some()
            || report.skipped() > 0
            || report.copy_failures() > 0
        {
            Style::new().bold().yellow()
        } else {
            Style::new().bold().green()
        };
        println!("{}", style.apply_to(headline));
    }
    for line in lines {
        println!("{line}");
    }

    if let Some(stats) = stats {
        println!(
            "{} {} bundle(s), {} version(s), {}",
            Style::new().bold().apply_to("Cache:"),
            stats.bundles,
            stats.versions,
            stats.formatted_size()
        );
    }
}
