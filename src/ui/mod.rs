//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while bundles are synchronized
//! - The end-of-run summary
//!
//! All progress reporting goes through the SyncReporter trait, allowing
//! different implementations for terminals and for tests.

pub mod summary;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use crate::sync::{BundleOutcome, BundleReport, SyncReport};

/// Progress reporter for a synchronization run
pub trait SyncReporter {
    /// Called once the manifest is known
    fn start(&mut self, total_bundles: usize);

    /// Called before a bundle is processed
    fn bundle_started(&mut self, name: &str, current: usize, total: usize);

    /// Called after a bundle is processed
    fn bundle_finished(&mut self, report: &BundleReport);

    /// Called after the last bundle
    fn finish(&mut self, report: &SyncReport);
}

/// Interactive progress reporter with a progress bar
///
/// The bar draws to stderr and stays hidden when stderr is not a terminal,
/// which is the case inside most build systems.
pub struct InteractiveReporter {
    bundle_pb: ProgressBar,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        let bundle_pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            bundle_pb.set_style(style.progress_chars("#>-"));
        }
        Self { bundle_pb }
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncReporter for InteractiveReporter {
    fn start(&mut self, total_bundles: usize) {
        self.bundle_pb.set_length(total_bundles as u64);
    }

    fn bundle_started(&mut self, name: &str, current: usize, total: usize) {
        self.bundle_pb
            .set_message(format!("({current}/{total}) {name}"));
    }

    fn bundle_finished(&mut self, report: &BundleReport) {
        if let BundleOutcome::Skipped { .. } = report.outcome {
            self.bundle_pb
                .set_message(format!("{} skipped", report.name));
        }
        self.bundle_pb.inc(1);
    }

    fn finish(&mut self, report: &SyncReport) {
        if report.skipped() > 0 {
            self.bundle_pb.abandon();
        } else {
            self.bundle_pb.finish_and_clear();
        }
    }
}

/// Silent progress reporter
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentReporter;

impl SyncReporter for SilentReporter {
    fn start(&mut self, _total_bundles: usize) {}

    fn bundle_started(&mut self, _name: &str, _current: usize, _total: usize) {}

    fn bundle_finished(&mut self, _report: &BundleReport) {}

    fn finish(&mut self, _report: &SyncReport) {}
}

/// Reporter for this process: a progress bar only when stderr is a terminal
pub fn reporter_for_stderr() -> Box<dyn SyncReporter> {
    reporter(Term::stderr().is_term())
}

/// Interactive or silent reporter
pub fn reporter(interactive: bool) -> Box<dyn SyncReporter> {
    if interactive {
        Box::new(InteractiveReporter::new())
    } else {
        Box::new(SilentReporter)
    }
}
