#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal plumbing for the disaster feed CLI.
//!
//! [`IndicatifProgress`] renders generation progress through the
//! [`ProgressCallback`] trait, and [`init_logger`] routes `log` output
//! through `indicatif-log-bridge` so log lines don't tear the bars.

use std::sync::Arc;
use std::time::Duration;

use disaster_feed_mock::progress::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;
pub use log::LevelFilter;

/// An `indicatif` [`ProgressBar`] that implements [`ProgressCallback`].
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Applied once `set_total()` reports the record count.
    bar_style: ProgressStyle,
}

const SPINNER_TEMPLATE: &str = "{spinner:.red} {msg}";
const POSTS_TEMPLATE: &str =
    "  {msg:<28} {wide_bar:.red/dim} {human_pos}/{human_len} posts ({per_sec}, {eta} left)";

impl IndicatifProgress {
    /// Creates a bar for generating posts of `category` (e.g. "Flood" or
    /// "All"). It spins while the generator loads, then counts posts
    /// once [`ProgressCallback::set_total()`] reports the batch size.
    #[must_use]
    pub fn posts_bar(multi: &MultiProgress, category: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Generating {category} posts"));

        let bar_style = ProgressStyle::with_template(POSTS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");

        Arc::new(Self { bar, bar_style })
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge`.
///
/// `RUST_LOG` overrides `default_level` when set. Returns the
/// [`MultiProgress`] that progress bars must be added to.
#[must_use]
pub fn init_logger(default_level: LevelFilter) -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // Already set when called twice (tests).
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}
