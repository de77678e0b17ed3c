use std::io::{self, IsTerminal};
use std::time::Duration;

use dx_core::ScanProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.blue} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} records ({per_sec}, eta {eta})";

/// Terminal progress bar fed by scan workers.
#[derive(Debug, Clone)]
pub struct ScanProgressBar {
    bar: ProgressBar,
}

impl ScanProgressBar {
    /// Draws to stderr when it is a terminal and `visible` is set.
    pub fn new(total: usize, visible: bool) -> Self {
        if !(visible && io::stderr().is_terminal()) {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ScanProgress for ScanProgressBar {
    fn advance(&self, records: u64) {
        self.bar.inc(records);
    }
}
