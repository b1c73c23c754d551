//! Progress bar for perf runs.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use fibdev_bench::RunObserver;

const TEMPLATE: &str = "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} sweeps (eta {eta})";

/// `RunObserver` that drives an indicatif bar on stderr.
pub struct SweepProgressBar {
    bar: ProgressBar,
}

impl SweepProgressBar {
    /// Bar sized for `total` sweeps. Hidden when `visible` is false.
    #[must_use]
    pub fn new(total: usize, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total as u64), target);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style);
        }
        Self { bar }
    }

    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Sweeps recorded so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl RunObserver for SweepProgressBar {
    fn on_sweep(&self, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
    }
}
