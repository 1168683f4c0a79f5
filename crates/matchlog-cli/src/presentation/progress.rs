//! Per-file download bars.

use std::collections::HashMap;
use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex, PoisonError};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use matchlog_download::ProgressCallback;
use tracing::debug;

const BAR_TEMPLATE: &str =
    "{msg:40!} {bar:28.cyan/blue} {bytes:>9}/{total_bytes:>9} {binary_bytes_per_sec}";

/// One bar per file name, drawn on stderr.
///
/// Hidden when stderr is not a terminal so piped output stays clean.
pub struct CliProgress {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl CliProgress {
    pub fn new() -> Arc<Self> {
        let target = if io::stderr().is_terminal() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        Arc::new(Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
        })
    }

    /// A callback feeding this display.
    pub fn callback(self: &Arc<Self>) -> ProgressCallback {
        let this = Arc::clone(self);
        Arc::new(move |name: &str, so_far: u64, total: Option<u64>| {
            this.update(name, so_far, total);
        })
    }

    fn update(&self, name: &str, so_far: u64, total: Option<u64>) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        let bar = bars.entry(name.to_string()).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(total.unwrap_or(0)));
            bar.set_style(bar_style());
            bar.set_message(name.to_string());
            bar
        });
        if let Some(total) = total {
            bar.set_length(total);
        }
        bar.set_position(so_far);
        if total == Some(so_far) {
            bar.finish();
        }
    }

    /// Clear all bars.
    pub fn finish(&self) {
        let bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        for bar in bars.values() {
            bar.finish_and_clear();
        }
        if let Err(e) = self.multi.clear() {
            debug!(error = %e, "Could not clear progress bars");
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar())
}
