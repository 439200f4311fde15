use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;

pub trait TrackerBuilder<T: Tracker<U>, U> {
    fn build(self) -> T;
}

pub trait Tracker<Inc> {
    fn step(&self, step: Inc) -> &Self;
    fn finish(self);
}

const PB_STYLE: &str =
    "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> =
    Lazy::new(|| ProgressStyle::with_template(SPINNER_STYLE).ok().map(|style| style.tick_chars(TICK)));

/// Byte-count progress for a download.
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl Tracker<u64> for ProgressTracker {
    fn step(&self, len: u64) -> &Self {
        self.pb.inc(len);
        self
    }

    fn finish(self) { self.pb.finish_and_clear(); }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressTrackerBuilder {
    len:    Option<u64>,
    prefix: Option<String>,
    hidden: bool,
}

impl ProgressTrackerBuilder {
    pub fn with_len(mut self, len: Option<u64>) -> Self {
        self.len = len;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Draw nothing. Used when output is not a terminal and in tests.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl TrackerBuilder<ProgressTracker, u64> for ProgressTrackerBuilder {
    fn build(self) -> ProgressTracker {
        let (pb, style) = match self.len {
            Some(len) => (ProgressBar::new(len), PB_TEMPLATE.as_ref()),
            None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE.as_ref()),
        };
        let pb = match style {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        if self.hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Some(prefix) = self.prefix {
            pb.set_prefix(prefix);
        }
        ProgressTracker { pb }
    }
}
