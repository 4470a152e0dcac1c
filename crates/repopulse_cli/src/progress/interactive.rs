use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use repopulse::sync::SyncProgress;

/// Progress state grouped under a single lock.
#[derive(Default)]
struct ProgressState {
    /// Spinner for primary page fetching.
    fetch_bar: Option<ProgressBar>,
    /// Bar for per-entity persistence, created on the first commit.
    save_bar: Option<ProgressBar>,
    /// Spinner for the metrics snapshot.
    metrics_bar: Option<ProgressBar>,
    /// Comments fetched through continuation pages.
    extra_comments: usize,
}

/// Interactive progress reporter using indicatif.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    /// A reporter that draws nothing.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden()),
            state: Mutex::new(ProgressState::default()),
        }
    }

    pub fn handle(&self, event: SyncProgress) {
        let mut state = self.state.lock().unwrap();

        match event {
            SyncProgress::Started { kind, repo, since } => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(Self::spinner_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar.set_prefix(format!("{:12}", kind));
                let msg = match since {
                    Some(since) => format!("Fetching {} since {}...", repo, since.to_rfc3339()),
                    None => format!("Fetching {}...", repo),
                };
                bar.set_message(msg);
                state.fetch_bar = Some(bar);
                state.extra_comments = 0;
            }

            SyncProgress::FetchedPage {
                page,
                count,
                remaining,
                ..
            } => {
                if let Some(ref bar) = state.fetch_bar {
                    bar.set_position(page as u64);
                    bar.set_message(format!(
                        "Page {} ({} nodes, {} quota left)",
                        page, count, remaining
                    ));
                }
            }

            SyncProgress::FetchedComments { number, count, .. } => {
                state.extra_comments += count;
                if let Some(ref bar) = state.fetch_bar {
                    bar.set_message(format!(
                        "More comments on #{} ({} extra so far)",
                        number, state.extra_comments
                    ));
                }
            }

            SyncProgress::FetchComplete { total, stop, .. } => {
                if let Some(bar) = state.fetch_bar.take() {
                    bar.finish_with_message(format!("Fetched {} ({:?})", total, stop));
                }
            }

            SyncProgress::Persisted {
                kind,
                persisted,
                total,
                ..
            } => {
                let bar = state.save_bar.get_or_insert_with(|| {
                    let bar = self.multi.add(ProgressBar::new(total as u64));
                    bar.set_style(Self::bar_style());
                    bar.set_prefix(format!("{:12}", "save"));
                    bar.set_message(format!("Saving {}...", kind));
                    bar
                });
                bar.set_position(persisted as u64);
                if persisted >= total {
                    bar.finish_with_message(format!("Saved {} {}", persisted, kind));
                }
            }

            SyncProgress::WatermarkAdvanced { watermark, .. } => {
                if let Some(ref bar) = state.save_bar {
                    bar.set_message(format!("Watermark {}", watermark.to_rfc3339()));
                }
            }

            SyncProgress::FetchingMetrics { repo } => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(Self::spinner_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar.set_prefix(format!("{:12}", "metrics"));
                bar.set_message(format!("Fetching metrics for {}...", repo));
                state.metrics_bar = Some(bar);
            }

            SyncProgress::MetricsPersisted {
                paths, referrers, ..
            } => {
                if let Some(bar) = state.metrics_bar.take() {
                    bar.finish_with_message(format!(
                        "Saved metrics ({} paths, {} referrers)",
                        paths, referrers
                    ));
                }
            }

            SyncProgress::Retrying {
                operation,
                retry_after_ms,
                attempt,
            } => {
                let msg = format!(
                    "{} failed, retry {} in {}ms",
                    operation, attempt, retry_after_ms
                );
                match state.fetch_bar {
                    Some(ref bar) => bar.set_message(msg),
                    None => {
                        let _ = self.multi.println(msg);
                    }
                }
            }

            _ => {}
        }
    }

    /// Finish all progress bars.
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        for bar in [
            state.fetch_bar.take(),
            state.save_bar.take(),
            state.metrics_bar.take(),
        ]
        .into_iter()
        .flatten()
        {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {msg}")
            .expect("Invalid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
