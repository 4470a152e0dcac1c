use std::io::Write;
use std::path::Path;

use console::style;
use repopulse::sync::{StopReason, SyncReport};
use serde::Serialize;

/// Render `value` as pretty-printed JSON.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Write rendered JSON to `path`, or to stdout when no path is given.
pub(crate) fn write_json(json: &str, path: Option<&str>) -> std::io::Result<()> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::create(Path::new(path))?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn stop_label(stop: StopReason) -> &'static str {
    match stop {
        StopReason::LastPage => "last page",
        StopReason::Exhausted => "reached cutoff",
        StopReason::LimitReached => "limit reached",
    }
}

/// One-line summary of a sync run.
pub(crate) fn format_report(report: &SyncReport) -> String {
    let mut line = format!(
        "{}: {} fetched, {} persisted over {} page(s) ({})",
        report.kind,
        report.fetched,
        report.persisted,
        report.pages,
        stop_label(report.stop)
    );
    if let Some(since) = report.since {
        line.push_str(&format!(", since {}", since.to_rfc3339()));
    }
    if let Some(watermark) = report.watermark {
        line.push_str(&format!(", watermark {}", watermark.to_rfc3339()));
    }
    line
}

/// Print the run summary to stderr, keeping stdout free for JSON.
pub(crate) fn print_report(report: &SyncReport) {
    eprintln!("{} {}", style("✓").green().bold(), format_report(report));
}
