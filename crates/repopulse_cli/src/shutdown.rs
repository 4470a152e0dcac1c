use std::future::Future;

use console::Term;

/// Exit status for a run cancelled with Ctrl+C.
pub(crate) const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Run `fut` to completion unless Ctrl+C arrives first.
///
/// Returns `None` when interrupted. The future is dropped at its current
/// await point, so an in-flight entity transaction rolls back and nothing
/// partial is committed.
pub(crate) async fn until_interrupted<F: Future>(fut: F) -> Option<F::Output> {
    tokio::select! {
        output = fut => Some(output),
        () = wait_for_ctrl_c() => {
            if Term::stderr().is_term() {
                eprintln!("\n\nInterrupted, rolling back the current entity.");
            } else {
                tracing::warn!("Interrupted, rolling back the current entity");
            }
            None
        }
    }
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
