use std::sync::Arc;

use repopulse::activity::RepoRef;
use repopulse::connect_and_migrate_with;
use repopulse::github::GitHubClient;
use repopulse::sync::{
    EntityKind, ProgressCallback, Sink, SyncRequest, sync_issues, sync_metrics,
    sync_pull_requests, sync_releases,
};

use crate::commands::database::{prepare_sqlite_path, resolve_database_url};
use crate::commands::output::{print_report, to_pretty_json, write_json};
use crate::config::Config;
use crate::progress::ProgressReporter;
use crate::{GlobalOptions, OutputFormat};

/// What a sync command collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyncTarget {
    Entities(EntityKind),
    Metrics,
}

/// Run one sync command end to end.
pub(crate) async fn handle_sync(
    target: SyncTarget,
    repo: RepoRef,
    options: &GlobalOptions,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.github_token().ok_or(
        "GitHub token not configured. Set REPOPULSE_GITHUB_TOKEN or GITHUB_TOKEN, \
         or add token to [github] section in config file.",
    )?;

    let reporter = Arc::new(ProgressReporter::new());
    let client = GitHubClient::with_endpoint(&token, &config.github.endpoint)?
        .with_retry_progress(reporter.callback());
    let on_progress = reporter.callback();

    let request = SyncRequest::new(repo)
        .with_since(options.since)
        .with_limit(options.limit);

    let result = match options.format {
        OutputFormat::Json => emit(&client, target, &request, &on_progress, options).await,
        OutputFormat::Sql => {
            persist(&client, target, &request, &on_progress, options, config).await
        }
    };

    reporter.finish();
    result
}

/// Collect everything in memory and write it as JSON only once the run succeeds.
async fn emit(
    client: &GitHubClient,
    target: SyncTarget,
    request: &SyncRequest,
    on_progress: &ProgressCallback,
    options: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let on_progress = Some(on_progress);
    let json = match target {
        SyncTarget::Entities(EntityKind::Issues) => {
            let outcome = sync_issues(client, request, Sink::Emit, on_progress).await?;
            print_report(&outcome.report);
            to_pretty_json(&outcome.items)?
        }
        SyncTarget::Entities(EntityKind::PullRequests) => {
            let outcome = sync_pull_requests(client, request, Sink::Emit, on_progress).await?;
            print_report(&outcome.report);
            to_pretty_json(&outcome.items)?
        }
        SyncTarget::Entities(EntityKind::Releases) => {
            let outcome = sync_releases(client, request, Sink::Emit, on_progress).await?;
            print_report(&outcome.report);
            to_pretty_json(&outcome.items)?
        }
        SyncTarget::Metrics => {
            let metrics = sync_metrics(client, &request.repo, Sink::Emit, on_progress).await?;
            to_pretty_json(&metrics)?
        }
    };

    write_json(&json, options.output.as_deref())?;
    Ok(())
}

/// Upsert into the configured database, resuming from the stored watermark.
async fn persist(
    client: &GitHubClient,
    target: SyncTarget,
    request: &SyncRequest,
    on_progress: &ProgressCallback,
    options: &GlobalOptions,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = resolve_database_url(options.output.as_deref(), config)?;
    prepare_sqlite_path(&database_url)?;
    let db = connect_and_migrate_with(&database_url, config.pool_options()).await?;

    let sink = Sink::Persist(&db);
    let on_progress = Some(on_progress);
    let report = match target {
        SyncTarget::Entities(EntityKind::Issues) => {
            sync_issues(client, request, sink, on_progress).await?.report
        }
        SyncTarget::Entities(EntityKind::PullRequests) => {
            sync_pull_requests(client, request, sink, on_progress).await?.report
        }
        SyncTarget::Entities(EntityKind::Releases) => {
            sync_releases(client, request, sink, on_progress).await?.report
        }
        SyncTarget::Metrics => {
            let metrics = sync_metrics(client, &request.repo, sink, on_progress).await?;
            tracing::info!(
                repo = %request.repo,
                forks = metrics.forks.len(),
                stars = metrics.stars.len(),
                watches = metrics.watches.len(),
                "Metrics snapshot saved"
            );
            return Ok(());
        }
    };

    print_report(&report);
    Ok(())
}
