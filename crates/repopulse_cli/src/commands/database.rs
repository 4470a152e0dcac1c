use std::path::Path;

use crate::config::Config;

/// Pick the connection string for commands that write to a database.
///
/// `--output` wins over `[database] url`.
pub(crate) fn resolve_database_url(
    output: Option<&str>,
    config: &Config,
) -> Result<String, Box<dyn std::error::Error>> {
    output
        .map(str::to_string)
        .or_else(|| config.database.url.clone())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            "A database connection string is required: pass --output or set [database] url \
             (REPOPULSE_DATABASE_URL)"
                .into()
        })
}

/// Ensure the directory holding a SQLite file exists.
pub(crate) fn prepare_sqlite_path(database_url: &str) -> std::io::Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    // Strip query parameters (e.g., ?mode=rwc) before path operations
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    let db_path = Path::new(db_path);

    if db_path.is_relative() && !db_path.as_os_str().is_empty() {
        tracing::warn!(
            "Database path '{}' is relative - behavior depends on current directory. \
             Consider using an absolute path.",
            db_path.display()
        );
    }

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    fn config_with_url(url: Option<&str>) -> Config {
        Config {
            database: DatabaseConfig {
                url: url.map(str::to_string),
                ..DatabaseConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_output_flag_wins_over_config() {
        let config = config_with_url(Some("postgres://localhost/activity"));
        let url = resolve_database_url(Some("sqlite:///tmp/a.db"), &config).unwrap();
        assert_eq!(url, "sqlite:///tmp/a.db");
    }

    #[test]
    fn test_config_url_used_without_output_flag() {
        let config = config_with_url(Some("postgres://localhost/activity"));
        let url = resolve_database_url(None, &config).unwrap();
        assert_eq!(url, "postgres://localhost/activity");
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let config = config_with_url(None);
        let err = resolve_database_url(None, &config).unwrap_err();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_prepare_sqlite_path_creates_parent() {
        let dir = std::env::temp_dir().join(format!("repopulse-db-test-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/activity.db?mode=rwc", dir.display());

        prepare_sqlite_path(&url).unwrap();
        assert!(dir.join("nested").is_dir());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_prepare_ignores_non_sqlite_urls() {
        prepare_sqlite_path("postgres://localhost/activity").unwrap();
    }
}
