//! CLI command implementations
//!
//! Each command builds its own store instance from configuration; nothing
//! is shared through module-level state.

use std::io::{self, Write};
use std::sync::Arc;

use super::args::{Command, ConfigArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::store::JsonFileStore;

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { args } => init(&args).await,
        Command::Serve { args, host, port } => serve(&args, host, port).await,
        Command::List {
            args,
            category,
            query,
        } => list(&args, category.as_deref(), query.as_deref()).await,
    }
}

/// Create the data file and exit. Fails if it already exists.
pub async fn init(args: &ConfigArgs) -> CliResult<()> {
    let config = Config::from_args(args)?;
    let data_path = config.store.data_path();
    if data_path.exists() {
        return Err(CliError::already_initialized(data_path.display()));
    }

    let store = JsonFileStore::open(&config.store).await?;
    writeln!(io::stdout(), "{}", store.data_path().display())?;
    Ok(())
}

/// Open the store and serve HTTP until interrupted
pub async fn serve(args: &ConfigArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = Config::from_args(args)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.server.socket_addr()),
            ("data_dir", &config.store.data_dir.display().to_string()),
        ],
    );

    let metrics = Arc::new(MetricsRegistry::new());
    let store = JsonFileStore::open_with_metrics(&config.store, metrics).await?;

    HttpServer::new(config.server, Arc::new(store))
        .start()
        .await
        .map_err(|e| CliError::boot_failed(e.to_string()))
}

/// Print the matching products as a result envelope
pub async fn list(
    args: &ConfigArgs,
    category: Option<&str>,
    query: Option<&str>,
) -> CliResult<()> {
    let config = Config::from_args(args)?;
    let store = JsonFileStore::open(&config.store).await?;

    let result = match (category, query) {
        (Some(category), _) => store.find_by_category(category).await,
        (None, Some(query)) => store.find_by_name_contains(query).await,
        (None, None) => store.read_all().await,
    };

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::io_error(format!("failed to render result: {}", e)))?;
    writeln!(io::stdout(), "{}", rendered)?;

    if result.is_success() {
        Ok(())
    } else {
        Err(CliError::store_failed(result.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(dir: &TempDir) -> ConfigArgs {
        ConfigArgs {
            config: dir.path().join("productdb.json"),
            data_dir: Some(dir.path().join("data")),
        }
    }

    #[tokio::test]
    async fn test_init_creates_file_once() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir);

        init(&args).await.unwrap();
        assert!(dir.path().join("data/products.json").exists());

        let err = init(&args).await.unwrap_err();
        assert_eq!(err.code(), CliErrorCode::AlreadyInitialized);
    }

    #[tokio::test]
    async fn test_list_reports_corrupt_store() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir);
        init(&args).await.unwrap();
        fs::write(dir.path().join("data/products.json"), "not json").unwrap();

        let err = list(&args, None, None).await.unwrap_err();
        assert_eq!(err.code(), CliErrorCode::StoreFailed);
        assert_eq!(err.message(), "Failed to read products");
    }

    #[tokio::test]
    async fn test_list_by_category_succeeds() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir);
        list(&args, Some("Electronics"), None).await.unwrap();
    }
}
