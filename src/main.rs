use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use travis_node_updater::config::UpdaterConfig;
use travis_node_updater::document::FsConfigStore;
use travis_node_updater::updater::{UpdateRequest, Updater};
use travis_node_updater::version::registries::NodeDistRegistry;

#[derive(Parser)]
#[command(name = "travis-node-updater")]
#[command(
    version,
    about = "Updates the Node.js target versions of your .travis.yml"
)]
struct Cli {
    /// JSON file with updater options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Version range to match ("latest", ">=8", "^10 || ^8", ...)
    #[arg(long)]
    range: Option<String>,

    /// Only match versions released on or after this date
    #[arg(long, value_name = "DATE")]
    min_date: Option<String>,

    /// Only match versions released on or before this date
    #[arg(long, value_name = "DATE")]
    max_date: Option<String>,

    /// Configuration file to update
    #[arg(long, value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// URL of the JSON version index
    #[arg(long, value_name = "URL")]
    catalog_url: Option<String>,

    /// Number of matched versions kept per major version
    #[arg(long, value_name = "N")]
    versions_per_major: Option<NonZeroUsize>,

    /// Replace the configured versions instead of adding to them
    #[arg(long)]
    replace: bool,

    /// Key holding the version list
    #[arg(long, value_name = "KEY")]
    list_key: Option<String>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Defaults, then the options file, then command line flags
    fn into_config(self) -> anyhow::Result<UpdaterConfig> {
        let mut config = match &self.options {
            Some(path) => UpdaterConfig::from_file(path)?,
            None => UpdaterConfig::default(),
        };

        config.override_version(self.range, self.min_date, self.max_date);
        if let Some(path) = self.config_file {
            config.config_file_path = path;
        }
        if let Some(url) = self.catalog_url {
            config.catalog_url = url;
        }
        if let Some(n) = self.versions_per_major {
            config.versions_per_major = n;
        }
        if self.replace {
            config.replace_previous_versions = true;
        }
        if let Some(key) = self.list_key {
            config.list_key = key;
        }

        Ok(config)
    }
}

/// Logs go to stderr (or `log_file`); RUST_LOG overrides `level`
fn init_tracing(level: LogLevel, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = log_file
        .file_name()
        .with_context(|| format!("invalid log file path {}", log_file.display()))?;
    let directory = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

async fn run(config: UpdaterConfig) -> anyhow::Result<()> {
    let request = UpdateRequest::from_config(&config)?;
    let registry = NodeDistRegistry::new(&config.catalog_url)?;
    let updater = Updater::new(Arc::new(registry), Arc::new(FsConfigStore));

    let report = updater.run(&request).await?;

    if report.changed() {
        info!("Version list changed from {:?}", report.previous);
    } else {
        info!("Version list already up to date");
    }
    println!(
        "{} {}: {}",
        request.config_file.display(),
        request.list_key,
        report.versions.join(", ")
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_level, cli.log_file.as_deref())?;
    let config = cli.into_config()?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(config))
        .context("Error executing the travis updater")
}
