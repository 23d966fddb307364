//! Runs the selected subcommand against the shop backend.

use crate::cli::{Args, Command, OutputFormat};
use crate::error::AppResult;
use crate::report::{render_snapshot, render_state};
use chrono::Utc;
use shopdash_analytics::{
    load_dashboard_data, AnalyticsOptions, DashboardCharts, DashboardSession, DashboardSnapshot,
    HttpRecordSource, RecordSource,
};
use shopdash_common::LoggingConfig;
use shopdash_config::{BackendConfig, Config, ConfigCache, ConfigLoader, ConfigValidator};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// The command line application: parsed arguments plus live configuration.
pub struct App {
    args: Args,
    config: ConfigCache,
}

impl App {
    /// Loads the configuration named by `--config`, `SHOPDASH_CONFIG_PATH` or a default
    /// file, falling back to built-in defaults.
    pub fn new(args: Args) -> AppResult<Self> {
        let config = match args.config.clone().or_else(ConfigLoader::locate) {
            Some(path) => {
                let loaded = ConfigLoader::load_from_file(&path)?;
                ConfigCache::with_source(loaded, path)
            }
            None => ConfigCache::new(ConfigLoader::load()?),
        };

        let app = Self { args, config };
        app.config()?;
        Ok(app)
    }

    /// Active configuration with command line overrides applied.
    pub fn config(&self) -> AppResult<Config> {
        let mut config = (*self.config.get()).clone();
        self.args.apply_overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Logging settings for [`shopdash_common::init_logging`].
    pub fn logging_config(&self) -> AppResult<LoggingConfig> {
        Ok(self.config()?.logging.to_logging_config())
    }

    /// Runs the subcommand given on the command line.
    pub async fn run(&self) -> AppResult<()> {
        let config = self.config()?;
        match self.args.command() {
            Command::Snapshot { format } => {
                let source = HttpRecordSource::new(&config.backend)?;
                let snapshot = self.snapshot_from(&source).await?;
                println!(
                    "{}",
                    render_snapshot(&snapshot, format, config.dashboard.top_products_limit)?
                );
            }
            Command::Charts { top } => {
                let source = HttpRecordSource::new(&config.backend)?;
                let snapshot = self.snapshot_from(&source).await?;
                let charts =
                    DashboardCharts::from_snapshot(&snapshot, top.or(config.dashboard.top_products_limit));
                println!("{}", serde_json::to_string_pretty(&charts)?);
            }
            Command::Watch { format } => self.watch(format).await?,
        }
        Ok(())
    }

    /// Fetches once from `source` and aggregates with the configured options.
    pub async fn snapshot_from<S>(&self, source: &S) -> AppResult<DashboardSnapshot>
    where
        S: RecordSource + ?Sized,
    {
        let config = self.config()?;
        let options = AnalyticsOptions::from_config(&config.dashboard)?;
        let data = load_dashboard_data(source).await?;
        Ok(DashboardSnapshot::from_data(&data, &options, Utc::now()))
    }

    /// Refreshes until Ctrl-C. Failed cycles are reported and the loop carries on.
    #[instrument(skip(self))]
    async fn watch(&self, format: OutputFormat) -> AppResult<()> {
        let session = DashboardSession::new();
        let mut client: Option<(BackendConfig, HttpRecordSource)> = None;

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            if let Err(e) = self.config.reload() {
                warn!(error = %e, "Configuration reload failed");
            }
            let config = self.config()?;

            let current = match client.take() {
                Some((backend, source)) if backend == config.backend => (backend, source),
                _ => {
                    info!(base_url = %config.backend.base_url, "Connecting to backend");
                    (config.backend.clone(), HttpRecordSource::new(&config.backend)?)
                }
            };
            let source = &client.insert(current).1;
            let options = AnalyticsOptions::from_config(&config.dashboard)?;

            tokio::select! {
                _ = &mut shutdown => break,
                _ = session.refresh(source, &options) => {}
            }

            println!(
                "{}",
                render_state(&session.state(), format, config.dashboard.top_products_limit)?
            );

            let interval = Duration::from_secs(config.dashboard.refresh_interval_seconds);
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("Interrupted, stopping");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_flags_override_file() {
        let file = config_file("backend:\n  base_url: \"http://file.local/api\"\n");
        let path = file.path().to_str().unwrap();
        let args =
            Args::try_parse_from(["shopdash", "--config", path, "--base-url", "https://flag.local/api"])
                .unwrap();

        let app = App::new(args).unwrap();
        assert_eq!(app.config().unwrap().backend.base_url, "https://flag.local/api");
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let file = config_file("dashboard:\n  timezone: \"Africa/Tunis\"\n");
        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from(["shopdash", "-c", path, "--base-url", "ftp://shop"]).unwrap();
        assert!(App::new(args).is_err());
    }

    #[test]
    fn test_log_level_flag() {
        let file = config_file("logging:\n  level: warn\n");
        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from(["shopdash", "-c", path, "-l", "debug"]).unwrap();
        let logging = App::new(args).unwrap().logging_config().unwrap();
        assert_eq!(logging.level, "debug");
    }
}
