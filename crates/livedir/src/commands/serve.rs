//! `livedir serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use livedir_config::{CliSettings, Config};
use livedir_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover livedir.toml).
    #[arg(short, long, env = "LIVEDIR_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Directory to serve and watch (overrides config).
    #[arg(short, long)]
    pub(crate) root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    pub(crate) host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    /// Seconds between browser reloads (overrides config).
    #[arg(short, long)]
    pub(crate) interval: Option<u32>,

    /// Enable verbose output (request traces and watcher details).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root: self.root,
            interval: self.interval,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!("Serving at {}", config.server.display_url()));
        output.info(&format!(
            "Root directory: {}",
            config.site_resolved.root.display()
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config file: {}", path.display()));
        }
        output.info(&format!("Reload interval: {}s", config.reload.interval));

        run_server(server_config_from_config(&config)).await?;

        output.warning("Shutting down server...");

        Ok(())
    }
}
