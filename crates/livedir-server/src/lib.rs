//! Static file server with live reload.
//!
//! Serves a directory over HTTP and keeps browsers showing the latest
//! version of every page:
//! - `.html` responses get a `<meta http-equiv="refresh">` directive in
//!   front of each `</head>`
//! - every response disables client and proxy caching
//! - a recursive file watcher records when anything under the root changes
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use livedir_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "0.0.0.0".to_string(),
//!         port: 8000,
//!         root: PathBuf::from("public"),
//!         reload_interval: 1,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (no-cache headers on every response)
//!                        │
//!                        ├─► *.html ──► read + inject refresh directive
//!                        │
//!                        └─► other ──► tower-http ServeDir ──► directory listing
//!
//! notify ──events──► FileWatcher task ──► ChangeTimestamp ◄── AppState
//! ```

mod app;
mod error;
mod handlers;
mod live_reload;
mod middleware;
mod state;
mod static_files;
mod timestamp;

use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use state::AppState;
use tokio::net::TcpListener;

pub use error::{RunError, ServerError};
pub use live_reload::FileWatcher;
pub use timestamp::ChangeTimestamp;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory served over HTTP and watched for changes.
    pub root: PathBuf,
    /// Seconds between browser reloads.
    pub reload_interval: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8000,
            root: PathBuf::from("public"),
            reload_interval: 1,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start or the file watcher dies
/// while serving.
pub async fn run_server(config: ServerConfig) -> Result<(), RunError> {
    let addr = resolve_addr(&config.host, config.port).await?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| RunError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    tracing::info!(address = %listener.local_addr()?, "Starting server");

    let last_modified = Arc::new(ChangeTimestamp::new());
    serve(listener, config, last_modified, shutdown_signal()).await
}

/// Resolve `host:port` to the first socket address it names.
async fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr, RunError> {
    let invalid = |source| RunError::InvalidAddress {
        addr: format!("{host}:{port}"),
        source,
    };

    tokio::net::lookup_host((host, port))
        .await
        .map_err(invalid)?
        .next()
        .ok_or_else(|| {
            invalid(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no addresses resolved",
            ))
        })
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// Starts the file watcher before accepting connections; every file change
/// it sees advances `last_modified`. On shutdown the listener stops
/// accepting, then the watcher is stopped and its task joined.
///
/// # Errors
///
/// Returns an error if the root directory is missing, the watcher cannot be
/// set up, the accept loop fails, or the watcher stops while serving.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    last_modified: Arc<ChangeTimestamp>,
    shutdown: F,
) -> Result<(), RunError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if !config.root.is_dir() {
        return Err(RunError::RootNotFound(config.root));
    }

    let mut watcher = FileWatcher::start(&config.root, Arc::clone(&last_modified))?;
    tracing::info!(root = %config.root.display(), "Watching for changes");

    let state = Arc::new(AppState::new(
        config.root,
        config.reload_interval,
        Arc::clone(&last_modified),
    ));
    let app = app::create_router(state);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .into_future();

    tokio::select! {
        result = server => result?,
        result = watcher.finished() => {
            let reason = match result {
                Ok(()) => "event stream closed".to_owned(),
                Err(e) => e.to_string(),
            };
            return Err(RunError::WatcherStopped(reason));
        }
    }

    watcher
        .stop()
        .await
        .map_err(|e| RunError::WatcherStopped(e.to_string()))?;
    tracing::info!(last_change = %last_modified.get(), "File watcher stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from livedir config.
///
/// # Arguments
///
/// * `config` - Loaded livedir configuration
#[must_use]
pub fn server_config_from_config(config: &livedir_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root: config.site_resolved.root.clone(),
        reload_interval: config.reload.interval,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.root, PathBuf::from("public"));
        assert_eq!(config.reload_interval, 1);
    }

    #[test]
    fn test_server_config_from_config() {
        let config = livedir_config::Config::default();
        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.host, config.server.host);
        assert_eq!(server_config.port, 8000);
        assert_eq!(server_config.root, config.site_resolved.root);
        assert_eq!(server_config.reload_interval, 1);
    }

    #[tokio::test]
    async fn test_serve_missing_root_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            root: dir.path().join("public"),
            ..ServerConfig::default()
        };

        let err = serve(
            listener,
            config,
            Arc::new(ChangeTimestamp::new()),
            std::future::pending(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RunError::RootNotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_addr_ip_literal() {
        let addr = resolve_addr("127.0.0.1", 8000).await.unwrap();
        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 8000)));
    }

    #[tokio::test]
    async fn test_resolve_addr_rejects_malformed_host() {
        let err = resolve_addr("local\0host", 8000).await.unwrap_err();

        assert!(matches!(err, RunError::InvalidAddress { .. }));
        assert!(err.to_string().starts_with("Invalid address local\0host:8000"));
    }

    #[tokio::test]
    async fn test_run_server_reports_invalid_address() {
        let config = ServerConfig {
            host: "local\0host".to_owned(),
            ..ServerConfig::default()
        };

        let err = run_server(config).await.unwrap_err();

        assert!(matches!(err, RunError::InvalidAddress { .. }));
    }
}
