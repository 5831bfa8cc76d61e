//! # Administration Server
//!
//! Hosts the administration panel on `Axum`: loads the layered configuration, wires the
//! host application, bootstraps the panel, publishes the configured schemas, finalizes
//! the host, and serves over HTTP or HTTPS until a shutdown signal arrives.
//!
//! ## Example
//! ```no_run
//! use admin_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder().port(5000).build()?.run().await
//! }
//! ```

mod router;
mod settings;

pub use settings::ServerSettings;

use admin_domain::constants::{DEFAULT_ENTRY_POINT_GROUP, SCHEMA_REGISTRY_KEY};
use admin_kernel::schema::SchemaRegistry;
use admin_kernel::server::HostApp;
use admin_panel::{AdminExtension, EntryPoints, ResourceViewFactory, ViewFactory};
use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct ServerBuilder {
    settings: ServerSettings,
    entry_point_group: String,
    entry_points: EntryPoints,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self {
            settings: ServerSettings::default(),
            entry_point_group: DEFAULT_ENTRY_POINT_GROUP.to_owned(),
            entry_points: EntryPoints::new(),
        }
    }
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn settings(mut self, settings: ServerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub const fn port(mut self, port: u16) -> Self {
        self.settings.server.port = port;
        self
    }

    pub fn entry_point_group(mut self, group: impl Into<String>) -> Self {
        self.entry_point_group = group.into();
        self
    }

    /// Provides a compiled-in view factory that manifest entries can point at.
    pub fn provide(mut self, value: impl Into<String>, factory: impl ViewFactory + 'static) -> Self {
        self.entry_points = self.entry_points.provide(value, factory);
        self
    }

    /// Registers a compiled-in view under the configured discovery group.
    pub fn register(mut self, name: impl Into<String>, factory: impl ViewFactory + 'static) -> Self {
        self.entry_points = self.entry_points.register(&self.entry_point_group, name, factory);
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.settings.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and wires the host application.
    ///
    /// # Process
    /// 1. Validates the TLS files, if any
    /// 2. Declares the manifest entries and provides the `[[views]]` factories
    /// 3. Initializes the administration extension on a fresh host
    /// 4. Publishes the `[schemas]` section as the schema registry
    /// 5. Finalizes the host, binding view schemas, and layers request tracing
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * Required panel configuration is missing or a view plugin cannot be loaded
    /// * A declared view schema is not in the schema registry
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let Self { settings, entry_point_group, entry_points } = self;
        let address = SocketAddr::new(settings.server.address, settings.server.port);
        info!(%address, group = %entry_point_group, "Initializing server");

        let entry_points = settings
            .views
            .iter()
            .cloned()
            .fold(entry_points.declare_manifest(&settings.entry_points), |catalog, view| {
                let value = view.name.clone();
                catalog.provide(value, ResourceViewFactory::new(view))
            });

        let mut app = HostApp::with_config(env!("CARGO_PKG_NAME"), settings.app);
        let admin = AdminExtension::builder()
            .entry_point_group(entry_point_group)
            .entry_points(entry_points)
            .init(&mut app)
            .context("Administration bootstrap failed")?;

        let schemas = settings.schemas.into_iter().collect::<SchemaRegistry>();
        info!(schemas = schemas.len(), "Publishing schema registry");
        app.extensions_mut().insert(SCHEMA_REGISTRY_KEY, schemas);

        let router = app.into_router().context("Failed to finalize the host application")?;

        Ok(Server { router: router::init(router), config: settings.server, admin })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    router: Router,
    config: admin_domain::config::ServerConfig,
    admin: AdminExtension,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let address = SocketAddr::new(self.config.address, self.config.port);
        info!(%address, ssl = self.config.ssl.is_some(), "Starting server");

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(30)));
        });

        if let Some(ssl_config) = &self.config.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(self.router.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(self.router.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// The finalized dispatcher, for driving requests without a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    #[must_use]
    pub const fn admin(&self) -> &AdminExtension {
        &self.admin
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
