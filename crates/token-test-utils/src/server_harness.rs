//! Test server harness for E2E testing
//!
//! Provides TestTokenServer for spawning real token service instances in
//! tests.

use crate::fixtures::test_config;
use std::net::SocketAddr;
use std::sync::Arc;
use token_service::config::Config;
use token_service::handlers::AppState;
use token_service::routes;
use tokio::task::JoinHandle;

/// Test harness for spawning the token issuance server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_token_flow_e2e() -> Result<(), anyhow::Error> {
///     let server = TestTokenServer::spawn().await?;
///     let client = reqwest::Client::new();
///
///     let response = client
///         .get(format!("{}/token?identity=alice&roomName=room42", server.url()))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestTokenServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestTokenServer {
    /// Spawn a test server with the default deterministic configuration.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(test_config()).await
    }

    /// Spawn a test server with a caller-supplied configuration.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        // Create application state
        let state = Arc::new(AppState {
            config: config.clone(),
        });

        // Initialize metrics recorder for the test server.
        // The global recorder can only be installed once per process; later
        // spawns fall back to a standalone recorder so each server still has
        // a working /metrics handle.
        let metrics_handle = match token_service::observability::metrics::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        // Build routes using the service's real route builder
        let app = routes::build_routes(state, metrics_handle);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestTokenServer {
    fn drop(&mut self) {
        // Abort the HTTP server task so the port is released as soon as the
        // test completes.
        self._handle.abort();
    }
}
