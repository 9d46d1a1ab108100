//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the edge handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch requests to edge functions
//! - Swap in reloaded configuration without dropping connections

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{EdgeConfig, FunctionKind, SiteConfig};
use crate::error::EdgeError;
use crate::functions::{self, markers, seo_blog::seo_blog};
use crate::http::origin::OriginClient;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::signalled;
use crate::observability::metrics;
use crate::posts::PostClient;
use crate::routing::FunctionRouter;

/// Everything a request needs, rebuilt from config on every reload.
#[derive(Debug)]
pub struct EdgeRuntime {
    pub router: FunctionRouter,
    pub posts: PostClient,
    pub origin: OriginClient,
    pub site: SiteConfig,
    pub cache_control: Option<HeaderValue>,
    pub max_body_size: usize,
}

impl EdgeRuntime {
    pub fn from_config(config: &EdgeConfig) -> Result<Self, EdgeError> {
        let cache_control = if config.site.cache_control.is_empty() {
            None
        } else {
            Some(
                HeaderValue::from_str(&config.site.cache_control)
                    .map_err(|_| EdgeError::CacheControl(config.site.cache_control.clone()))?,
            )
        };

        Ok(Self {
            router: FunctionRouter::from_config(&config.functions),
            posts: PostClient::new(&config.api)?,
            origin: OriginClient::new(&config.origin, &config.timeouts)?,
            site: config.site.clone(),
            cache_control,
            max_body_size: config.security.max_body_size,
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ArcSwap<EdgeRuntime>>,
}

/// HTTP server for the edge.
pub struct HttpServer {
    router: Router,
    runtime: Arc<ArcSwap<EdgeRuntime>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, EdgeError> {
        let runtime = Arc::new(ArcSwap::from_pointee(EdgeRuntime::from_config(&config)?));

        let state = AppState {
            runtime: runtime.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, runtime })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(edge_handler))
            .route("/", any(edge_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            uri = %req.uri(),
                            request_id = %request_id(req.headers()),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs received on `config_updates` replace the running runtime;
    /// the server stops once `shutdown` fires and in-flight requests drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            functions = self.runtime.load().router.len(),
            "HTTP server starting"
        );

        let runtime = self.runtime.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match EdgeRuntime::from_config(&config) {
                    Ok(next) => {
                        let functions = next.router.len();
                        runtime.store(Arc::new(next));
                        tracing::info!(functions, "Configuration reloaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rejected reloaded configuration");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                signalled(shutdown).await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main edge handler.
/// Looks up the bound function and runs it, or passes through.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let runtime = state.runtime.load_full();
    let request_id = request_id(request.headers());

    let function = runtime.router.match_path(request.uri().path()).cloned();

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        function = function.as_ref().map(|f| f.name.as_str()).unwrap_or("none"),
        "Handling request"
    );

    let (label, response) = match function {
        None => (
            "passthrough".to_string(),
            functions::passthrough(&runtime, request, &request_id).await,
        ),
        Some(function) => {
            let response = match function.kind {
                FunctionKind::SeoBlog => seo_blog(&runtime, &function, request, &request_id).await,
                FunctionKind::Ping => markers::ping(&runtime, request, &request_id).await,
                FunctionKind::Debug => markers::debug(&runtime, request, &request_id).await,
            };
            (function.name, response)
        }
    };

    metrics::record_request(&label, response.status().as_u16(), start);
    response
}
