//! HTTP server wiring for MiniPaste (routes, handlers, and shared state).

/// HTTP error mapping for handlers.
pub mod error;
/// HTTP handlers for uploads, the paste endpoint, and the index page.
pub mod handlers;

pub use minipaste_core::{config, ClearCause, Config, PasteError, PasteStore};

use axum::{
    http::{header, HeaderValue},
    routing::{get, put},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Upper bound on handling a single request, body upload included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: PasteStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared state with a fresh, empty store.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration; its retention drives the store.
    ///
    /// # Returns
    /// A new [`AppState`].
    pub fn new(config: Config) -> Self {
        let store = PasteStore::new(config.retention);
        Self::with_store(config, store)
    }

    /// Construct shared state around an existing store.
    ///
    /// # Returns
    /// A new [`AppState`] sharing `store`.
    pub fn with_store(config: Config, store: PasteStore) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// Upload handlers stream the raw body, so the upload ceiling is enforced by
/// the ingest pipelines rather than a router-level body limit.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    // Served artifacts are arbitrary user content; lock the browser down.
    let paste_routes = Router::new()
        .route(
            "/paste",
            get(handlers::paste::get_paste).delete(handlers::paste::delete_paste),
        )
        .layer(
            tower::ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static("default-src 'none'"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_XSS_PROTECTION,
                    HeaderValue::from_static("1; mode=block"),
                )),
        );

    Router::new()
        .route(
            "/",
            get(handlers::index::index).post(handlers::upload::form_upload),
        )
        .route("/health", get(handlers::index::health))
        .route("/:name", put(handlers::upload::put_upload))
        .merge(paste_routes)
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CompressionLayer::new()),
        )
}

/// Run the Axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Returns
/// `Ok(())` when the server exits cleanly.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await
}
