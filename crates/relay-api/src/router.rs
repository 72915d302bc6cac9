//! Router configuration and server setup.

use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;

use axum::{
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{error_envelope, RelayError};
use crate::handlers;
use crate::state::AppState;

/// Creates the relay router with all routes and middleware configured.
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Same as [`create_router`], with the chat transport's webhook routes merged
/// in so they share the listener and the middleware stack.
pub fn create_router_with_webhook(state: AppState, webhook: Router) -> Router {
    build_router(state, Some(webhook))
}

fn build_router(state: AppState, webhook: Option<Router>) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/", get(handlers::health))
        .route("/test", post(handlers::test_delivery))
        .route("/delivery", post(handlers::delivery))
        .route("/order", post(handlers::order))
        .with_state(state);

    if let Some(webhook) = webhook {
        router = router.merge(webhook);
    }

    let router = with_error_envelope(router);

    // Layers wrap what is already there: the last one added runs first.
    let router = if config.debug {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors_layer(&config.cors_origins)),
    )
}

/// Wraps every route in the panic guard and the error envelope.
pub(crate) fn with_error_envelope(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(error_envelope))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    RelayError::Unexpected(format!("handler panicked: {}", detail)).into_response()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(cors::Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect::<Vec<_>>(),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

/// Binds the configured address.
pub async fn bind(config: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind(config.bind_address()).await
}

/// Serves `router` until `shutdown` resolves.
///
/// Once `shutdown` fires no new connections are accepted.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!(url = %server_url(address), "Server started");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Returns the base URL a listener on `address` is reachable at.
pub fn server_url(address: SocketAddr) -> String {
    format!("http://{}", address)
}
