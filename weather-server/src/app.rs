use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, header},
    middleware,
    response::Response,
    routing::{any, get},
};
use tokio::net::TcpListener;
use weather_core::WeatherService;

use crate::handlers;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

/// Compose both routes over one shared service.
pub fn router(service: WeatherService) -> Router {
    let state = AppState { service: Arc::new(service) };

    let browser_routes = Router::new()
        .route("/weather", get(handlers::get_weather))
        .layer(middleware::map_response(allow_any_origin));

    Router::new()
        .route("/api/fetchWeather", any(handlers::fetch_weather))
        .merge(browser_routes)
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, service: WeatherService) -> std::io::Result<()> {
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
