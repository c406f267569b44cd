//! HTTP surface of the review platform.
//!
//! Every provider-scoped route starts with a `{provider}` segment. The cookie
//! session only ever holds opaque handles; provider tokens stay in the
//! domain's session carrier.

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use domain::Platform;
use log::*;
use service::config::Config;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

mod controller;
mod error;
mod extractors;
mod params;
mod response;
pub mod router;

pub use error::{Error, Result};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub platform: Platform,
}

impl AppState {
    pub fn new(config: Config, platform: Platform) -> Self {
        Self { config, platform }
    }
}

/// Routes plus the session and CORS layers.
pub fn app(app_state: AppState) -> Router {
    let session_layer = session_layer(&app_state.config);
    let cors_layer = cors_layer(&app_state.config);

    router::define_routes(app_state)
        .layer(session_layer)
        .layer(cors_layer)
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let host = format!("{}:{}", interface, app_state.config.port);

    let listener = TcpListener::bind(&host).await?;
    info!("Server starting... listening for connections on http://{host}");

    axum::serve(listener, app(app_state)).await
}

fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    let expiry_seconds = i64::try_from(config.session_expiry_seconds).unwrap_or(i64::MAX);

    // Production frontends call cross-site; SameSite=None requires Secure.
    let same_site = if config.is_production() {
        SameSite::None
    } else {
        SameSite::Lax
    };

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.is_production())
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(expiry_seconds)))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .inspect_err(|_| warn!("Ignoring invalid CORS origin {:?}", origin))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}
