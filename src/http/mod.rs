use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

use crate::auth::AccessGate;
use crate::config::Config;
use crate::store::MediaStore;

mod error;
mod login;
mod media;
mod ping;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Clone)]
pub struct ApiContext {
    pub cfg: Arc<Config>,
    pub gate: AccessGate,
    pub store: MediaStore,
}

impl ApiContext {
    pub fn new(config: Config) -> Self {
        let gate = AccessGate::new(&config.auth);
        let store = MediaStore::new(config.storage.upload_dir.clone());
        Self {
            cfg: Arc::new(config),
            gate,
            store,
        }
    }
}

pub async fn serve(ctx: ApiContext) -> anyhow::Result<()> {
    let addr = ctx.cfg.http.listen_addr;
    let app = api_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("listening on {}", &addr);
    axum::serve(listener, app)
        .await
        .context("error running HTTP server")
}

pub fn api_router(ctx: ApiContext) -> Router {
    let cors = cors_layer(&ctx.cfg.http.allowed_origins);
    let max_upload_bytes = ctx.cfg.http.max_upload_bytes;
    ping::router()
        .merge(login::router())
        .merge(media::router(max_upload_bytes))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(ctx))
                .layer(TraceLayer::new_for_http()),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|x| x.parse::<HeaderValue>().ok()),
        )
    };
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(origin)
}
