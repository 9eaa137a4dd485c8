use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::posts::{service::PostService, store::PostStore};
use service::runtime;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils.
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> Result<SocketAddr, StartupError> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Storage settings from configs when present, defaults otherwise.
fn load_storage() -> configs::StorageConfig {
    let mut storage = match configs::load_default() {
        Ok(cfg) => cfg.storage,
        Err(_) => configs::StorageConfig::default(),
    };
    storage.normalize_from_env();
    storage
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging();

    let storage = load_storage();
    runtime::ensure_env(&storage.data_dir).await?;

    let store = PostStore::open(storage.posts_path())
        .await
        .map_err(|e| StartupError::Runtime(format!("cannot open post store: {e}")))?;
    let state = ServerState { posts: Arc::new(PostService::new(store)) };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr()?;
    info!(%addr, collection = %storage.posts_path().display(), "starting blog api server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(())
}
