use std::{path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::product::{
    repo::seaorm::SeaOrmProductRepository,
    repository::TableProductRepository,
    ProductRepository, ProductService,
};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`) when it exists, otherwise build the
/// config from environment variables. A present but invalid file is an error.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = if Path::new(&path).exists() {
        AppConfig::load_and_validate()
    } else {
        AppConfig::from_env()
    };
    cfg.map_err(|e| StartupError::InvalidConfig(format!("{path}: {e:#}")))
}

/// Wire the configured product store into the shared handler state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let repo: Arc<dyn ProductRepository> = match cfg.storage.backend {
        StorageBackend::Memory => Arc::new(TableProductRepository::in_memory()),
        StorageBackend::Json => {
            common::env::ensure_data_dir(&cfg.storage.json_path).await?;
            Arc::new(TableProductRepository::open(&cfg.storage.json_path).await?)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            Arc::new(SeaOrmProductRepository { db })
        }
    };
    info!(
        backend = ?cfg.storage.backend,
        update_policy = ?cfg.products.update_policy,
        "product store ready"
    );
    Ok(AppState::new(ProductService::with_update_policy(repo, cfg.products.update_policy)))
}

/// Bind the `[server]` address. `host` may be an IP or a hostname.
async fn bind_listener(cfg: &AppConfig) -> anyhow::Result<TcpListener> {
    let host = cfg.server.host.as_str();
    TcpListener::bind((host, cfg.server.port))
        .await
        .map_err(|e| anyhow::anyhow!("bind {host}:{}: {e}", cfg.server.port))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let state = build_state(&cfg).await?;

    let app: Router = routes::build_router(state, build_cors());

    let listener = bind_listener(&cfg).await?;
    info!(addr = %listener.local_addr()?, "starting product catalog server");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_backend_state_persists_between_builds() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("catalog_startup_{}", uuid::Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Json;
        cfg.storage.json_path = dir.join("products.json").to_string_lossy().into_owned();

        let state = build_state(&cfg).await?;
        let created = state
            .products
            .create(service::product::ProductDto {
                id: None,
                name: "kept".into(),
                quantity: 1,
                price: 1.0,
                observation: None,
            })
            .await?;

        let again = build_state(&cfg).await?;
        assert_eq!(again.products.get_by_id(created.id.unwrap_or_default()).await?.name, "kept");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn binds_hostname_from_server_section() -> anyhow::Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = "localhost".into();
        cfg.server.port = 0;
        let listener = bind_listener(&cfg).await?;
        assert!(listener.local_addr()?.ip().is_loopback());
        Ok(())
    }
}
