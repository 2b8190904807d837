pub mod catalog;
pub mod health;
pub mod session;
pub mod error;
pub mod response;

use std::sync::Arc;
use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::CatalogConfig, database::Database, services::CatalogService};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub catalog_service: Arc<CatalogService>,
    pub config: Arc<CatalogConfig>,
}

impl AppState {
    pub fn new(database: Database, config: CatalogConfig) -> Self {
        let config = Arc::new(config);
        let catalog_service = CatalogService::new(
            Arc::new(database.repository().clone()),
            config.clone(),
        );
        Self {
            database,
            catalog_service: Arc::new(catalog_service),
            config,
        }
    }
}

/// 构建应用路由
pub fn router(state: AppState) -> Router {
    // 需要会话的路由
    let catalog_routes = Router::new()
        .route("/api/catalog", get(catalog::get_catalog_page))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    Router::new()
        .route("/", get(|| async { "Catalog Backend API v1.0" }))
        .route("/api/health", get(health::health_check))
        .merge(catalog_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
