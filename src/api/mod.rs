use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::CatalogResolver;
use crate::shop::{ResultAggregator, SearchPageClient};

pub mod handlers;
pub mod models;

/// Per-process handler state. The aggregator is generic over its page client
/// so tests can mount the router over a scripted provider.
pub struct AppState<C> {
    pub catalog: CatalogResolver,
    pub shop: ResultAggregator<C>,
}

pub fn create_router<C>(state: Arc<AppState<C>>) -> Router
where
    C: SearchPageClient + 'static,
{
    // CORS configuration: any origin, applied uniformly to every route
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/flowers", get(handlers::flower_handler::<C>))
        .route("/naver-shopping", get(handlers::shop_redirect_handler))
        .route("/naver-shopping-api", get(handlers::shop_search_handler::<C>))
        .with_state(state)
        .layer(cors)
}
