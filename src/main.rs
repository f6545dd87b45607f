use std::sync::Arc;

use floret::api::{self, AppState};
use floret::catalog::CatalogResolver;
use floret::config::CONFIG;
use floret::db::{Database, FlowerRepo};
use floret::shop::{NaverShopClient, ResultAggregator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let db = Database::from_config().await?;
    let catalog = CatalogResolver::new(FlowerRepo::new(&db));
    let shop = ResultAggregator::new(NaverShopClient::new(
        CONFIG.naver_client_id.clone(),
        CONFIG.naver_client_secret.clone(),
    ));

    let app = api::create_router(Arc::new(AppState { catalog, shop }));

    let addr = format!("0.0.0.0:{}", CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
