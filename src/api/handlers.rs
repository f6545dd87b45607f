use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use std::sync::Arc;

use crate::catalog::CatalogError;
use crate::shop::SearchPageClient;

use super::AppState;
use super::models::{ErrorBody, FlowerQuery, FlowerResponse, ShopSearchResponse};

const SHOP_SEARCH_URL: &str = "https://search.shopping.naver.com/search/all";

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// A present-but-blank parameter counts as missing.
fn required_param(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn flower_handler<C>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<FlowerQuery>,
) -> Response
where
    C: SearchPageClient + 'static,
{
    let Some(name) = required_param(&params.flowername) else {
        return json_error(StatusCode::BAD_REQUEST, "Flowername is required");
    };

    match state.catalog.resolve(name).await {
        Ok(flower) => Json(FlowerResponse::from(flower)).into_response(),
        Err(CatalogError::NotFound) => {
            tracing::debug!(name, "flower not found in catalog");
            json_error(StatusCode::NOT_FOUND, "Flower not found")
        }
        Err(CatalogError::Store(e)) => {
            tracing::error!("error retrieving flower information: {e:#}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred")
        }
    }
}

/// Redirect-only convenience endpoint for the storefront button.
pub async fn shop_redirect_handler(Query(params): Query<FlowerQuery>) -> Response {
    let Some(keyword) = required_param(&params.flowername) else {
        return (StatusCode::BAD_REQUEST, "Missing flowername").into_response();
    };

    let url = match Url::parse_with_params(SHOP_SEARCH_URL, [("query", keyword)]) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("failed to build shop redirect url: {e}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred");
        }
    };

    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}

pub async fn shop_search_handler<C>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<FlowerQuery>,
) -> Response
where
    C: SearchPageClient + 'static,
{
    let Some(term) = required_param(&params.flowername) else {
        return json_error(StatusCode::BAD_REQUEST, "Flowername is required");
    };

    match state.shop.aggregate(term).await {
        Ok(items) => Json(ShopSearchResponse { items }).into_response(),
        Err(e) => {
            tracing::error!("naver shopping api error: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Naver Shopping API error")
        }
    }
}
