use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Items requested per provider page.
pub const PAGE_SIZE: u32 = 100;
/// Hard upper bound on collected items; also bounds the number of page
/// requests to TOTAL_CAP / PAGE_SIZE.
pub const TOTAL_CAP: u32 = 1000;

const SHOP_API_URL: &str = "https://openapi.naver.com/v1/search/shop.json";

/// Any provider fault during pagination. Transport errors, non-2xx statuses
/// and malformed payloads all fail the aggregation as a unit; there is no
/// partial-success mode and nothing is retried.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("shop request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("shop provider returned status {0}")]
    Status(reqwest::StatusCode),
}

/// One paginated request against the external search provider. This is the
/// seam the aggregator is generic over, so tests can script pages without any
/// network I/O.
pub trait SearchPageClient: Send + Sync {
    /// Fetch one page of at most `display` items starting at the 1-based
    /// offset `start`, in the provider's relevance order.
    fn fetch_page(
        &self,
        query: &str,
        start: u32,
        display: u32,
    ) -> impl Future<Output = Result<Vec<Value>, ShopError>> + Send;
}

#[derive(Deserialize)]
struct ShopPage {
    // A missing `items` field reads as an exhausted page.
    #[serde(default)]
    items: Vec<Value>,
}

/// Naver Shopping open API client. Items are passed through verbatim; this
/// service never interprets their fields.
#[derive(Clone)]
pub struct NaverShopClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl NaverShopClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
        }
    }
}

impl SearchPageClient for NaverShopClient {
    async fn fetch_page(
        &self,
        query: &str,
        start: u32,
        display: u32,
    ) -> Result<Vec<Value>, ShopError> {
        let display = display.to_string();
        let start = start.to_string();
        let response = self
            .http
            .get(SHOP_API_URL)
            .query(&[
                ("query", query),
                ("display", display.as_str()),
                ("start", start.as_str()),
                ("sort", "sim"),
            ])
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ShopError::Status(response.status()));
        }

        let page: ShopPage = response.json().await?;
        Ok(page.items)
    }
}

/// Why a pagination run stopped. Failure is the `Err` arm of the fetch, not a
/// stop reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Provider signalled no further items via an empty page.
    Exhausted,
    /// The total-result cap was reached; the provider may have had more.
    Capped,
}

/// Drives sequential page fetches against a [`SearchPageClient`] and
/// concatenates the pages into one relevance-ordered sequence.
///
/// State is per-call and lives on the caller's stack; nothing is shared or
/// persisted across requests.
pub struct ResultAggregator<C> {
    client: C,
}

impl<C: SearchPageClient> ResultAggregator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Collect up to [`TOTAL_CAP`] items for `query`. All-or-nothing: a fault
    /// on any page discards everything collected so far.
    pub async fn aggregate(&self, query: &str) -> Result<Vec<Value>, ShopError> {
        let (collected, reason) = self.collect_pages(query).await?;
        tracing::info!(
            count = collected.len(),
            stop = ?reason,
            "collected shopping search results"
        );
        Ok(collected)
    }

    async fn collect_pages(&self, query: &str) -> Result<(Vec<Value>, StopReason), ShopError> {
        let mut page_start = 1u32;
        let mut collected: Vec<Value> = Vec::new();

        while page_start <= TOTAL_CAP {
            let page = self.client.fetch_page(query, page_start, PAGE_SIZE).await?;

            // An empty page is the only exhaustion signal. A short but
            // non-empty page does not stop the loop; the next offset is
            // still requested.
            if page.is_empty() {
                return Ok((collected, StopReason::Exhausted));
            }

            collected.extend(page);
            page_start += PAGE_SIZE;
        }

        Ok((collected, StopReason::Capped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum PageScript {
        Items(usize),
        Fail,
    }

    /// Replays a fixed page script; pages past the end of the script are
    /// empty. Records every requested offset.
    struct ScriptedClient {
        script: Vec<PageScript>,
        calls: AtomicUsize,
        starts: Mutex<Vec<u32>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<PageScript>) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                starts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn starts(&self) -> Vec<u32> {
            self.starts.lock().unwrap().clone()
        }
    }

    impl SearchPageClient for Arc<ScriptedClient> {
        async fn fetch_page(
            &self,
            _query: &str,
            start: u32,
            _display: u32,
        ) -> Result<Vec<Value>, ShopError> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst);
            self.starts.lock().unwrap().push(start);
            match self.script.get(idx) {
                Some(PageScript::Items(n)) => Ok((0..*n)
                    .map(|i| json!({ "title": format!("item {start}-{i}") }))
                    .collect()),
                Some(PageScript::Fail) => {
                    Err(ShopError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
                }
                None => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn stops_on_empty_page_without_a_further_request() {
        let client = ScriptedClient::new(vec![
            PageScript::Items(100),
            PageScript::Items(100),
            PageScript::Items(0),
        ]);
        let aggregator = ResultAggregator::new(Arc::clone(&client));

        let items = aggregator.aggregate("rose").await.unwrap();
        assert_eq!(items.len(), 200);
        // The empty third page terminates the loop; no fourth request.
        assert_eq!(client.calls(), 3);
        assert_eq!(client.starts(), vec![1, 101, 201]);
    }

    #[tokio::test]
    async fn short_page_does_not_terminate() {
        let client = ScriptedClient::new(vec![PageScript::Items(37)]);
        let aggregator = ResultAggregator::new(Arc::clone(&client));

        let items = aggregator.aggregate("rose").await.unwrap();
        assert_eq!(items.len(), 37);
        // 37 items is short but non-empty, so offset 101 is still requested.
        assert_eq!(client.calls(), 2);
        assert_eq!(client.starts(), vec![1, 101]);
    }

    #[tokio::test]
    async fn never_exceeds_the_cap() {
        // Provider claims endless pages; the aggregator must stop at 10
        // requests and 1000 items.
        let script = (0..50).map(|_| PageScript::Items(100)).collect();
        let client = ScriptedClient::new(script);
        let aggregator = ResultAggregator::new(Arc::clone(&client));

        let items = aggregator.aggregate("rose").await.unwrap();
        assert_eq!(items.len(), 1000);
        assert_eq!(client.calls(), 10);
        assert_eq!(*client.starts().last().unwrap(), 901);
    }

    #[tokio::test]
    async fn failure_discards_prior_pages() {
        let client = ScriptedClient::new(vec![
            PageScript::Items(100),
            PageScript::Fail,
            PageScript::Items(100),
        ]);
        let aggregator = ResultAggregator::new(Arc::clone(&client));

        let result = aggregator.aggregate("rose").await;
        assert!(matches!(result, Err(ShopError::Status(_))));
        // The failing page is not retried and the third is never requested.
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn preserves_cross_page_order() {
        let client = ScriptedClient::new(vec![PageScript::Items(100), PageScript::Items(3)]);
        let aggregator = ResultAggregator::new(Arc::clone(&client));

        let items = aggregator.aggregate("rose").await.unwrap();
        assert_eq!(items.len(), 103);
        assert_eq!(items[0]["title"], "item 1-0");
        assert_eq!(items[99]["title"], "item 1-99");
        assert_eq!(items[100]["title"], "item 101-0");
        assert_eq!(items[102]["title"], "item 101-2");
    }

    #[tokio::test]
    async fn reports_stop_reasons() {
        let exhausted = ScriptedClient::new(vec![PageScript::Items(5)]);
        let aggregator = ResultAggregator::new(Arc::clone(&exhausted));
        let (items, reason) = aggregator.collect_pages("rose").await.unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(reason, StopReason::Exhausted);

        let capped = ScriptedClient::new((0..10).map(|_| PageScript::Items(100)).collect());
        let aggregator = ResultAggregator::new(Arc::clone(&capped));
        let (items, reason) = aggregator.collect_pages("rose").await.unwrap();
        assert_eq!(items.len(), 1000);
        assert_eq!(reason, StopReason::Capped);
    }
}
