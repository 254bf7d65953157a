//! Shop REST API client.
//!
//! Pure request/response mapping over a fixed base URL with `reqwest`. No
//! retries and no caching; every non-2xx status is translated into a
//! display-ready [`ApiError`] so nothing above this layer has to look at
//! HTTP details.
//!
//! # Endpoints
//!
//! | Method | Path              | Notes                                |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/api/top-sales`  | array of catalog items               |
//! | GET    | `/api/items`      | one page; `categoryId`, `offset`, `q`|
//! | GET    | `/api/categories` | filter reference list                |
//! | GET    | `/api/items/{id}` | full product card, 404 possible      |
//! | POST   | `/api/order`      | 204 or an optional JSON body         |

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use bosanoga_core::{CatalogItem, Category, CategoryId, OrderRequest, OrderResponse, ProductDetail, ProductId};

use crate::config::StorefrontConfig;

/// Errors that can occur when talking to the shop API.
///
/// Every variant's `Display` output is suitable for showing to the user
/// as an inline error message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The server answered with a non-success status.
    #[error("{context} failed: HTTP {status}")]
    Status {
        /// What was being done, e.g. "loading catalog items".
        context: &'static str,
        status: u16,
    },

    /// A single-item fetch hit a 404.
    #[error("item {0} not found")]
    NotFound(ProductId),

    /// A successful response body did not match the expected shape.
    #[error("{context} failed: malformed server response")]
    Parse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Query parameters for the paginated item listing.
///
/// Category and search are independent filters and are always sent together
/// on every request, including "load more" pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsQuery {
    pub category: Option<CategoryId>,
    pub offset: usize,
    pub search: Option<String>,
}

/// Client for the shop REST API.
///
/// Cheap to clone; holds a connection-pooling `reqwest::Client` and the
/// base URL. Use [`ShopClient::new`] in production or
/// [`ShopClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct ShopClient {
    client: Client,
    base_url: Url,
}

impl ShopClient {
    /// Create a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BaseUrl`] if the configured URL is invalid, or
    /// [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::with_base_url(&config.api_url, config.http_timeout)
    }

    /// Create a client with an explicit base URL (for tests).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ShopClient::new`].
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("bosanoga-storefront/0.1")
            .build()?;

        // Normalise: a trailing slash makes Url::join treat the base as a
        // directory instead of replacing its last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a response that has already been checked for special statuses.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            tracing::error!(context, status = %status, "shop API returned non-success status");
            return Err(ApiError::Status {
                context,
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                context,
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "failed to parse shop API response"
            );
            ApiError::Parse { context, source: e }
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &'static str,
    ) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::decode(response, context).await
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Fetch the top-sales strip for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn top_sales(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let url = self.endpoint("api/top-sales")?;
        self.get_json(url, "loading top sales").await
    }

    /// Fetch the category reference list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint("api/categories")?;
        self.get_json(url, "loading categories").await
    }

    /// Fetch one page of the item listing.
    ///
    /// `offset` is always sent; `categoryId` and `q` only when set. The
    /// server signals the end of the listing by returning a short page -
    /// there is no total-count field.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self), fields(offset = query.offset))]
    pub async fn items(&self, query: &ItemsQuery) -> Result<Vec<CatalogItem>, ApiError> {
        let mut url = self.endpoint("api/items")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(category) = query.category {
                pairs.append_pair("categoryId", &category.to_string());
            }
            pairs.append_pair("offset", &query.offset.to_string());
            if let Some(q) = query.search.as_deref().filter(|q| !q.is_empty()) {
                pairs.append_pair("q", q);
            }
        }
        self.get_json(url, "loading catalog items").await
    }

    /// Fetch the full product card for one item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] on a 404, which views surface as a
    /// specific "item not found" message rather than a generic failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn item(&self, id: ProductId) -> Result<ProductDetail, ApiError> {
        let url = self.endpoint(&format!("api/items/{id}"))?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        Self::decode(response, "loading product details").await
    }

    // =========================================================================
    // Order Submission
    // =========================================================================

    /// Submit a checkout order.
    ///
    /// Success is determined by the status code alone, never by the presence
    /// of a parseable body: a `204 No Content`, an empty body, or a body that
    /// is not JSON all yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx status or
    /// [`ApiError::Http`] on transport failure.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn submit_order(
        &self,
        order: &OrderRequest,
    ) -> Result<Option<OrderResponse>, ApiError> {
        let url = self.endpoint("api/order")?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(order).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "order submission rejected");
            return Err(ApiError::Status {
                context: "submitting order",
                status: status.as_u16(),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        // A body we cannot parse on a 2xx is still a success.
        Ok(serde_json::from_str(&text).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_display_ready() {
        let err = ApiError::Status {
            context: "loading catalog items",
            status: 502,
        };
        assert_eq!(err.to_string(), "loading catalog items failed: HTTP 502");

        let err = ApiError::NotFound(ProductId::new(17));
        assert_eq!(err.to_string(), "item 17 not found");
    }

    #[test]
    fn base_url_normalisation_keeps_join_rooted() {
        let client =
            ShopClient::with_base_url("http://shop.example", Duration::from_secs(5)).expect("url");
        let url = client.endpoint("api/items").expect("join");
        assert_eq!(url.as_str(), "http://shop.example/api/items");
    }
}
