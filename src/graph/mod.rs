pub mod auth;
pub mod authentication_methods;
pub mod users;

use crate::error::{ReadinessError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Graph API client
///
/// Failed calls are reported, never retried; callers decide what a failure
/// means for them.
#[derive(Clone)]
pub struct GraphClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl GraphClient {
    /// Client against a different Graph root (national clouds, test servers)
    pub fn with_base_url(access_token: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request to Graph API
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        self.get_raw_url(&url).await
    }

    /// Make a GET request to a raw URL (for following nextLink)
    async fn get_raw_url<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            let enhanced_error = crate::error::enhance_graph_error(&error_text);
            return Err(ReadinessError::GraphApiError(format!(
                "HTTP {}: {}",
                status, enhanced_error
            )));
        }

        Ok(resp.json::<T>().await?)
    }
}

/// Escape a user-supplied value for use as one URL path segment
///
/// Guest UPNs contain `#EXT#`, which would otherwise start a URL fragment.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

// ============================================================================
// Pagination Helpers
// ============================================================================

/// Generic paginated response from Graph API
///
/// Use this for standard OData paginated responses with `value` array and `@odata.nextLink`
#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

impl GraphClient {
    /// Fetch all pages of a paginated Graph API endpoint
    ///
    /// Automatically follows `@odata.nextLink` until all pages are retrieved.
    pub async fn get_all_pages<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>> {
        let mut all_items: Vec<T> = Vec::new();
        let mut current_url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        loop {
            let response: PaginatedResponse<T> = self.get_raw_url(&current_url).await?;
            all_items.extend(response.value);

            match response.next_link {
                Some(next) => current_url = next,
                None => break,
            }
        }

        Ok(all_items)
    }
}
