//! GraphQL client for the CMS
//!
//! Requests are plain JSON POSTs issued with `ureq` on tokio's blocking
//! pool, so the async side never waits on socket IO directly.

use crate::cms::endpoint::CmsEndpoint;
use crate::cms::payload::{CategoriesData, Docs, PayloadCategory, PayloadProduct, ProductsData};
use crate::cms::queries::{GET_CATEGORIES, GET_PRODUCTS};
use crate::error::{OstrivError, OstrivResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Read access to the CMS collections the storefront consumes
#[async_trait]
pub trait CmsClient: Send + Sync {
    /// Category documents, at most `limit`
    async fn categories(&self, limit: u32) -> OstrivResult<Vec<PayloadCategory>>;

    /// Product documents matching `filter` (a CMS `where` clause), at most `limit`
    async fn products(&self, filter: Option<Value>, limit: u32) -> OstrivResult<Vec<PayloadProduct>>;
}

/// Build the HTTP agent shared by CMS requests
pub fn http_agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(timeout)
        .build()
        .into()
}

/// Map a ureq failure to the CMS error taxonomy
pub(crate) fn transport_error(url: &str, err: ureq::Error) -> OstrivError {
    match err {
        ureq::Error::StatusCode(status) => OstrivError::CmsStatus {
            url: url.to_string(),
            status,
        },
        other => OstrivError::unreachable(url, other),
    }
}

/// Single error entry of a GraphQL response
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl<T> GraphqlResponse<T> {
    /// Data of a fully successful response; any reported error fails the request
    pub fn into_result(self) -> OstrivResult<T> {
        let errors = self.errors.unwrap_or_default();
        if !errors.is_empty() {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(OstrivError::CmsGraphql(messages.join("; ")));
        }

        self.data
            .ok_or_else(|| OstrivError::CmsDecode("response has no data".to_string()))
    }
}

/// CMS client speaking GraphQL over HTTP
#[derive(Clone)]
pub struct GraphqlClient {
    url: String,
    agent: ureq::Agent,
}

impl GraphqlClient {
    pub fn new(endpoint: &CmsEndpoint, agent: ureq::Agent) -> Self {
        Self {
            url: endpoint.graphql_url(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute `query` with `variables` and decode its `data`
    pub async fn request<T>(&self, query: &'static str, variables: Value) -> OstrivResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = self.url.clone();
        let body = json!({ "query": query, "variables": variables });

        debug!("POST {}", url);
        let response: GraphqlResponse<T> =
            tokio::task::spawn_blocking(move || post_json(&agent, &url, &body))
                .await
                .map_err(|e| OstrivError::Internal(format!("CMS request task failed: {}", e)))??;

        response.into_result()
    }
}

fn post_json<T: DeserializeOwned>(agent: &ureq::Agent, url: &str, body: &Value) -> OstrivResult<T> {
    let mut response = agent
        .post(url)
        .header("Accept", "application/json")
        .send_json(body)
        .map_err(|e| transport_error(url, e))?;

    response
        .body_mut()
        .read_json::<T>()
        .map_err(|e| OstrivError::CmsDecode(e.to_string()))
}

#[async_trait]
impl CmsClient for GraphqlClient {
    async fn categories(&self, limit: u32) -> OstrivResult<Vec<PayloadCategory>> {
        let data: CategoriesData = self
            .request(GET_CATEGORIES, json!({ "limit": limit }))
            .await?;
        Ok(data.categories.map(Docs::into_docs).unwrap_or_default())
    }

    async fn products(&self, filter: Option<Value>, limit: u32) -> OstrivResult<Vec<PayloadProduct>> {
        let mut variables = json!({ "limit": limit });
        if let Some(filter) = filter {
            variables["where"] = filter;
        }

        let data: ProductsData = self.request(GET_PRODUCTS, variables).await?;
        Ok(data.products.map(Docs::into_docs).unwrap_or_default())
    }
}
