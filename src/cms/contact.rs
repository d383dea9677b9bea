//! Contact form relay
//!
//! Forwards a contact request to the CMS `contact-requests` collection and
//! hands back whatever the CMS answered, status and body untouched.

use crate::cms::client::transport_error;
use crate::cms::endpoint::CmsEndpoint;
use crate::error::{OstrivError, OstrivResult};
use serde::Serialize;
use tracing::debug;

/// A visitor's contact form submission
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The CMS answer, relayed verbatim
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct ContactRelay {
    url: String,
    agent: ureq::Agent,
}

impl ContactRelay {
    pub fn new(endpoint: &CmsEndpoint, agent: ureq::Agent) -> Self {
        Self {
            url: endpoint.contact_requests_url(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit a structured contact request as JSON
    pub async fn submit(&self, request: &ContactRequest) -> OstrivResult<RelayResponse> {
        let body = serde_json::to_string(request)?;
        self.forward("application/json", body).await
    }

    /// Forward a raw body with its content type
    ///
    /// Non-2xx answers are not errors; only transport failures are.
    pub async fn forward(&self, content_type: &str, body: String) -> OstrivResult<RelayResponse> {
        let agent = self.agent.clone();
        let url = self.url.clone();
        let content_type = content_type.to_string();

        debug!("POST {} ({} bytes)", url, body.len());
        tokio::task::spawn_blocking(move || relay(&agent, &url, &content_type, &body))
            .await
            .map_err(|e| OstrivError::Internal(format!("contact relay task failed: {}", e)))?
    }
}

fn relay(agent: &ureq::Agent, url: &str, content_type: &str, body: &str) -> OstrivResult<RelayResponse> {
    let mut response = agent
        .post(url)
        .config()
        .http_status_as_error(false)
        .build()
        .header("Content-Type", content_type)
        .send(body.as_bytes())
        .map_err(|e| transport_error(url, e))?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| OstrivError::unreachable(url, e))?;

    Ok(RelayResponse {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::client::http_agent;
    use crate::cms::testing::closed_port_url;
    use crate::config::schema::CmsConfig;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn relay_for(base: &str) -> ContactRelay {
        let config = CmsConfig {
            url: Some(base.to_string()),
            ..Default::default()
        };
        let endpoint = CmsEndpoint::resolve_with(&config, "https://shop.test", |_| None).unwrap();
        ContactRelay::new(&endpoint, http_agent(Some(Duration::from_secs(5))))
    }

    #[test]
    fn request_omits_empty_optionals() {
        let request = ContactRequest {
            name: "Олена".to_string(),
            phone: "+380501112233".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["name"], "Олена");
        assert!(json.get("email").is_none());
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn relays_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact-requests"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "name": "Ivan", "phone": "123", "message": "Call me" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "doc": { "id": "42" } })))
            .expect(1)
            .mount(&server)
            .await;
        let relay = relay_for(&server.uri());

        let response = relay
            .submit(&ContactRequest {
                name: "Ivan".to_string(),
                phone: "123".to_string(),
                email: None,
                message: Some("Call me".to_string()),
            })
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.status, 201);
        assert!(response.body.contains("42"));
    }

    #[tokio::test]
    async fn relays_rejection_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact-requests"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{ "message": "phone required" }]
            })))
            .mount(&server)
            .await;
        let relay = relay_for(&server.uri());

        let response = relay.forward("application/json", "{}".to_string()).await.unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status, 400);
        assert_eq!(response.content_type, "application/json");
        assert!(response.body.contains("phone required"));
    }

    #[tokio::test]
    async fn transport_failure_is_error() {
        let relay = relay_for(&closed_port_url());

        let err = relay.forward("application/json", "{}".to_string()).await.unwrap_err();
        assert!(matches!(err, OstrivError::CmsUnreachable { .. }));
    }
}
