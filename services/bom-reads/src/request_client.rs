//! SAP API Request Client
//!
//! HTTP fetch adapter for the Bill of Material service. Applies the SAP
//! authentication headers and drains the response body.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use sap_bom_utils::odata::QueryParams;
use sap_bom_utils::{BomError, BomResult, SapApiConfig};
use tracing::debug;

/// Performs one HTTP request and returns the full response body.
///
/// Implementations are shared across concurrently running fetches and must be
/// safe for concurrent use.
#[async_trait]
pub trait FetchAdapter: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: &str,
        params: &QueryParams,
        body: Option<String>,
    ) -> BomResult<Vec<u8>>;
}

/// Fetch adapter backed by a shared reqwest client
#[derive(Clone)]
pub struct SapRequestClient {
    client: Client,
    username: Option<String>,
    password: Option<String>,
}

impl SapRequestClient {
    pub fn new(config: &SapApiConfig) -> BomResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &config.api_key {
            headers.insert(HeaderName::from_static("apikey"), header_value("api_key", api_key)?);
        }
        if let Some(client_number) = &config.client_number {
            headers.insert(
                HeaderName::from_static("sap-client"),
                header_value("client_number", client_number)?,
            );
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BomError::configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }
}

fn header_value(field: &str, value: &str) -> BomResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| BomError::configuration(format!("{} is not a valid header value: {}", field, e)))
}

#[async_trait]
impl FetchAdapter for SapRequestClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        params: &QueryParams,
        body: Option<String>,
    ) -> BomResult<Vec<u8>> {
        debug!(%method, url, ?params, "Sending SAP API request");

        let mut request = self.client.request(method, url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(BomError::transport(format!(
                "{} returned {}: {}",
                url,
                status,
                String::from_utf8_lossy(&bytes)
            )));
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{basic_auth, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> SapApiConfig {
        SapApiConfig {
            base_url: server.uri(),
            api_key: Some("sandbox-key".to_string()),
            client_number: Some("100".to_string()),
            ..SapApiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_request_sends_filter_and_sap_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/API_BILL_OF_MATERIAL_SRV;v=0002/MaterialBOM"))
            .and(query_param("$filter", "Material eq 'M1' and Plant eq 'P1'"))
            .and(header("APIKey", "sandbox-key"))
            .and(header("sap-client", "100"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"d":{"results":[]}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = SapRequestClient::new(&config_for(&server)).unwrap();
        let mut params = QueryParams::new();
        params.insert("$filter".to_string(), "Material eq 'M1' and Plant eq 'P1'".to_string());

        let url = format!("{}/API_BILL_OF_MATERIAL_SRV;v=0002/MaterialBOM", server.uri());
        let body = client.request(Method::GET, &url, &params, None).await.unwrap();
        assert_eq!(body, br#"{"d":{"results":[]}}"#.to_vec());
    }

    #[tokio::test]
    async fn test_basic_auth_is_applied_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(basic_auth("user", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let config = SapApiConfig {
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
            ..config_for(&server)
        };
        let client = SapRequestClient::new(&config).unwrap();
        let result = client
            .request(Method::GET, &server.uri(), &QueryParams::new(), None)
            .await;
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_error_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let client = SapRequestClient::new(&config_for(&server)).unwrap();
        let err = client
            .request(Method::GET, &server.uri(), &QueryParams::new(), None)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_slow_response_waits_without_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"d":{"results":[]}}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        assert_eq!(config.timeout_seconds, None);
        let client = SapRequestClient::new(&config).unwrap();
        let body = client
            .request(Method::GET, &server.uri(), &QueryParams::new(), None)
            .await
            .unwrap();
        assert_eq!(body, br#"{"d":{"results":[]}}"#.to_vec());
    }

    #[tokio::test]
    async fn test_configured_timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = SapApiConfig {
            timeout_seconds: Some(1),
            ..config_for(&server)
        };
        let client = SapRequestClient::new(&config).unwrap();
        let err = client
            .request(Method::GET, &server.uri(), &QueryParams::new(), None)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transport_error() {
        let client = SapRequestClient::new(&SapApiConfig::default()).unwrap();
        let err = client
            .request(Method::GET, "http://127.0.0.1:1/items", &QueryParams::new(), None)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        let config = SapApiConfig {
            api_key: Some("line\nbreak".to_string()),
            ..SapApiConfig::default()
        };
        assert!(SapRequestClient::new(&config).is_err());
    }
}
