use http::HeaderMap;
use reqwest::header::USER_AGENT;
use url::Url;

use crate::{Transport, TransportError};

const HEALTH_PATH: &str = "/healthz";

#[derive(Debug, serde::Serialize)]
struct Request<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, serde::Deserialize)]
struct Response {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, serde::Deserialize)]
struct GraphqlError {
    message: String,
}

/// A GraphQL-over-HTTP client bound to a single endpoint.
///
/// Headers passed at construction time (authentication, usually) are sent
/// with every request; callers can add per-request headers on top.
#[derive(Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
}

impl GraphqlClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn execute_with_headers(
        &self,
        query: &str,
        variables: serde_json::Value,
        extra_headers: Option<HeaderMap>,
    ) -> Result<serde_json::Value, TransportError> {
        let request = Request { query, variables };

        let mut request_builder = self
            .http
            .post(self.endpoint.clone())
            .header(USER_AGENT, "tablegraph")
            .header("Accept", "application/json")
            .headers(self.headers.clone())
            .json(&request);

        if let Some(extra) = extra_headers {
            request_builder = request_builder.headers(extra);
        }

        tracing::debug!(endpoint = %self.endpoint, "executing GraphQL document");

        let response = request_builder.send().await?.error_for_status()?;
        let response: Response = response.json().await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            return Err(TransportError::graphql(
                errors.into_iter().map(|error| error.message).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            TransportError::MalformedResponse("response carried neither data nor errors".to_owned())
        })
    }

    /// Probes a health endpoint. Never fails: reachability problems are part
    /// of the report, not an error.
    pub async fn health_check(&self, url: Option<Url>) -> String {
        let url = url.unwrap_or_else(|| {
            let mut url = self.endpoint.clone();
            url.set_path(HEALTH_PATH);
            url.set_query(None);
            url
        });

        match self.http.get(url.clone()).send().await {
            Ok(response) if response.status().is_success() => {
                format!("Health check OK for {url} (HTTP {})", response.status())
            }
            Ok(response) => {
                format!("Health check FAILED for {url}: HTTP {}", response.status())
            }
            Err(error) => format!("Health check FAILED for {url}: {error}"),
        }
    }
}

impl Transport for GraphqlClient {
    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        self.execute_with_headers(query, variables, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GraphqlClient {
        let url = Url::parse(&format!("{}/v1/graphql", server.uri())).unwrap();
        GraphqlClient::new(url)
    }

    #[tokio::test]
    async fn returns_data_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/graphql"))
            .and(body_partial_json(json!({ "query": "{ users { id } }" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "users": [{ "id": 1 }] }
            })))
            .mount(&server)
            .await;

        let data = client_for(&server)
            .await
            .execute("{ users { id } }", json!({}))
            .await
            .unwrap();

        assert_eq!(data, json!({ "users": [{ "id": 1 }] }));
    }

    #[tokio::test]
    async fn surfaces_graphql_errors_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [
                    { "message": "field 'nope' not found" },
                    { "message": "validation failed" }
                ]
            })))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .await
            .execute("{ nope }", json!({}))
            .await
            .unwrap_err();

        match error {
            TransportError::Graphql { messages } => {
                assert_eq!(messages, vec!["field 'nope' not found", "validation failed"]);
            }
            other => panic!("expected GraphQL errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_failure_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .await
            .execute("{ users { id } }", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Transport(_)));
    }

    #[tokio::test]
    async fn health_check_reports_failure_without_erroring() {
        // Port from a server we immediately drop, so nothing is listening.
        let url = {
            let server = MockServer::start().await;
            Url::parse(&format!("{}/healthz", server.uri())).unwrap()
        };

        let server = MockServer::start().await;
        let report = client_for(&server).await.health_check(Some(url)).await;

        assert!(report.contains("FAILED"), "unexpected report: {report}");
    }

    #[tokio::test]
    async fn health_check_defaults_to_healthz_next_to_the_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let report = client_for(&server).await.health_check(None).await;

        assert!(report.contains("OK"), "unexpected report: {report}");
    }
}
