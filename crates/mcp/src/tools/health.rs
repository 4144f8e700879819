use std::borrow::Cow;

use graphql_transport::GraphqlClient;
use rmcp::model::{CallToolResult, Content, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;
use url::Url;

use super::Tool;

pub(crate) struct HealthCheckTool {
    client: GraphqlClient,
}

impl HealthCheckTool {
    pub(crate) fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HealthCheckParameters {
    /// Health endpoint to probe. Defaults to `/healthz` next to the GraphQL
    /// endpoint.
    health_endpoint_url: Option<String>,
}

impl Tool for HealthCheckTool {
    type Parameters = HealthCheckParameters;

    fn name() -> &'static str {
        "health_check"
    }

    fn description(&self) -> Cow<'_, str> {
        "Probes the endpoint's health URL and reports the outcome as text. Reachability problems are part of the report, never an error.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        // This operation reports failures instead of raising them, including
        // an unparseable URL argument.
        let report = match parameters.health_endpoint_url.as_deref().map(Url::parse) {
            Some(Err(error)) => format!(
                "Health check FAILED: invalid health endpoint URL '{}': {error}",
                parameters.health_endpoint_url.as_deref().unwrap_or_default()
            ),
            Some(Ok(url)) => self.client.health_check(Some(url)).await,
            None => self.client.health_check(None).await,
        };

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }
}
