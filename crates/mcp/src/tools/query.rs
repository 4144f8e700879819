use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::{SchemaCache, SchemaError};
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, looks_like_mutation, Tool};

pub(crate) struct RunGraphqlQueryTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> RunGraphqlQueryTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunQueryParameters {
    /// A complete GraphQL query document.
    query: String,
    /// Variables referenced by the document.
    variables: Option<serde_json::Value>,
}

impl<T: Transport> Tool for RunGraphqlQueryTool<T> {
    type Parameters = RunQueryParameters;

    fn name() -> &'static str {
        "run_graphql_query"
    }

    fn description(&self) -> Cow<'_, str> {
        "Executes a read-only GraphQL query. Documents starting with the `mutation` keyword are rejected; use `run_graphql_mutation` for those.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        if looks_like_mutation(&parameters.query) {
            return Err(SchemaError::InvalidArgument(
                "the document starts with 'mutation'; use run_graphql_mutation instead".to_owned(),
            )
            .into());
        }

        let data = self
            .cache
            .transport()
            .execute(
                &parameters.query,
                parameters.variables.unwrap_or_else(|| serde_json::json!({})),
            )
            .await?;

        json_content(&data)
    }
}
