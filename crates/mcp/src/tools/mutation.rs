use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::{SchemaCache, SchemaError};
use graphql_transport::Transport;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, looks_like_mutation, Tool};

pub(crate) struct RunGraphqlMutationTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> RunGraphqlMutationTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunMutationParameters {
    /// A complete GraphQL mutation document, starting with `mutation`.
    mutation: String,
    /// Variables referenced by the document.
    variables: Option<serde_json::Value>,
}

impl<T: Transport> Tool for RunGraphqlMutationTool<T> {
    type Parameters = RunMutationParameters;

    fn name() -> &'static str {
        "run_graphql_mutation"
    }

    fn description(&self) -> Cow<'_, str> {
        "Executes a GraphQL mutation. The document must start with the `mutation` keyword.".into()
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        if !looks_like_mutation(&parameters.mutation) {
            return Err(SchemaError::InvalidArgument(
                "the document does not start with 'mutation'; use run_graphql_query for queries"
                    .to_owned(),
            )
            .into());
        }

        let data = self
            .cache
            .transport()
            .execute(
                &parameters.mutation,
                parameters.variables.unwrap_or_else(|| serde_json::json!({})),
            )
            .await?;

        json_content(&data)
    }
}
