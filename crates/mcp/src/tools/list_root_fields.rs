use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::{OperationKind, SchemaCache};
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, Content, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{json_content, Tool};

pub(crate) struct ListRootFieldsTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> ListRootFieldsTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListRootFieldsParameters {
    /// Restrict the listing to one root operation type. All declared roots
    /// are listed when omitted.
    field_type: Option<OperationKind>,
}

impl<T: Transport> Tool for ListRootFieldsTool<T> {
    type Parameters = ListRootFieldsParameters;

    fn name() -> &'static str {
        "list_root_fields"
    }

    fn description(&self) -> Cow<'_, str> {
        "Lists the root fields of the GraphQL API (query, mutation and subscription entry points) with their descriptions.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let schema = self.cache.ensure_loaded().await?;

        if parameters.field_type == Some(OperationKind::Mutation)
            && schema.mutation_type.is_none()
        {
            return Ok(CallToolResult::success(vec![Content::text(
                "No mutations defined in this schema",
            )]));
        }

        let summaries = schema.list_root_fields(parameters.field_type);
        let payload = match parameters.field_type {
            // Single origin: no need to tag every entry with it.
            Some(_) => json!(summaries
                .iter()
                .map(|summary| json!({
                    "name": summary.name,
                    "description": summary.description,
                }))
                .collect::<Vec<_>>()),
            None => json!(summaries),
        };

        json_content(&payload)
    }
}
