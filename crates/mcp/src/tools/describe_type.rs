use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::SchemaCache;
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, Tool};

pub(crate) struct DescribeGraphqlTypeTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> DescribeGraphqlTypeTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeTypeParameters {
    /// Exact name of the type to describe.
    type_name: String,
}

impl<T: Transport> Tool for DescribeGraphqlTypeTool<T> {
    type Parameters = DescribeTypeParameters;

    fn name() -> &'static str {
        "describe_graphql_type"
    }

    fn description(&self) -> Cow<'_, str> {
        "Describes a named GraphQL type: fields and argument types for objects and interfaces, input fields for input objects, values for enums, possible types for unions.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let schema = self.cache.ensure_loaded().await?;
        let description = schema.describe_type(&parameters.type_name)?;
        json_content(&description)
    }
}
