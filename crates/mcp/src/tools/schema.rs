use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::SchemaCache;
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, Tool};

/// Tool-shaped access to the full cached schema, for hosts that never read
/// resources. The same payload backs the `tablegraph://schema` resource.
pub(crate) struct GetSchemaTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> GetSchemaTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct GetSchemaParameters {}

impl<T: Transport> Tool for GetSchemaTool<T> {
    type Parameters = GetSchemaParameters;

    fn name() -> &'static str {
        "get_schema"
    }

    fn description(&self) -> Cow<'_, str> {
        "Returns the full introspected schema as JSON.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, _parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let schema = self.cache.ensure_loaded().await?;
        json_content(&serde_json::to_value(&*schema)?)
    }
}
