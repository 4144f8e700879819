use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::{preview_query, SchemaCache};
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, Tool};

const DEFAULT_LIMIT: u32 = 5;

pub(crate) struct PreviewTableDataTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> PreviewTableDataTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewParameters {
    /// Name of the table type to preview.
    table_name: String,
    /// Maximum number of rows to fetch. Must be greater than zero.
    limit: Option<u32>,
}

impl<T: Transport> Tool for PreviewTableDataTool<T> {
    type Parameters = PreviewParameters;

    fn name() -> &'static str {
        "preview_table_data"
    }

    fn description(&self) -> Cow<'_, str> {
        "Fetches a few sample rows from a table, selecting only its scalar and enum columns.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let schema = self.cache.ensure_loaded().await?;

        let document = preview_query(
            &schema,
            &parameters.table_name,
            parameters.limit.unwrap_or(DEFAULT_LIMIT),
        )?;

        let data = self
            .cache
            .transport()
            .execute(&document.query, document.variables.into())
            .await?;

        json_content(&data)
    }
}
