use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::{shape_table_description, table_description_query, SchemaCache, SchemaError};
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, Tool};

pub(crate) struct DescribeTableTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> DescribeTableTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeTableParameters {
    /// Name of the table type to describe.
    table_name: String,
    /// Database schema the table belongs to.
    schema_name: Option<String>,
}

impl<T: Transport> Tool for DescribeTableTool<T> {
    type Parameters = DescribeTableParameters;

    fn name() -> &'static str {
        "describe_table"
    }

    fn description(&self) -> Cow<'_, str> {
        "Describes a table type as columns: name, rendered GraphQL type, description and arguments, sorted by column name.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let schema_name = parameters.schema_name.as_deref().unwrap_or("public");

        if let Some(table) = self
            .describe(&parameters.table_name, schema_name)
            .await?
        {
            return json_content(&table);
        }

        // Best-effort retry for naming-convention mismatches: the same name
        // with its first character upper-cased. Skipped when that produces
        // the identical name again.
        if let Some(retry_name) = capitalized(&parameters.table_name) {
            tracing::debug!(
                table = parameters.table_name,
                retry = retry_name,
                "table not found, retrying with capitalized name"
            );
            if let Some(table) = self.describe(&retry_name, schema_name).await? {
                return json_content(&table);
            }
        }

        Err(SchemaError::TableNotFound(parameters.table_name).into())
    }
}

impl<T: Transport> DescribeTableTool<T> {
    async fn describe(
        &self,
        table_name: &str,
        schema_name: &str,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let document = table_description_query(table_name);
        let data = self
            .cache
            .transport()
            .execute(&document.query, document.variables.into())
            .await?;

        Ok(shape_table_description(table_name, schema_name, &data)?)
    }
}

/// `None` when capitalizing would not change the name.
fn capitalized(name: &str) -> Option<String> {
    let first = name.chars().next()?;
    let capitalized: String = first.to_uppercase().chain(name.chars().skip(1)).collect();
    (capitalized != name).then_some(capitalized)
}
