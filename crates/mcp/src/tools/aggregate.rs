use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::{aggregate_query, AggregateFunction, SchemaCache};
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_content, Tool};

pub(crate) struct AggregateDataTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> AggregateDataTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AggregateParameters {
    /// Table to aggregate over; the query targets `<tableName>_aggregate`.
    table_name: String,
    aggregate_function: AggregateFunction,
    /// Column to aggregate. Required for every function except `count`.
    field: Option<String>,
    /// Optional `<tableName>_bool_exp` filter object, passed as `where`.
    filter: Option<serde_json::Value>,
}

impl<T: Transport> Tool for AggregateDataTool<T> {
    type Parameters = AggregateParameters;

    fn name() -> &'static str {
        "aggregate_data"
    }

    fn description(&self) -> Cow<'_, str> {
        "Runs a count/sum/avg/min/max aggregate on a table through its `<table>_aggregate` root, with an optional filter.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let document = aggregate_query(
            &parameters.table_name,
            parameters.aggregate_function,
            parameters.field.as_deref(),
            parameters.filter,
        )?;

        let data = self
            .cache
            .transport()
            .execute(&document.query, document.variables.into())
            .await?;

        // Unwrap `<table>_aggregate.aggregate`; an unexpected response shape
        // degrades to the raw response rather than failing.
        let root_key = format!("{}_aggregate", parameters.table_name);
        let unwrapped = data
            .get(root_key.as_str())
            .and_then(|root| root.get("aggregate"))
            .cloned()
            .unwrap_or(data);

        json_content(&unwrapped)
    }
}
