mod aggregate;
mod describe_table;
mod describe_type;
mod health;
mod list_root_fields;
mod list_tables;
mod mutation;
mod preview;
mod query;
mod schema;

pub(crate) use aggregate::AggregateDataTool;
pub(crate) use describe_table::DescribeTableTool;
pub(crate) use describe_type::DescribeGraphqlTypeTool;
pub(crate) use health::HealthCheckTool;
pub(crate) use list_root_fields::ListRootFieldsTool;
pub(crate) use list_tables::ListTablesTool;
pub(crate) use mutation::RunGraphqlMutationTool;
pub(crate) use preview::PreviewTableDataTool;
pub(crate) use query::RunGraphqlQueryTool;
pub(crate) use schema::GetSchemaTool;

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use rmcp::model::{
    CallToolResult, Content, ErrorCode, ErrorData, JsonObject, ToolAnnotations,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// A typed tool: deserialized parameters in, tool result out.
pub(crate) trait Tool: Send + Sync + 'static {
    type Parameters: DeserializeOwned + JsonSchema;

    fn name() -> &'static str
    where
        Self: Sized;

    fn description(&self) -> Cow<'_, str>;

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new()
    }

    fn call(
        &self,
        parameters: Self::Parameters,
    ) -> impl Future<Output = anyhow::Result<CallToolResult>> + Send + '_;
}

/// Object-safe adapter between [`Tool`] and the rmcp server surface.
pub(crate) trait RmcpTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn to_tool(&self) -> rmcp::model::Tool;

    fn call<'a>(
        &'a self,
        arguments: Option<JsonObject>,
    ) -> BoxFuture<'a, Result<CallToolResult, ErrorData>>;
}

impl<T: Tool> RmcpTool for T {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn to_tool(&self) -> rmcp::model::Tool {
        let mut tool = rmcp::model::Tool::new(
            T::name(),
            self.description().into_owned(),
            input_schema::<T::Parameters>(),
        );
        tool.annotations = Some(self.annotations());
        tool
    }

    fn call<'a>(
        &'a self,
        arguments: Option<JsonObject>,
    ) -> BoxFuture<'a, Result<CallToolResult, ErrorData>> {
        Box::pin(async move {
            let arguments = serde_json::Value::Object(arguments.unwrap_or_default());
            let parameters: T::Parameters = serde_json::from_value(arguments).map_err(|error| {
                ErrorData::new(
                    ErrorCode::INVALID_PARAMS,
                    format!("invalid arguments for '{}': {error}", T::name()),
                    None,
                )
            })?;

            match Tool::call(self, parameters).await {
                Ok(result) => Ok(result),
                Err(error) => {
                    tracing::debug!(tool = T::name(), "tool call failed: {error:#}");
                    Ok(CallToolResult::error(vec![Content::text(format!(
                        "{error:#}"
                    ))]))
                }
            }
        })
    }
}

/// JSON schema for a tool's parameters, with subschemas inlined since MCP
/// hosts don't resolve `$ref` against definitions.
fn input_schema<P: JsonSchema>() -> Arc<JsonObject> {
    let generator = schemars::gen::SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<P>();

    let schema = serde_json::to_value(schema)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default();

    Arc::new(schema)
}

/// Pretty JSON as a single text content block.
pub(crate) fn json_content(value: &serde_json::Value) -> anyhow::Result<CallToolResult> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Syntactic prefix check on trimmed, case-insensitive text. Deliberately not
/// a parse: its only job is to keep the read-only runner and the mutation
/// runner on their own sides of the fence.
pub(crate) fn looks_like_mutation(document: &str) -> bool {
    let bytes = document.trim_start().as_bytes();
    bytes.len() >= 8 && bytes[..8].eq_ignore_ascii_case(b"mutation")
}

#[cfg(test)]
pub(crate) mod test_support;
