use std::borrow::Cow;
use std::sync::Arc;

use graphql_schema::SchemaCache;
use graphql_transport::Transport;
use rmcp::model::{CallToolResult, ToolAnnotations};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{json_content, Tool};

const DEFAULT_SCHEMA: &str = "public";

pub(crate) struct ListTablesTool<T: Transport> {
    cache: Arc<SchemaCache<T>>,
}

impl<T: Transport> ListTablesTool<T> {
    pub(crate) fn new(cache: Arc<SchemaCache<T>>) -> Self {
        Self { cache }
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListTablesParameters {
    /// Only list tables grouped under this database schema name.
    schema_name: Option<String>,
}

impl<T: Transport> Tool for ListTablesTool<T> {
    type Parameters = ListTablesParameters;

    fn name() -> &'static str {
        "list_tables"
    }

    fn description(&self) -> Cow<'_, str> {
        "Lists the table-like query root fields, grouped by database schema. Grouping relies on a best-effort `schema:` hint in field descriptions and may not generalize to every endpoint.".into()
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new().read_only(true)
    }

    async fn call(&self, parameters: Self::Parameters) -> anyhow::Result<CallToolResult> {
        let schema = self.cache.ensure_loaded().await?;

        let mut tables = schema.list_tables(DEFAULT_SCHEMA);
        if let Some(schema_name) = &parameters.schema_name {
            tables.retain(|table| &table.schema == schema_name);
        }

        json_content(&json!({ "tables": tables }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{text_of, MockTransport};
    use super::*;

    #[tokio::test]
    async fn groups_tables_by_the_schema_hint() {
        let cache = Arc::new(SchemaCache::new(MockTransport::new()));
        let tool = ListTablesTool::new(cache);

        let result = tool
            .call(ListTablesParameters { schema_name: None })
            .await
            .unwrap();

        let payload: serde_json::Value = serde_json::from_str(&text_of(&result)).unwrap();
        let tables = payload["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0]["name"], "users");
        assert_eq!(tables[0]["schema"], "public");
        assert_eq!(tables[1]["name"], "orders");
        assert_eq!(tables[1]["schema"], "sales");
    }

    #[tokio::test]
    async fn filters_by_schema_name() {
        let cache = Arc::new(SchemaCache::new(MockTransport::new()));
        let tool = ListTablesTool::new(cache);

        let result = tool
            .call(ListTablesParameters {
                schema_name: Some("sales".to_owned()),
            })
            .await
            .unwrap();

        let payload: serde_json::Value = serde_json::from_str(&text_of(&result)).unwrap();
        let tables = payload["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0]["name"], "orders");
    }
}
