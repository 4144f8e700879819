use std::sync::Arc;

use graphql_schema::SchemaCache;
use graphql_transport::GraphqlClient;
use rmcp::{
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, ErrorCode, ErrorData, Implementation,
        ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion, RawResource,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};

use crate::tools::{
    AggregateDataTool, DescribeGraphqlTypeTool, DescribeTableTool, GetSchemaTool, HealthCheckTool,
    ListRootFieldsTool, ListTablesTool, PreviewTableDataTool, RmcpTool, RunGraphqlMutationTool,
    RunGraphqlQueryTool,
};

pub const SCHEMA_RESOURCE_URI: &str = "tablegraph://schema";

pub struct McpServer(Arc<McpServerInner>);

impl Clone for McpServer {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

pub struct McpServerInner {
    info: ServerInfo,
    tools: Vec<Box<dyn RmcpTool>>,
    cache: Arc<SchemaCache<GraphqlClient>>,
}

impl std::ops::Deref for McpServer {
    type Target = McpServerInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl McpServer {
    pub fn new(client: GraphqlClient) -> Self {
        let cache = Arc::new(SchemaCache::new(client.clone()));

        let tools: Vec<Box<dyn RmcpTool>> = vec![
            Box::new(ListRootFieldsTool::new(cache.clone())),
            Box::new(DescribeGraphqlTypeTool::new(cache.clone())),
            Box::new(ListTablesTool::new(cache.clone())),
            Box::new(DescribeTableTool::new(cache.clone())),
            Box::new(PreviewTableDataTool::new(cache.clone())),
            Box::new(AggregateDataTool::new(cache.clone())),
            Box::new(RunGraphqlQueryTool::new(cache.clone())),
            Box::new(RunGraphqlMutationTool::new(cache.clone())),
            Box::new(HealthCheckTool::new(client)),
            Box::new(GetSchemaTool::new(cache.clone())),
        ];

        Self(Arc::new(McpServerInner {
            info: ServerInfo {
                protocol_version: ProtocolVersion::LATEST,
                capabilities: ServerCapabilities::builder()
                    .enable_tools()
                    .enable_resources()
                    .build(),
                server_info: Implementation::from_build_env(),
                instructions: Some(
                    "Explore and query a remote GraphQL API: list its root fields and tables, \
                     describe types, preview and aggregate table data, and run ad-hoc documents."
                        .to_owned(),
                ),
            },
            tools,
            cache,
        }))
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        self.info.clone()
    }

    async fn list_tools(
        &self,
        _: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools.iter().map(|tool| tool.to_tool()).collect(),
        })
    }

    async fn call_tool(
        &self,
        CallToolRequestParam { name, arguments }: CallToolRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if let Some(tool) = self.tools.iter().find(|tool| tool.name() == name) {
            return tool.call(arguments).await;
        }

        Err(ErrorData::new(
            ErrorCode::INVALID_PARAMS,
            format!("Unknown tool '{name}'"),
            None,
        ))
    }

    async fn list_resources(
        &self,
        _: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut resource = RawResource::new(SCHEMA_RESOURCE_URI, "schema");
        resource.description = Some("The full introspected GraphQL schema as JSON".to_owned());
        resource.mime_type = Some("application/json".to_owned());

        Ok(ListResourcesResult {
            next_cursor: None,
            resources: vec![resource.no_annotation()],
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        if uri != SCHEMA_RESOURCE_URI {
            return Err(ErrorData::new(
                ErrorCode::RESOURCE_NOT_FOUND,
                format!("Unknown resource '{uri}'"),
                None,
            ));
        }

        let schema = self
            .cache
            .ensure_loaded()
            .await
            .map_err(|error| ErrorData::new(ErrorCode::INTERNAL_ERROR, error.to_string(), None))?;

        let json = serde_json::to_string_pretty(&*schema)
            .map_err(|error| ErrorData::new(ErrorCode::INTERNAL_ERROR, error.to_string(), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(json, uri)],
        })
    }
}
