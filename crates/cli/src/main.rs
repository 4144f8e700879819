#![forbid(unsafe_code)]

mod args;

use anyhow::Context as _;
use graphql_transport::GraphqlClient;
use http::{HeaderMap, HeaderName, HeaderValue};
use mcp::McpServer;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = self::args::parse();

    let filter = {
        let builder = EnvFilter::builder();
        match args.log_filter.as_deref() {
            Some(argument_filter) => builder.parse_lossy(argument_filter),
            None => builder.from_env_lossy(),
        }
    };

    // stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut headers = HeaderMap::new();

    for (name, value) in args.headers() {
        let name: HeaderName = name
            .parse()
            .with_context(|| format!("invalid header name '{name}'"))?;
        let value: HeaderValue = value
            .parse()
            .with_context(|| format!("invalid value for header '{name}'"))?;

        headers.insert(name, value);
    }

    let client = GraphqlClient::new(args.endpoint.clone()).with_headers(headers);

    tracing::info!("serving MCP tools for {}", args.endpoint);

    let service = McpServer::new(client).serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
