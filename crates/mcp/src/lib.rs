//! The tablegraph MCP server: exposes a remote GraphQL API's structure and
//! data as named tools plus a read-only schema resource.

mod server;
mod tools;

pub use server::{McpServer, SCHEMA_RESOURCE_URI};
