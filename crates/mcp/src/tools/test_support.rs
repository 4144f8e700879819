//! In-memory transport and fixtures for tool tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use graphql_transport::{Transport, TransportError};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{json, Value};

/// Records every executed document; answers introspection with a fixed
/// Hasura-shaped schema and everything else from a scripted queue.
pub(crate) struct MockTransport {
    executed: Mutex<Vec<(String, Value)>>,
    responses: Mutex<VecDeque<Value>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    pub(crate) fn with_responses(responses: Vec<Value>) -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        }
    }

    /// Executed documents, introspection fetches excluded.
    pub(crate) fn data_queries(&self) -> Vec<(String, Value)> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .filter(|(query, _)| !query.contains("__schema"))
            .cloned()
            .collect()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, TransportError> {
        self.executed
            .lock()
            .unwrap()
            .push((query.to_owned(), variables));

        if query.contains("__schema") {
            return Ok(introspection_fixture());
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json!({})))
    }
}

pub(crate) fn text_of(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .map(|content| match &content.raw {
            RawContent::Text(text) => text.text.clone(),
            _ => String::new(),
        })
        .collect()
}

pub(crate) fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

fn object_type(name: &str, description: Value, fields: Value) -> Value {
    json!({
        "kind": "OBJECT",
        "name": name,
        "description": description,
        "fields": fields,
        "inputFields": null,
        "enumValues": null,
        "possibleTypes": null
    })
}

fn scalar_field(name: &str, ty: Value) -> Value {
    json!({ "name": name, "description": null, "args": [], "type": ty })
}

fn non_null(inner: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn list(inner: Value) -> Value {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

fn scalar(name: &str) -> Value {
    json!({ "kind": "SCALAR", "name": name })
}

/// A query-only schema with `users` and `orders` tables plus an aggregate
/// helper root, mirroring what a Hasura endpoint exposes.
pub(crate) fn introspection_fixture() -> Value {
    let scalars: Vec<Value> = ["Int", "Float", "String"]
        .iter()
        .map(|name| {
            json!({
                "kind": "SCALAR",
                "name": name,
                "description": null,
                "fields": null,
                "inputFields": null,
                "enumValues": null,
                "possibleTypes": null
            })
        })
        .collect();

    let orders_root_field = {
        let mut field = scalar_field(
            "orders",
            non_null(list(non_null(json!({ "kind": "OBJECT", "name": "orders" })))),
        );
        field["description"] = json!("rows from schema: sales, table: orders");
        field
    };

    let mut types = vec![
        object_type(
            "query_root",
            json!(null),
            json!([
                scalar_field("users", non_null(list(non_null(json!({ "kind": "OBJECT", "name": "users" }))))),
                orders_root_field,
                scalar_field("orders_aggregate", json!({ "kind": "OBJECT", "name": "orders_aggregate" })),
            ]),
        ),
        object_type(
            "users",
            json!(null),
            json!([
                scalar_field("id", non_null(scalar("Int"))),
                scalar_field("name", scalar("String")),
                scalar_field("tags", non_null(list(non_null(scalar("String"))))),
                scalar_field("profile", { json!({ "kind": "OBJECT", "name": "Profile" }) }),
            ]),
        ),
        object_type(
            "orders",
            json!(null),
            json!([
                scalar_field("id", non_null(scalar("Int"))),
                scalar_field("total", scalar("Float")),
                scalar_field("status", scalar("String")),
            ]),
        ),
        object_type(
            "orders_aggregate",
            json!(null),
            json!([
                scalar_field("aggregate", json!({ "kind": "OBJECT", "name": "orders_aggregate_fields" })),
            ]),
        ),
        object_type(
            "orders_aggregate_fields",
            json!(null),
            json!([scalar_field("count", scalar("Int"))]),
        ),
        object_type(
            "Profile",
            json!(null),
            json!([scalar_field("bio", scalar("String"))]),
        ),
    ];
    types.extend(scalars);

    json!({
        "__schema": {
            "queryType": { "name": "query_root" },
            "mutationType": null,
            "subscriptionType": null,
            "types": types
        }
    })
}
