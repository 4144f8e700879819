//! Synthesizes concrete GraphQL documents from schema metadata: table
//! previews, aggregates over Hasura-style `<table>_aggregate` roots, and
//! bounded table-description introspections.
//!
//! All document text is assembled here so identifier validity is checked in
//! one place; everything interpolated into a document goes through
//! [`validate_identifier`] first. Values never get interpolated, they travel
//! as variables.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Schema, SchemaError, TypeDefinition, TypeRef};

/// Selected when a table type exposes no scalar-like field at all; valid on
/// any object selection.
pub const PREVIEW_FALLBACK_FIELD: &str = "__typename";

const DESCRIBE_TABLE_QUERY: &str = indoc::indoc! {r"
    query DescribeTable($name: String!) {
      __type(name: $name) {
        kind
        name
        description
        fields(includeDeprecated: true) {
          name
          description
          type {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
                ofType { kind name }
              }
            }
          }
          args {
            name
            description
            type { kind name ofType { kind name } }
          }
        }
      }
    }
"};

/// A transient query document: text plus its variables. Built fresh per
/// invocation, never cached.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryDocument {
    pub query: String,
    pub variables: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    fn as_str(self) -> &'static str {
        match self {
            AggregateFunction::Count => "count",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }
}

impl std::fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejects anything that is not a valid GraphQL name before it can reach a
/// synthesized document.
pub(crate) fn validate_identifier(name: &str) -> Result<&str, SchemaError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(SchemaError::InvalidArgument(format!(
            "'{name}' is not a valid GraphQL identifier"
        )))
    }
}

/// Builds a sample-row preview for a table type: scalar-like fields only, in
/// declared order, with the row limit passed as a variable.
pub fn preview_query(
    schema: &Schema,
    table: &str,
    limit: u32,
) -> Result<QueryDocument, SchemaError> {
    validate_identifier(table)?;
    if limit == 0 {
        return Err(SchemaError::InvalidArgument(
            "limit must be greater than zero".to_owned(),
        ));
    }

    let ty = schema
        .find_type(table)
        .ok_or_else(|| SchemaError::TableNotFound(table.to_owned()))?;

    let TypeDefinition::Object { fields } = &ty.definition else {
        return Err(SchemaError::InvalidArgument(format!(
            "type '{table}' is not an object type"
        )));
    };

    let mut selection = Vec::new();
    for field in fields {
        if field.ty.leaf()?.kind.is_scalar_like() {
            selection.push(field.name.as_str());
        }
    }
    if selection.is_empty() {
        tracing::debug!(table, "no scalar-like fields, falling back to the meta field");
        selection.push(PREVIEW_FALLBACK_FIELD);
    }

    let query = format!(
        "query($limit: Int!) {{ {table}(limit: $limit) {{ {} }} }}",
        selection.join(" ")
    );

    let mut variables = serde_json::Map::new();
    variables.insert("limit".to_owned(), json!(limit));

    Ok(QueryDocument { query, variables })
}

/// Builds an aggregate query over the conventional `<table>_aggregate` root.
///
/// `field` is required for every function except `count`; a `field` passed
/// with `count` is ignored. An optional filter object is declared as a
/// `<table>_bool_exp!` variable and passed as the root's `where` argument.
pub fn aggregate_query(
    table: &str,
    function: AggregateFunction,
    field: Option<&str>,
    filter: Option<serde_json::Value>,
) -> Result<QueryDocument, SchemaError> {
    validate_identifier(table)?;

    let selection = match function {
        AggregateFunction::Count => {
            if field.is_some() {
                tracing::warn!(table, "'field' is ignored for the count aggregate");
            }
            "aggregate { count }".to_owned()
        }
        function => {
            let field = field.ok_or_else(|| {
                SchemaError::InvalidArgument(format!(
                    "aggregate function '{function}' requires a 'field' argument"
                ))
            })?;
            validate_identifier(field)?;
            format!("aggregate {{ {function} {{ {field} }} }}")
        }
    };

    let mut variables = serde_json::Map::new();
    let query = match filter {
        Some(filter) => {
            variables.insert("filter".to_owned(), filter);
            format!(
                "query($filter: {table}_bool_exp!) {{ {table}_aggregate(where: $filter) {{ {selection} }} }}"
            )
        }
        None => format!("query {{ {table}_aggregate {{ {selection} }} }}"),
    };

    Ok(QueryDocument { query, variables })
}

/// Builds the fixed-shape introspection for one named type. The type name
/// travels as a variable, so no identifier validation applies.
pub fn table_description_query(type_name: &str) -> QueryDocument {
    let mut variables = serde_json::Map::new();
    variables.insert("name".to_owned(), json!(type_name));

    QueryDocument {
        query: DESCRIBE_TABLE_QUERY.to_owned(),
        variables,
    }
}

#[derive(Debug, Deserialize)]
struct DescribedType {
    description: Option<String>,
    fields: Option<Vec<DescribedField>>,
}

#[derive(Debug, Deserialize)]
struct DescribedField {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: TypeRef,
    args: Option<Vec<DescribedArg>>,
}

#[derive(Debug, Deserialize)]
struct DescribedArg {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: TypeRef,
}

/// Shapes a table-description response into the operation payload. Returns
/// `None` when the endpoint resolved `__type` to null (type unknown), so the
/// caller can retry with a different casing.
pub fn shape_table_description(
    table_name: &str,
    schema_name: &str,
    data: &serde_json::Value,
) -> Result<Option<serde_json::Value>, SchemaError> {
    let described = match data.get("__type") {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(ty) => ty.clone(),
    };

    let described: DescribedType = serde_json::from_value(described)
        .map_err(|error| SchemaError::SchemaIntegrity(error.to_string()))?;

    let mut columns: Vec<serde_json::Value> = described
        .fields
        .unwrap_or_default()
        .into_iter()
        .map(|field| {
            json!({
                "name": field.name,
                "type": field.ty.render(),
                "description": field.description,
                "args": field
                    .args
                    .unwrap_or_default()
                    .into_iter()
                    .map(|arg| json!({
                        "name": arg.name,
                        "type": arg.ty.render(),
                        "description": arg.description,
                    }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    columns.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));

    Ok(Some(json!({
        "table": {
            "name": table_name,
            "schema": schema_name,
            "description": described.description,
            "columns": columns,
        }
    })))
}
