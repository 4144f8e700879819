//! Read-only lookups over a cached [`Schema`]: root fields, named types and
//! kind-shaped type descriptions.

use serde::Serialize;
use serde_json::json;

use crate::{Field, NamedType, OperationKind, Schema, SchemaError, TypeDefinition};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFieldSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// the root operation type this field is declared on
    pub on: OperationKind,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    pub name: String,
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    pub fn find_type(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// The fields of the root type for the given operation kind, if that root
    /// exists and resolves to a field-bearing type.
    pub fn root_fields(&self, kind: OperationKind) -> Option<&[Field]> {
        let root = self.root_type_name(kind)?;
        self.find_type(root)?.definition.fields()
    }

    pub fn find_root_field(&self, kind: OperationKind, field_name: &str) -> Option<&Field> {
        self.root_fields(kind)?
            .iter()
            .find(|field| field.name == field_name)
    }

    /// Root fields sorted by name. When `kind` is absent, the union across
    /// all declared roots, each entry tagged by its origin and sorted within
    /// its origin group.
    pub fn list_root_fields(&self, kind: Option<OperationKind>) -> Vec<RootFieldSummary> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => vec![
                OperationKind::Query,
                OperationKind::Mutation,
                OperationKind::Subscription,
            ],
        };

        let mut summaries = Vec::new();
        for kind in kinds {
            let mut group: Vec<_> = self
                .root_fields(kind)
                .unwrap_or_default()
                .iter()
                .map(|field| RootFieldSummary {
                    name: field.name.clone(),
                    description: field.description.clone(),
                    on: kind,
                })
                .collect();
            group.sort_by(|a, b| a.name.cmp(&b.name));
            summaries.extend(group);
        }
        summaries
    }

    /// A kind-shaped description of one named type, with rendered type syntax
    /// for field, argument and input-field types.
    pub fn describe_type(&self, name: &str) -> Result<serde_json::Value, SchemaError> {
        let ty = self
            .find_type(name)
            .ok_or_else(|| SchemaError::TypeNotFound(name.to_owned()))?;

        let mut description = json!({
            "name": ty.name,
            "kind": ty.definition.kind(),
            "description": ty.description,
        });

        match &ty.definition {
            TypeDefinition::Object { fields } => {
                description["fields"] = fields_description(fields);
            }
            TypeDefinition::Interface {
                fields,
                possible_types,
            } => {
                description["fields"] = fields_description(fields);
                description["possibleTypes"] = json!(possible_types);
            }
            TypeDefinition::Union { possible_types } => {
                description["possibleTypes"] = json!(possible_types);
            }
            TypeDefinition::Enum { enum_values } => {
                description["enumValues"] = json!(enum_values
                    .iter()
                    .map(|value| json!({
                        "name": value.name,
                        "description": value.description,
                    }))
                    .collect::<Vec<_>>());
            }
            TypeDefinition::InputObject { input_fields } => {
                description["inputFields"] = json!(input_fields
                    .iter()
                    .map(|input| json!({
                        "name": input.name,
                        "description": input.description,
                        "type": input.ty.render(),
                    }))
                    .collect::<Vec<_>>());
            }
            TypeDefinition::Scalar => {
                description["message"] = json!("this type has no traversable fields");
            }
        }

        Ok(description)
    }

    /// Best-effort table listing: query-root fields whose leaf type is an
    /// object, grouped by a `schema:` hint parsed out of free-text
    /// descriptions. The hint is a Hasura-ish naming convention, not a
    /// protocol guarantee; endpoints using other conventions land everything
    /// in the default group.
    pub fn list_tables(&self, default_schema: &str) -> Vec<TableEntry> {
        let mut tables: Vec<TableEntry> = self
            .root_fields(OperationKind::Query)
            .unwrap_or_default()
            .iter()
            .filter(|field| {
                !field.name.starts_with("__")
                    && !field.name.ends_with("_aggregate")
                    && !field.name.ends_with("_by_pk")
            })
            .filter_map(|field| {
                let leaf = field.ty.leaf().ok()?;
                let type_description = leaf
                    .name
                    .as_deref()
                    .and_then(|name| self.find_type(name))
                    .filter(|ty| matches!(ty.definition, TypeDefinition::Object { .. }))?
                    .description
                    .clone();

                let schema = field
                    .description
                    .as_deref()
                    .and_then(parse_schema_hint)
                    .or_else(|| type_description.as_deref().and_then(parse_schema_hint))
                    .unwrap_or_else(|| default_schema.to_owned());

                Some(TableEntry {
                    name: field.name.clone(),
                    schema,
                    description: field.description.clone().or(type_description),
                })
            })
            .collect();

        tables.sort_by(|a, b| (&a.schema, &a.name).cmp(&(&b.schema, &b.name)));
        tables
    }
}

/// Extracts the token following a `schema:` marker, trimming quotes and
/// trailing punctuation.
fn parse_schema_hint(description: &str) -> Option<String> {
    let position = description.find("schema:")?;
    let rest = description[position + "schema:".len()..].trim_start();
    let token: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!token.is_empty()).then_some(token)
}

fn fields_description(fields: &[Field]) -> serde_json::Value {
    json!(fields
        .iter()
        .map(|field| json!({
            "name": field.name,
            "description": field.description,
            "type": field.ty.render(),
            "args": field
                .args
                .iter()
                .map(|arg| json!({
                    "name": arg.name,
                    "description": arg.description,
                    "type": arg.ty.render(),
                }))
                .collect::<Vec<_>>(),
        }))
        .collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::hasura_like_schema;
    use crate::TypeKind;

    #[test]
    fn finds_root_fields_by_operation_kind() {
        let schema = hasura_like_schema();

        assert!(schema
            .find_root_field(OperationKind::Query, "orders")
            .is_some());
        assert!(schema
            .find_root_field(OperationKind::Query, "nonexistent")
            .is_none());
        // No mutation root is declared at all.
        assert!(schema
            .find_root_field(OperationKind::Mutation, "orders")
            .is_none());
    }

    #[test]
    fn listing_mutations_on_a_query_only_schema_is_empty_not_an_error() {
        let schema = hasura_like_schema();
        assert!(schema.mutation_type.is_none());
        assert!(schema
            .list_root_fields(Some(OperationKind::Mutation))
            .is_empty());
    }

    #[test]
    fn root_fields_are_sorted_by_name_within_origin() {
        let schema = hasura_like_schema();
        let all = schema.list_root_fields(None);
        let names: Vec<_> = all.iter().map(|summary| summary.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "orders_aggregate", "users"]);
        assert!(all.iter().all(|summary| summary.on == OperationKind::Query));
    }

    #[test]
    fn describes_an_object_type_with_rendered_types() {
        let schema = hasura_like_schema();
        let description = schema.describe_type("orders").unwrap();

        assert_eq!(description["kind"], "OBJECT");
        let fields = description["fields"].as_array().unwrap();
        assert_eq!(fields[0]["name"], "id");
        assert_eq!(fields[0]["type"], "Int!");
        assert_eq!(fields[2]["name"], "tags");
        assert_eq!(fields[2]["type"], "[String!]!");
    }

    #[test]
    fn describing_a_scalar_reports_no_traversable_fields() {
        let schema = hasura_like_schema();
        let description = schema.describe_type("Int").unwrap();
        assert_eq!(description["kind"], "SCALAR");
        assert!(description["message"].as_str().is_some());
    }

    #[test]
    fn describing_an_unknown_type_fails_with_type_not_found() {
        let schema = hasura_like_schema();
        assert!(matches!(
            schema.describe_type("nope"),
            Err(SchemaError::TypeNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn tables_are_grouped_by_the_schema_description_hint() {
        let schema = hasura_like_schema();
        let tables = schema.list_tables("public");

        let entries: Vec<_> = tables
            .iter()
            .map(|table| (table.schema.as_str(), table.name.as_str()))
            .collect();
        // "orders" carries a `schema: sales` hint in its description; "users"
        // has none and falls back to the default. Aggregate helper roots are
        // filtered out.
        assert_eq!(entries, vec![("public", "users"), ("sales", "orders")]);
    }

    #[test]
    fn schema_hint_parsing_is_tolerant_of_surrounding_text() {
        assert_eq!(
            parse_schema_hint("columns and relationships of schema: sales, table: orders"),
            Some("sales".to_owned())
        );
        assert_eq!(parse_schema_hint("no hint here"), None);
        assert_eq!(parse_schema_hint("schema:"), None);
    }

    #[test]
    fn union_description_lists_possible_types() {
        let mut schema = hasura_like_schema();
        schema.types.insert(
            "SearchResult".to_owned(),
            crate::NamedType {
                name: "SearchResult".to_owned(),
                description: None,
                definition: crate::TypeDefinition::Union {
                    possible_types: vec!["users".to_owned(), "orders".to_owned()],
                },
            },
        );

        let description = schema.describe_type("SearchResult").unwrap();
        assert_eq!(description["possibleTypes"], serde_json::json!(["users", "orders"]));
        assert_eq!(description["kind"], serde_json::json!(TypeKind::Union));
    }
}
