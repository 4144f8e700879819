//! Fetches and decodes the standard GraphQL introspection result into the
//! domain [`Schema`].

use graphql_transport::Transport;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    EnumValue, Field, InputValue, NamedType, Schema, SchemaError, TypeDefinition, TypeKind, TypeRef,
};

/// The standard introspection document. The `ofType` chain is unrolled deep
/// enough for any realistic LIST/NON_NULL nesting.
pub const INTROSPECTION_QUERY: &str = indoc::indoc! {r"
    query IntrospectionQuery {
      __schema {
        queryType { name }
        mutationType { name }
        subscriptionType { name }
        types {
          kind
          name
          description
          fields(includeDeprecated: true) {
            name
            description
            args {
              name
              description
              type { ...TypeRef }
            }
            type { ...TypeRef }
          }
          inputFields {
            name
            description
            type { ...TypeRef }
          }
          enumValues(includeDeprecated: true) {
            name
            description
          }
          possibleTypes { name }
        }
      }
    }

    fragment TypeRef on __Type {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
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
          }
        }
      }
    }
"};

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<RootTypeRef>,
    mutation_type: Option<RootTypeRef>,
    subscription_type: Option<RootTypeRef>,
    types: Vec<IntrospectionType>,
}

#[derive(Debug, Deserialize)]
struct RootTypeRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: TypeKind,
    name: Option<String>,
    description: Option<String>,
    fields: Option<Vec<IntrospectionField>>,
    input_fields: Option<Vec<IntrospectionInputValue>>,
    enum_values: Option<Vec<IntrospectionEnumValue>>,
    possible_types: Option<Vec<RootTypeRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionField {
    name: String,
    description: Option<String>,
    args: Option<Vec<IntrospectionInputValue>>,
    #[serde(rename = "type")]
    ty: TypeRef,
}

#[derive(Debug, Deserialize)]
struct IntrospectionInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: TypeRef,
}

#[derive(Debug, Deserialize)]
struct IntrospectionEnumValue {
    name: String,
    description: Option<String>,
}

/// Performs one introspection fetch through the transport and decodes the
/// result. Any transport or decoding failure leaves no partial schema behind.
pub async fn fetch_schema<T: Transport>(transport: &T) -> Result<Schema, SchemaError> {
    let data = transport
        .execute(INTROSPECTION_QUERY, serde_json::json!({}))
        .await
        .map_err(SchemaError::Fetch)?;

    schema_from_introspection(data)
}

pub(crate) fn schema_from_introspection(data: serde_json::Value) -> Result<Schema, SchemaError> {
    if data.get("__schema").is_none() {
        return Err(SchemaError::SchemaIntegrity(
            "introspection response is missing the __schema object".to_owned(),
        ));
    }

    let data: IntrospectionData = serde_json::from_value(data)
        .map_err(|error| SchemaError::SchemaIntegrity(error.to_string()))?;

    let mut types = IndexMap::with_capacity(data.schema.types.len());
    for ty in data.schema.types {
        let named = named_type_from_introspection(ty)?;
        types.insert(named.name.clone(), named);
    }

    Ok(Schema {
        query_type: data.schema.query_type.and_then(|ty| ty.name),
        mutation_type: data.schema.mutation_type.and_then(|ty| ty.name),
        subscription_type: data.schema.subscription_type.and_then(|ty| ty.name),
        types,
    })
}

fn named_type_from_introspection(ty: IntrospectionType) -> Result<NamedType, SchemaError> {
    let name = ty.name.ok_or_else(|| {
        SchemaError::SchemaIntegrity(format!("unnamed {:?} type in introspection result", ty.kind))
    })?;

    let definition = match ty.kind {
        TypeKind::Scalar => TypeDefinition::Scalar,
        TypeKind::Object => TypeDefinition::Object {
            fields: fields_from_introspection(ty.fields),
        },
        TypeKind::Interface => TypeDefinition::Interface {
            fields: fields_from_introspection(ty.fields),
            possible_types: possible_types_from_introspection(ty.possible_types),
        },
        TypeKind::Union => TypeDefinition::Union {
            possible_types: possible_types_from_introspection(ty.possible_types),
        },
        TypeKind::Enum => TypeDefinition::Enum {
            enum_values: ty
                .enum_values
                .unwrap_or_default()
                .into_iter()
                .map(|value| EnumValue {
                    name: value.name,
                    description: value.description,
                })
                .collect(),
        },
        TypeKind::InputObject => TypeDefinition::InputObject {
            input_fields: ty
                .input_fields
                .unwrap_or_default()
                .into_iter()
                .map(input_value_from_introspection)
                .collect(),
        },
        TypeKind::List | TypeKind::NonNull => {
            return Err(SchemaError::SchemaIntegrity(format!(
                "wrapper kind {:?} at the top level of the type map",
                ty.kind
            )))
        }
    };

    Ok(NamedType {
        name,
        description: ty.description,
        definition,
    })
}

fn fields_from_introspection(fields: Option<Vec<IntrospectionField>>) -> Vec<Field> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|field| Field {
            name: field.name,
            description: field.description,
            ty: field.ty,
            args: field
                .args
                .unwrap_or_default()
                .into_iter()
                .map(input_value_from_introspection)
                .collect(),
        })
        .collect()
}

fn input_value_from_introspection(input: IntrospectionInputValue) -> InputValue {
    InputValue {
        name: input.name,
        description: input.description,
        ty: input.ty,
    }
}

fn possible_types_from_introspection(possible_types: Option<Vec<RootTypeRef>>) -> Vec<String> {
    possible_types
        .unwrap_or_default()
        .into_iter()
        .filter_map(|ty| ty.name)
        .collect()
}
