//! The domain model for an introspected schema.
//!
//! [`TypeDefinition`] is a tagged sum type with one payload shape per kind, so
//! all kind-dependent behavior pattern-matches exhaustively instead of probing
//! optional fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// One node of a recursive type reference.
///
/// Wrapper kinds (LIST, NON_NULL) carry `of_type` and never a name; named
/// kinds carry a name and never `of_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub args: Vec<InputValue>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A schema-level type definition, keyed by its unique name in [`Schema`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub definition: TypeDefinition,
}

#[derive(Clone, Debug, Serialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum TypeDefinition {
    Scalar,
    Object {
        fields: Vec<Field>,
    },
    Interface {
        fields: Vec<Field>,
        possible_types: Vec<String>,
    },
    Union {
        possible_types: Vec<String>,
    },
    Enum {
        enum_values: Vec<EnumValue>,
    },
    InputObject {
        input_fields: Vec<InputValue>,
    },
}

impl TypeDefinition {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Scalar => TypeKind::Scalar,
            TypeDefinition::Object { .. } => TypeKind::Object,
            TypeDefinition::Interface { .. } => TypeKind::Interface,
            TypeDefinition::Union { .. } => TypeKind::Union,
            TypeDefinition::Enum { .. } => TypeKind::Enum,
            TypeDefinition::InputObject { .. } => TypeKind::InputObject,
        }
    }

    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            TypeDefinition::Object { fields } | TypeDefinition::Interface { fields, .. } => {
                Some(fields)
            }
            _ => None,
        }
    }
}

/// The root aggregate: created atomically by one successful introspection
/// fetch, immutable afterwards, replaced wholesale by any later fetch.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,
    pub types: IndexMap<String, NamedType>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Query => f.write_str("QUERY"),
            OperationKind::Mutation => f.write_str("MUTATION"),
            OperationKind::Subscription => f.write_str("SUBSCRIPTION"),
        }
    }
}
