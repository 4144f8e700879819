//! Shared fixtures for unit tests: a small Hasura-shaped schema built by hand.

use indexmap::IndexMap;

use crate::{Field, NamedType, Schema, TypeDefinition, TypeKind, TypeRef};

pub(crate) fn scalar(name: &str) -> TypeRef {
    TypeRef::named(TypeKind::Scalar, name)
}

pub(crate) fn object_ref(name: &str) -> TypeRef {
    TypeRef::named(TypeKind::Object, name)
}

pub(crate) fn field(name: &str, ty: TypeRef) -> Field {
    Field {
        name: name.to_owned(),
        description: None,
        ty,
        args: Vec::new(),
    }
}

pub(crate) fn object(name: &str, fields: Vec<Field>) -> NamedType {
    NamedType {
        name: name.to_owned(),
        description: None,
        definition: TypeDefinition::Object { fields },
    }
}

/// A query-only schema with two tables (`users`, `orders`), an aggregate
/// helper root and no mutation root. `orders` carries a `schema: sales`
/// description hint.
pub(crate) fn hasura_like_schema() -> Schema {
    let mut types = IndexMap::new();

    let users_root = field("users", TypeRef::non_null(TypeRef::list(TypeRef::non_null(object_ref("users")))));

    let mut orders_root = field("orders", TypeRef::non_null(TypeRef::list(TypeRef::non_null(object_ref("orders")))));
    orders_root.description =
        Some("fetch data from the table, schema: sales, table: orders".to_owned());

    let aggregate_root = field("orders_aggregate", object_ref("orders_aggregate"));

    types.insert(
        "query_root".to_owned(),
        object("query_root", vec![users_root, orders_root, aggregate_root]),
    );

    types.insert(
        "users".to_owned(),
        object(
            "users",
            vec![
                field("id", TypeRef::non_null(scalar("Int"))),
                field("name", scalar("String")),
                field("tags", TypeRef::non_null(TypeRef::list(TypeRef::non_null(scalar("String"))))),
                field("profile", object_ref("Profile")),
            ],
        ),
    );

    types.insert(
        "orders".to_owned(),
        object(
            "orders",
            vec![
                field("id", TypeRef::non_null(scalar("Int"))),
                field("total", scalar("Float")),
                field("status", scalar("String")),
            ],
        ),
    );

    types.insert(
        "orders_aggregate".to_owned(),
        object("orders_aggregate", vec![field("aggregate", object_ref("orders_aggregate_fields"))]),
    );

    types.insert(
        "Profile".to_owned(),
        object("Profile", vec![field("bio", scalar("String"))]),
    );

    for name in ["Int", "Float", "String"] {
        types.insert(
            name.to_owned(),
            NamedType {
                name: name.to_owned(),
                description: None,
                definition: TypeDefinition::Scalar,
            },
        );
    }

    Schema {
        query_type: Some("query_root".to_owned()),
        mutation_type: None,
        subscription_type: None,
        types,
    }
}
