//! The introspection core of tablegraph: fetches and caches a remote GraphQL
//! schema, walks its type graph, and synthesizes ad-hoc query documents from
//! schema metadata alone.

mod cache;
mod index;
mod introspection;
mod model;
mod synth;
#[cfg(test)]
mod test_support;
mod wrapping;

pub use cache::SchemaCache;
pub use index::{RootFieldSummary, TableEntry};
pub use introspection::{fetch_schema, INTROSPECTION_QUERY};
pub use model::{
    EnumValue, Field, InputValue, NamedType, OperationKind, Schema, TypeDefinition, TypeKind,
    TypeRef,
};
pub use synth::{
    aggregate_query, preview_query, shape_table_description, table_description_query,
    AggregateFunction, QueryDocument, PREVIEW_FALLBACK_FIELD,
};

use graphql_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// the introspection fetch failed; the cache stays empty so the next call retries
    #[error("schema unavailable: {0}")]
    Fetch(#[source] TransportError),
    /// introspection succeeded but the result violates the introspection contract
    #[error("schema integrity error: {0}")]
    SchemaIntegrity(String),
    /// a named type has no entry in the schema's type map
    #[error("type '{0}' not found in the schema")]
    TypeNotFound(String),
    /// a table name resolved to no type, even after the capitalization retry
    #[error("table '{0}' not found")]
    TableNotFound(String),
    /// a caller-supplied argument violates a documented precondition
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
