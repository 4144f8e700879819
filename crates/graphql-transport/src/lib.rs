//! Network collaborator for tablegraph: executes GraphQL documents against a
//! remote endpoint and probes its health endpoint.
//!
//! The rest of the workspace consumes this through the [`Transport`] trait so
//! tests can substitute an in-memory endpoint.

mod client;
mod error;

pub use client::GraphqlClient;
pub use error::TransportError;

use std::future::Future;

/// Executes a GraphQL document with variables against an endpoint.
///
/// Implementations return the `data` value of a successful response. GraphQL
/// errors reported by the endpoint are surfaced as
/// [`TransportError::Graphql`], transport-level failures as
/// [`TransportError::Transport`].
pub trait Transport: Send + Sync + 'static {
    fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, TransportError>> + Send;
}
