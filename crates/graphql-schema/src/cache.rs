//! The single-owner schema cache: Empty until the first successful
//! introspection fetch, Loaded for the rest of the process lifetime.

use std::sync::Arc;

use graphql_transport::Transport;
use tokio::sync::{Mutex, RwLock};

use crate::{introspection, Schema, SchemaError};

/// Owns the one in-process copy of the introspected schema.
///
/// The first `ensure_loaded` call fetches; concurrent first callers serialize
/// on the fetch mutex and observe the same stored `Arc<Schema>`. A failed
/// fetch stores nothing, so the next call retries from scratch. There is no
/// TTL: introspection is assumed stable for a long-running session.
pub struct SchemaCache<T> {
    transport: T,
    loaded: RwLock<Option<Arc<Schema>>>,
    fetch_lock: Mutex<()>,
}

impl<T: Transport> SchemaCache<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            loaded: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn ensure_loaded(&self) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.loaded.read().await.as_ref() {
            return Ok(schema.clone());
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have finished the fetch while we waited.
        if let Some(schema) = self.loaded.read().await.as_ref() {
            return Ok(schema.clone());
        }

        tracing::info!("schema cache empty, fetching via introspection");
        let schema = Arc::new(introspection::fetch_schema(&self.transport).await?);

        *self.loaded.write().await = Some(schema.clone());
        tracing::debug!(types = schema.types.len(), "schema cached");

        Ok(schema)
    }
}
