//! Deadline wrapper for any entity service.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::{EntityService, QueryParams};
use crate::error::{Error, Result};
use crate::types::{Entity, EntityId};

/// Wraps an [`EntityService`] so every call fails with [`Error::Timeout`]
/// once `timeout` elapses.
pub struct TimeoutService<E> {
    inner: Arc<dyn EntityService<E>>,
    timeout: Duration,
}

impl<E: Entity> TimeoutService<E> {
    /// Creates a wrapper around `inner`.
    pub fn new(inner: Arc<dyn EntityService<E>>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>> + Send) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    entity = E::KIND,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Service call timed out"
                );
                Err(Error::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for TimeoutService<E> {
    async fn list(&self, query: &QueryParams) -> Result<Vec<E>> {
        self.bounded(self.inner.list(query)).await
    }

    async fn get(&self, id: EntityId) -> Result<E> {
        self.bounded(self.inner.get(id)).await
    }

    async fn create(&self, record: E) -> Result<E> {
        self.bounded(self.inner.create(record)).await
    }

    async fn update(&self, record: E) -> Result<E> {
        self.bounded(self.inner.update(record)).await
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        self.bounded(self.inner.delete(id)).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
