//! The per-record-kind collaborator the edit layer reads from and saves through.
//!
//! Transport is out of this crate's hands: an HTTP client, a test double, or
//! [`InMemoryService`] all satisfy [`EntityService`].

mod memory;
mod query;
mod timeout;

pub use memory::InMemoryService;
pub use query::{QueryParams, SortDirection, SortOrder};
pub use timeout::TimeoutService;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Entity, EntityId};

/// CRUD operations for one record kind.
///
/// # Contract
///
/// - `create` receives a record without identity and returns it with the
///   identity the store assigned.
/// - `update` receives a record with identity.
/// - Failures are returned as [`Error`](crate::Error) and are passed through
///   the edit layer untouched.
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    /// Fetch a page of records, e.g. to fill a reference field's options.
    async fn list(&self, query: &QueryParams) -> Result<Vec<E>>;

    /// Fetch a single record.
    async fn get(&self, id: EntityId) -> Result<E>;

    /// Persist a new record.
    async fn create(&self, record: E) -> Result<E>;

    /// Persist changes to an existing record.
    async fn update(&self, record: E) -> Result<E>;

    /// Remove a record.
    async fn delete(&self, id: EntityId) -> Result<()>;

    /// Get the service name for diagnostics.
    fn name(&self) -> &str {
        E::KIND
    }
}
