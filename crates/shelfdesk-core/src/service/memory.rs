//! In-memory entity store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{EntityService, QueryParams, SortDirection};
use crate::error::{Error, Result};
use crate::types::{Entity, EntityId};

/// A [`EntityService`] backed by an ordered map.
///
/// Identities are assigned sequentially on create, starting after the
/// highest identity seeded. `list` orders by identity; an `id` sort key
/// controls the direction, other sort keys are ignored.
pub struct InMemoryService<E> {
    inner: RwLock<Store<E>>,
}

struct Store<E> {
    records: BTreeMap<EntityId, E>,
    next_id: i64,
}

impl<E: Entity> InMemoryService<E> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store holding `records`.
    ///
    /// Records without identity are assigned one, in iteration order.
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let records: Vec<E> = records.into_iter().collect();
        let max = records
            .iter()
            .filter_map(|r| r.id().map(|id| id.get()))
            .max()
            .unwrap_or(0);
        let mut store = Store {
            records: BTreeMap::new(),
            next_id: max + 1,
        };
        for record in records {
            let record = match record.id() {
                Some(_) => record,
                None => {
                    let id = EntityId::new(store.next_id);
                    store.next_id += 1;
                    record.assigned(id)
                }
            };
            if let Some(id) = record.id() {
                store.records.insert(id, record);
            }
        }
        Self {
            inner: RwLock::new(store),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

impl<E: Entity> Default for InMemoryService<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for InMemoryService<E> {
    async fn list(&self, query: &QueryParams) -> Result<Vec<E>> {
        let store = self.inner.read().await;
        let descending = match query.sort.first() {
            Some(order) if order.field == "id" => order.direction == SortDirection::Desc,
            Some(order) => {
                tracing::debug!(entity = E::KIND, field = %order.field, "Ignoring unsupported sort key");
                false
            }
            None => false,
        };

        let ordered: Box<dyn Iterator<Item = &E> + Send> = if descending {
            Box::new(store.records.values().rev())
        } else {
            Box::new(store.records.values())
        };

        let page = match query.size {
            Some(size) => {
                let size = size as usize;
                let skip = query.page.unwrap_or(0) as usize * size;
                ordered.skip(skip).take(size).cloned().collect()
            }
            None => ordered.cloned().collect(),
        };
        Ok(page)
    }

    async fn get(&self, id: EntityId) -> Result<E> {
        self.inner
            .read()
            .await
            .records
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound {
                entity: E::KIND,
                id,
            })
    }

    async fn create(&self, record: E) -> Result<E> {
        if record.id().is_some() {
            return Err(Error::validation_field(
                "id",
                format!("A new {} cannot already have an ID", E::KIND),
            ));
        }
        let mut store = self.inner.write().await;
        let id = EntityId::new(store.next_id);
        store.next_id += 1;
        let record = record.assigned(id);
        store.records.insert(id, record.clone());
        tracing::debug!(entity = E::KIND, %id, "Created record");
        Ok(record)
    }

    async fn update(&self, record: E) -> Result<E> {
        let id = record
            .id()
            .ok_or_else(|| Error::validation_field("id", "Invalid id"))?;
        let mut store = self.inner.write().await;
        match store.records.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                tracing::debug!(entity = E::KIND, %id, "Updated record");
                Ok(record)
            }
            None => Err(Error::NotFound {
                entity: E::KIND,
                id,
            }),
        }
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        self.inner.write().await.records.remove(&id);
        Ok(())
    }
}
