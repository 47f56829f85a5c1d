//! Option-collection reconciliation for reference fields.
//!
//! A reference field's select list comes from a fresh `list` call, but the
//! record being edited may point at an entity that is missing from that page
//! (filtered out, paged away, or deleted since). Reconciling prepends such a
//! reference so the current selection stays selectable.
//!
//! Membership is decided by identity only. When the fetched page already
//! holds the referenced identity, the fetched copy is kept, since it is the
//! fresher one for display.

use std::collections::HashSet;

use crate::types::{Entity, EntityId};

/// Reconciles a fetched option page with the record's current reference.
///
/// - `current` is `None`: `fetched` is returned unchanged.
/// - `current`'s identity already appears in `fetched`: unchanged.
/// - otherwise: `current` is prepended.
///
/// # Examples
///
/// ```
/// use shelfdesk_core::{Entity, EntityId, Member, reconcile};
///
/// let current = Member::reference(EntityId::new(17514));
/// let fetched = vec![Member::reference(EntityId::new(999))];
/// let options = reconcile(fetched, Some(&current));
/// let ids: Vec<_> = options.iter().map(|m| m.id()).collect();
/// assert_eq!(ids, vec![Some(EntityId::new(17514)), Some(EntityId::new(999))]);
/// ```
pub fn reconcile<E: Entity>(fetched: Vec<E>, current: Option<&E>) -> Vec<E> {
    reconcile_all(fetched, [current])
}

/// Reconciles a fetched option page with several candidate references.
///
/// `None` candidates are skipped. Each candidate whose identity is neither in
/// `fetched` nor in an earlier candidate is kept; the kept candidates are
/// prepended in their given order.
pub fn reconcile_all<'a, E, I>(fetched: Vec<E>, candidates: I) -> Vec<E>
where
    E: Entity,
    I: IntoIterator<Item = Option<&'a E>>,
{
    let mut seen: HashSet<Option<EntityId>> = fetched.iter().map(Entity::id).collect();
    let missing: Vec<E> = candidates
        .into_iter()
        .flatten()
        .filter(|candidate| seen.insert(candidate.id()))
        .cloned()
        .collect();

    if missing.is_empty() {
        return fetched;
    }

    tracing::debug!(
        entity = E::KIND,
        added = missing.len(),
        fetched = fetched.len(),
        "Prepending referenced options missing from fetched page"
    );

    missing.into_iter().chain(fetched).collect()
}
