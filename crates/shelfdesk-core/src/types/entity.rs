//! The trait every editable record implements.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::types::EntityId;

/// A persisted record kind (Book, Member, Borrow).
pub trait Entity:
    Clone + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Lowercase kind name used in logs and error messages.
    const KIND: &'static str;

    /// Store-assigned identity, `None` while the record is new.
    fn id(&self) -> Option<EntityId>;

    /// A minimal projection carrying only the identity, as embedded
    /// in another record's reference field.
    fn reference(id: EntityId) -> Self;

    /// Returns the record with the identity the store assigned on create.
    fn assigned(self, id: EntityId) -> Self;

    /// Returns `true` if the record has not been persisted yet.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

/// Identity-based, null-safe equality used by selection widgets.
///
/// Two present records are equal when their identities are equal, no matter
/// how their other fields differ. `None` equals `None` and never equals a
/// present record.
pub fn compare<E: Entity>(a: Option<&E>, b: Option<&E>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.id() == b.id(),
        (None, None) => true,
        _ => false,
    }
}
