//! Editable form state.

use shelfdesk_core::EntityId;

/// The staging copy of a record while it is being edited.
///
/// The identity is fixed when the state is built and can only be read;
/// everything the user may change lives in `fields`. A state built for a
/// new record has no identity, and saving it creates a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    id: Option<EntityId>,

    /// Editable fields
    pub fields: F,
}

impl<F> FormState<F> {
    /// Creates a form state.
    pub fn new(id: Option<EntityId>, fields: F) -> Self {
        Self { id, fields }
    }

    /// The identity of the record being edited, `None` when creating.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Returns `true` if saving this state creates a record.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl<F: Default> Default for FormState<F> {
    fn default() -> Self {
        Self::new(None, F::default())
    }
}
