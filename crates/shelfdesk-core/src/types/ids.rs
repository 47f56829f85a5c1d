//! Store-assigned record identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a persisted record.
///
/// Assigned by the backing store on create and never changed afterwards.
/// A record that has not been saved yet carries no `EntityId` at all
/// (`Option<EntityId>::None`), rather than a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Creates an identity from its raw value.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfdesk_core::EntityId;
    ///
    /// let id = EntityId::new(17514);
    /// assert_eq!(id.get(), 17514);
    /// ```
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<EntityId> for i64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
