//! The Member record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Entity, EntityId, compare};

/// A library member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Store-assigned identity
    pub id: Option<EntityId>,

    /// Display name (required)
    pub name: Option<String>,

    /// Contact email (required)
    pub email: Option<String>,

    /// When the member joined (required)
    pub join_date: Option<DateTime<Utc>>,
}

impl Member {
    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the join date.
    pub fn with_join_date(mut self, join_date: DateTime<Utc>) -> Self {
        self.join_date = Some(join_date);
        self
    }
}

impl Entity for Member {
    const KIND: &'static str = "member";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    fn assigned(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Identity comparison for member selection widgets.
pub fn compare_members(a: Option<&Member>, b: Option<&Member>) -> bool {
    compare(a, b)
}
