//! The Borrow record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Book, Entity, EntityId, Member, compare};

/// A loan of one book to one member.
///
/// `member` and `book` are references; the embedded records are usually
/// minimal projections carrying only their identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    /// Store-assigned identity
    pub id: Option<EntityId>,

    /// When the book was lent out (required)
    pub borrow_date: Option<DateTime<Utc>>,

    /// When the book came back
    pub return_date: Option<DateTime<Utc>>,

    /// Borrowing member
    pub member: Option<Member>,

    /// Borrowed book
    pub book: Option<Book>,
}

impl Borrow {
    /// Sets the borrow date.
    pub fn with_borrow_date(mut self, borrow_date: DateTime<Utc>) -> Self {
        self.borrow_date = Some(borrow_date);
        self
    }

    /// Sets the return date.
    pub fn with_return_date(mut self, return_date: DateTime<Utc>) -> Self {
        self.return_date = Some(return_date);
        self
    }

    /// Sets the member reference.
    pub fn with_member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    /// Sets the book reference.
    pub fn with_book(mut self, book: Book) -> Self {
        self.book = Some(book);
        self
    }
}

impl Entity for Borrow {
    const KIND: &'static str = "borrow";

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

/// Identity comparison for borrow selection widgets.
pub fn compare_borrows(a: Option<&Borrow>, b: Option<&Borrow>) -> bool {
    compare(a, b)
}
