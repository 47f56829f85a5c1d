//! Initial store contents.

use serde::{Deserialize, Serialize};
use shelfdesk_core::{Book, Borrow, EntityId, InMemoryService, Member, Result};
use std::path::Path;
use std::sync::Arc;

/// Records to seed the in-memory stores with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    /// Books
    pub books: Vec<Book>,
    /// Members
    pub members: Vec<Member>,
    /// Borrows
    pub borrows: Vec<Borrow>,
}

/// One in-memory store per record kind.
#[derive(Clone)]
pub struct Stores {
    /// Book store
    pub books: Arc<InMemoryService<Book>>,
    /// Member store
    pub members: Arc<InMemoryService<Member>>,
    /// Borrow store
    pub borrows: Arc<InMemoryService<Borrow>>,
}

impl SeedData {
    /// Reads seed data from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// A small catalogue with one open borrow.
    pub fn sample() -> Self {
        let book = Book::new("The Left Hand of Darkness", "Ursula K. Le Guin")
            .with_published_year(1969)
            .with_price(12.5)
            .with_available(false);
        let book = Book {
            id: Some(EntityId::new(32624)),
            ..book
        };
        let member = Member {
            id: Some(EntityId::new(17514)),
            ..Member::default()
                .with_name("Ada Byron")
                .with_email("ada@example.org")
        };
        let borrow = Borrow {
            id: Some(EntityId::new(23587)),
            ..Borrow::default()
                .with_member(member.clone())
                .with_book(book.clone())
        };
        Self {
            books: vec![
                book,
                Book::new("Kindred", "Octavia E. Butler").with_available(true),
            ],
            members: vec![member],
            borrows: vec![borrow],
        }
    }

    /// Builds stores holding these records.
    pub fn into_stores(self) -> Stores {
        Stores {
            books: Arc::new(InMemoryService::with_records(self.books)),
            members: Arc::new(InMemoryService::with_records(self.members)),
            borrows: Arc::new(InMemoryService::with_records(self.borrows)),
        }
    }
}
