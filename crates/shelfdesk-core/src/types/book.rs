//! The Book record.

use serde::{Deserialize, Serialize};

use crate::types::{Entity, EntityId, compare};

/// A book in the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identity
    pub id: Option<EntityId>,

    /// Title (required)
    pub title: Option<String>,

    /// Author (required)
    pub author: Option<String>,

    /// Year of publication
    pub published_year: Option<i32>,

    /// List price
    pub price: Option<f64>,

    /// Whether the book can currently be borrowed
    pub available: Option<bool>,
}

impl Book {
    /// Creates a new, unsaved book with its required fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Self::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the publication year.
    pub fn with_published_year(mut self, year: i32) -> Self {
        self.published_year = Some(year);
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }
}

impl Entity for Book {
    const KIND: &'static str = "book";

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

/// Identity comparison for book selection widgets.
pub fn compare_books(a: Option<&Book>, b: Option<&Book>) -> bool {
    compare(a, b)
}
