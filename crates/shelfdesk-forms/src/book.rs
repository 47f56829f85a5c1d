//! Book form.

use chrono::{DateTime, Utc};
use shelfdesk_core::Book;

use crate::adapter::{FormAdapter, is_blank};
use crate::form::FormState;

/// Editable fields of a book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFields {
    /// Title (required)
    pub title: Option<String>,
    /// Author (required)
    pub author: Option<String>,
    /// Year of publication
    pub published_year: Option<i32>,
    /// List price
    pub price: Option<f64>,
    /// Availability
    pub available: Option<bool>,
}

/// Adapter for [`Book`]. Books have no temporal fields, so the form mirrors the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookFormAdapter;

impl BookFormAdapter {
    /// Creates the adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FormAdapter for BookFormAdapter {
    type Record = Book;
    type Fields = BookFields;

    fn defaults_at(&self, _now: DateTime<Utc>) -> Book {
        Book::default()
    }

    fn to_form_state(&self, record: &Book) -> FormState<BookFields> {
        FormState::new(
            record.id,
            BookFields {
                title: record.title.clone(),
                author: record.author.clone(),
                published_year: record.published_year,
                price: record.price,
                available: record.available,
            },
        )
    }

    fn from_form_state(&self, form: &FormState<BookFields>) -> Book {
        let fields = &form.fields;
        Book {
            id: form.id(),
            title: fields.title.clone(),
            author: fields.author.clone(),
            published_year: fields.published_year,
            price: fields.price,
            available: fields.available,
        }
    }

    fn fill_missing(&self, input: Book, defaults: Book) -> Book {
        Book {
            id: input.id,
            title: input.title.or(defaults.title),
            author: input.author.or(defaults.author),
            published_year: input.published_year.or(defaults.published_year),
            price: input.price.or(defaults.price),
            available: input.available.or(defaults.available),
        }
    }

    fn missing_required(&self, form: &FormState<BookFields>) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(form.fields.title.as_deref()) {
            missing.push("title");
        }
        if is_blank(form.fields.author.as_deref()) {
            missing.push("author");
        }
        missing
    }
}
