//! Borrow form.

use chrono::{DateTime, Utc};
use shelfdesk_core::temporal::{decode, encode};
use shelfdesk_core::{Book, Borrow, DateTimeFormat, Member};

use crate::adapter::{FormAdapter, is_blank};
use crate::form::FormState;

/// Editable fields of a borrow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorrowFields {
    /// Borrow date as a form string (required)
    pub borrow_date: Option<String>,
    /// Return date as a form string
    pub return_date: Option<String>,
    /// Selected member
    pub member: Option<Member>,
    /// Selected book
    pub book: Option<Book>,
}

/// Adapter for [`Borrow`].
///
/// New borrows default both dates to now.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorrowFormAdapter {
    format: DateTimeFormat,
}

impl BorrowFormAdapter {
    /// Creates the adapter with the minute-precision date-time format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `format` for both dates.
    pub fn with_format(mut self, format: DateTimeFormat) -> Self {
        self.format = format;
        self
    }
}

impl FormAdapter for BorrowFormAdapter {
    type Record = Borrow;
    type Fields = BorrowFields;

    fn defaults_at(&self, now: DateTime<Utc>) -> Borrow {
        Borrow {
            borrow_date: Some(now),
            return_date: Some(now),
            ..Borrow::default()
        }
    }

    fn to_form_state(&self, record: &Borrow) -> FormState<BorrowFields> {
        FormState::new(
            record.id,
            BorrowFields {
                borrow_date: encode(record.borrow_date.as_ref(), self.format),
                return_date: encode(record.return_date.as_ref(), self.format),
                member: record.member.clone(),
                book: record.book.clone(),
            },
        )
    }

    fn from_form_state(&self, form: &FormState<BorrowFields>) -> Borrow {
        let fields = &form.fields;
        Borrow {
            id: form.id(),
            borrow_date: decode(fields.borrow_date.as_deref(), self.format),
            return_date: decode(fields.return_date.as_deref(), self.format),
            member: fields.member.clone(),
            book: fields.book.clone(),
        }
    }

    fn fill_missing(&self, input: Borrow, defaults: Borrow) -> Borrow {
        Borrow {
            id: input.id,
            borrow_date: input.borrow_date.or(defaults.borrow_date),
            return_date: input.return_date.or(defaults.return_date),
            member: input.member.or(defaults.member),
            book: input.book.or(defaults.book),
        }
    }

    fn missing_required(&self, form: &FormState<BorrowFields>) -> Vec<&'static str> {
        if is_blank(form.fields.borrow_date.as_deref()) {
            vec!["borrowDate"]
        } else {
            Vec::new()
        }
    }
}
