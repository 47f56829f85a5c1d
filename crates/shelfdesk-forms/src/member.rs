//! Member form.

use chrono::{DateTime, Utc};
use shelfdesk_core::temporal::{decode, encode};
use shelfdesk_core::{DateTimeFormat, Member};

use crate::adapter::{FormAdapter, is_blank};
use crate::form::FormState;

/// Editable fields of a member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFields {
    /// Display name (required)
    pub name: Option<String>,
    /// Contact email (required)
    pub email: Option<String>,
    /// Join date as a form string (required)
    pub join_date: Option<String>,
}

/// Adapter for [`Member`].
///
/// New members default their join date to now.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberFormAdapter {
    format: DateTimeFormat,
}

impl MemberFormAdapter {
    /// Creates the adapter with the minute-precision date-time format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `format` for the join date.
    pub fn with_format(mut self, format: DateTimeFormat) -> Self {
        self.format = format;
        self
    }
}

impl FormAdapter for MemberFormAdapter {
    type Record = Member;
    type Fields = MemberFields;

    fn defaults_at(&self, now: DateTime<Utc>) -> Member {
        Member {
            join_date: Some(now),
            ..Member::default()
        }
    }

    fn to_form_state(&self, record: &Member) -> FormState<MemberFields> {
        FormState::new(
            record.id,
            MemberFields {
                name: record.name.clone(),
                email: record.email.clone(),
                join_date: encode(record.join_date.as_ref(), self.format),
            },
        )
    }

    fn from_form_state(&self, form: &FormState<MemberFields>) -> Member {
        let fields = &form.fields;
        Member {
            id: form.id(),
            name: fields.name.clone(),
            email: fields.email.clone(),
            join_date: decode(fields.join_date.as_deref(), self.format),
        }
    }

    fn fill_missing(&self, input: Member, defaults: Member) -> Member {
        Member {
            id: input.id,
            name: input.name.or(defaults.name),
            email: input.email.or(defaults.email),
            join_date: input.join_date.or(defaults.join_date),
        }
    }

    fn missing_required(&self, form: &FormState<MemberFields>) -> Vec<&'static str> {
        let fields = &form.fields;
        [
            ("name", fields.name.as_deref()),
            ("email", fields.email.as_deref()),
            ("joinDate", fields.join_date.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(field, _)| field)
        .collect()
    }
}
