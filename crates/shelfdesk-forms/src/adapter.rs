//! The record/form adapter trait.

use chrono::{DateTime, Utc};
use shelfdesk_core::{Entity, Error, Result};
use std::fmt::Debug;

use crate::form::FormState;

/// Stateless conversion between a record and its editable form.
///
/// Implementors provide the per-kind pieces (`defaults_at`, the two
/// conversions, `fill_missing`, `missing_required`); population and
/// validation are shared.
pub trait FormAdapter: Send + Sync + 'static {
    /// The record kind being edited.
    type Record: Entity;

    /// The editable field set.
    type Fields: Clone + Debug + PartialEq + Default + Send + Sync + 'static;

    /// A new record carrying the defaults for `now`: no identity, and the
    /// current instant in timestamp fields that have a default.
    fn defaults_at(&self, now: DateTime<Utc>) -> Self::Record;

    /// Encodes temporal fields and copies everything else, identity included.
    fn to_form_state(&self, record: &Self::Record) -> FormState<Self::Fields>;

    /// Decodes temporal fields and copies everything else, identity included.
    ///
    /// Unreadable temporal strings become `None`.
    fn from_form_state(&self, form: &FormState<Self::Fields>) -> Self::Record;

    /// Fills every field `input` leaves unset from `defaults`.
    fn fill_missing(&self, input: Self::Record, defaults: Self::Record) -> Self::Record;

    /// Wire names of required fields that are empty in `form`.
    fn missing_required(&self, form: &FormState<Self::Fields>) -> Vec<&'static str>;

    /// [`defaults_at`](Self::defaults_at) for the current instant.
    fn defaults(&self) -> Self::Record {
        self.defaults_at(Utc::now())
    }

    /// Merges the defaults with `input`, `input` winning where both have a value.
    ///
    /// A persisted input (identity present) carries every field, including
    /// the ones it leaves empty, so it is taken as is. A new input only
    /// overrides the defaults it actually sets.
    fn merge_defaults(&self, input: Option<&Self::Record>, now: DateTime<Utc>) -> Self::Record {
        let defaults = self.defaults_at(now);
        match input {
            None => defaults,
            Some(record) if record.id().is_some() => record.clone(),
            Some(record) => self.fill_missing(record.clone(), defaults),
        }
    }

    /// Resets `form` from the merged defaults and `input`.
    fn populate_at(
        &self,
        form: &mut FormState<Self::Fields>,
        input: Option<&Self::Record>,
        now: DateTime<Utc>,
    ) {
        *form = self.to_form_state(&self.merge_defaults(input, now));
        tracing::debug!(
            entity = <Self::Record as Entity>::KIND,
            id = ?form.id(),
            "Populated form"
        );
    }

    /// [`populate_at`](Self::populate_at) for the current instant.
    fn populate(&self, form: &mut FormState<Self::Fields>, input: Option<&Self::Record>) {
        self.populate_at(form, input, Utc::now());
    }

    /// Builds a fresh form state for `input`, or for a new record.
    fn create_form_state(&self, input: Option<&Self::Record>) -> FormState<Self::Fields> {
        let mut form = FormState::default();
        self.populate(&mut form, input);
        form
    }

    /// Fails with the first required field that is empty.
    fn validate(&self, form: &FormState<Self::Fields>) -> Result<()> {
        match self.missing_required(form).first() {
            Some(field) => Err(Error::validation_field(*field, "This field is required.")),
            None => Ok(()),
        }
    }
}

/// Treats `None` and blank strings as empty.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}
