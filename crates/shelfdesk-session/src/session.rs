//! The edit session controller.
//!
//! An [`EditSession`] owns one form, its option collections, and a save-in-flight
//! flag. State lives in a `watch` channel: every write is a synchronous
//! `send_modify` that touches only its own slot, so option loads may complete
//! in any order and subscribers observe every change.

use futures::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use shelfdesk_core::{Entity, EntityId, EntityService, Error, Result};
use shelfdesk_forms::{
    BookFormAdapter, BorrowFormAdapter, FormAdapter, FormState, MemberFormAdapter,
};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::options::{BorrowOptionSources, NoOptions, OptionSources};

/// Lifecycle of an edit session.
///
/// `Idle → Loading → Ready → Saving → Saved`, with `Saving → Ready` when a
/// save fails. `Closed` is entered from any phase by [`EditSession::close`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SessionPhase {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// Record or options are being fetched
    Loading,
    /// Editable
    Ready,
    /// A save is in flight
    Saving,
    /// Saved; the caller should leave the edit view
    Saved,
    /// Ended by the caller
    Closed,
}

impl SessionPhase {
    /// Returns `true` if no further edits or saves are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved | Self::Closed)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Everything an edit view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState<R, F, O> {
    /// Current lifecycle phase
    pub phase: SessionPhase,
    /// The record being edited, `None` when creating
    pub record: Option<R>,
    /// The editable staging copy
    pub form: FormState<F>,
    /// One option list per reference field
    pub options: O,
    /// A save is in flight
    pub saving: bool,
}

impl<R, F: Default, O: Default> Default for SessionState<R, F, O> {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            record: None,
            form: FormState::default(),
            options: O::default(),
            saving: false,
        }
    }
}

/// The state type of an [`EditSession<A, S>`].
pub type StateOf<A, S> = SessionState<
    <A as FormAdapter>::Record,
    <A as FormAdapter>::Fields,
    <S as OptionSources<<A as FormAdapter>::Record>>::Options,
>;

/// Edit session for a book form.
pub type BookEditSession = EditSession<BookFormAdapter, NoOptions>;

/// Edit session for a member form.
pub type MemberEditSession = EditSession<MemberFormAdapter, NoOptions>;

/// Edit session for a borrow form with member and book choices.
pub type BorrowEditSession = EditSession<BorrowFormAdapter, BorrowOptionSources>;

/// Coordinates one edit view: loading, option collections, and saving.
///
/// Cloning yields another handle to the same session.
pub struct EditSession<A, S>
where
    A: FormAdapter,
    S: OptionSources<A::Record>,
{
    inner: Arc<Inner<A, S>>,
}

struct Inner<A, S>
where
    A: FormAdapter,
    S: OptionSources<A::Record>,
{
    adapter: A,
    service: Arc<dyn EntityService<A::Record>>,
    sources: S,
    state: watch::Sender<StateOf<A, S>>,
}

impl<A, S> Clone for EditSession<A, S>
where
    A: FormAdapter,
    S: OptionSources<A::Record>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: FormAdapter> EditSession<A, NoOptions> {
    /// Creates a session for a record kind without reference fields.
    pub fn without_options(adapter: A, service: Arc<dyn EntityService<A::Record>>) -> Self {
        Self::new(adapter, service, NoOptions)
    }
}

impl<A, S> EditSession<A, S>
where
    A: FormAdapter,
    S: OptionSources<A::Record>,
{
    /// Creates an idle session.
    pub fn new(adapter: A, service: Arc<dyn EntityService<A::Record>>, sources: S) -> Self {
        let (state, _) = watch::channel(StateOf::<A, S>::default());
        Self {
            inner: Arc::new(Inner {
                adapter,
                service,
                sources,
                state,
            }),
        }
    }

    /// Watches every state change.
    pub fn subscribe(&self) -> watch::Receiver<StateOf<A, S>> {
        self.inner.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> StateOf<A, S> {
        self.inner.state.borrow().clone()
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.inner.state.borrow().phase
    }

    /// Returns `true` while a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.inner.state.borrow().saving
    }

    /// The record being edited.
    pub fn record(&self) -> Option<A::Record> {
        self.inner.state.borrow().record.clone()
    }

    /// The current form state.
    pub fn form(&self) -> FormState<A::Fields> {
        self.inner.state.borrow().form.clone()
    }

    /// The current option collections.
    pub fn options(&self) -> S::Options {
        self.inner.state.borrow().options.clone()
    }

    /// Edits the form fields in place.
    pub fn update_form(&self, edit: impl FnOnce(&mut A::Fields)) -> Result<()> {
        let applied = self.inner.state.send_if_modified(|state| {
            if state.phase.is_terminal() {
                return false;
            }
            edit(&mut state.form.fields);
            true
        });
        if applied {
            Ok(())
        } else {
            Err(Error::SessionClosed)
        }
    }

    /// Returns `true` if every required field is filled.
    pub fn is_valid(&self) -> bool {
        self.inner
            .adapter
            .missing_required(&self.inner.state.borrow().form)
            .is_empty()
    }

    /// Fails with the first required field that is empty.
    pub fn validate(&self) -> Result<()> {
        self.inner.adapter.validate(&self.inner.state.borrow().form)
    }

    /// Starts editing `existing`, or a new record when `None`.
    ///
    /// The form and option seeds are written before any fetch starts. Every
    /// option load runs; the session becomes `Ready` once all succeed. On a
    /// load failure the first error is returned and the session stays
    /// `Loading` until [`reload_options`](Self::reload_options) succeeds.
    pub async fn initialize(&self, existing: Option<A::Record>) -> Result<()> {
        self.begin_loading()?;
        self.apply_record(existing);
        let loaded = self.load_options().await;
        self.finish_loading(loaded)
    }

    /// Fetches record `id` and starts editing it.
    ///
    /// The record and option fetches run concurrently; options that arrive
    /// first are re-seeded once the record is in.
    pub async fn open(&self, id: EntityId) -> Result<()> {
        self.begin_loading()?;
        let service = Arc::clone(&self.inner.service);
        let record = async move {
            let record = service.get(id).await?;
            self.apply_record(Some(record));
            Ok::<(), Error>(())
        };
        let (record, options) = futures::join!(record, self.load_options());
        self.finish_loading(record.and(options))
    }

    /// Re-runs every option load.
    pub async fn reload_options(&self) -> Result<()> {
        self.begin_loading()?;
        let loaded = self.load_options().await;
        self.finish_loading(loaded)
    }

    /// Ends the session. Results that arrive afterwards are discarded.
    pub fn close(&self) {
        self.inner.state.send_modify(|state| {
            state.phase = SessionPhase::Closed;
            state.saving = false;
        });
        info!(entity = A::Record::KIND, "Edit session closed");
    }

    /// Saves the form.
    ///
    /// The saving flag and `Saving` phase are set before this returns; the
    /// returned future performs the write. A form with identity is updated,
    /// one without is created. Success moves the session to `Saved` and
    /// yields the stored record. Failure moves it back to `Ready` with the
    /// form untouched and yields the collaborator's error. The flag is
    /// cleared however the future ends, including when it is dropped.
    ///
    /// Calling `save` again while a save is in flight is not prevented.
    pub fn save(&self) -> impl Future<Output = Result<A::Record>> + Send + use<A, S> {
        let started = self.begin_save();
        async move {
            let (mut guard, record) = started?;
            let service = Arc::clone(&guard.inner.service);
            let id = record.id();
            info!(entity = A::Record::KIND, id = ?id, "Saving record");

            let result = match id {
                Some(_) => service.update(record).await,
                None => service.create(record).await,
            };
            match &result {
                Ok(saved) => {
                    info!(entity = A::Record::KIND, id = ?saved.id(), "Record saved");
                    guard.saved = Some(saved.clone());
                }
                Err(err) => {
                    warn!(entity = A::Record::KIND, id = ?id, error = %err, "Save failed");
                }
            }
            result
        }
    }

    fn begin_loading(&self) -> Result<()> {
        let started = self.inner.state.send_if_modified(|state| {
            if state.phase == SessionPhase::Closed {
                return false;
            }
            state.phase = SessionPhase::Loading;
            true
        });
        if !started {
            return Err(Error::SessionClosed);
        }
        debug!(entity = A::Record::KIND, phase = %SessionPhase::Loading, "Loading");
        Ok(())
    }

    fn apply_record(&self, record: Option<A::Record>) {
        let inner = &self.inner;
        let applied = inner.state.send_if_modified(|state| {
            if state.phase == SessionPhase::Closed {
                return false;
            }
            inner.adapter.populate(&mut state.form, record.as_ref());
            inner.sources.seed(&mut state.options, record.as_ref());
            state.record = record;
            true
        });
        if !applied {
            debug!(entity = A::Record::KIND, "Discarded record after close");
        }
    }

    async fn load_options(&self) -> Result<()> {
        let mut pending: FuturesUnordered<_> = self
            .inner
            .sources
            .loads()
            .into_iter()
            .map(|load| {
                let field = load.field;
                load.future.map(move |result| (field, result))
            })
            .collect();

        let mut first_error = None;
        while let Some((field, result)) = pending.next().await {
            match result {
                Ok(apply) => {
                    let applied = self.inner.state.send_if_modified(|state| {
                        if state.phase == SessionPhase::Closed {
                            return false;
                        }
                        apply(&mut state.options, state.record.as_ref());
                        true
                    });
                    if applied {
                        debug!(entity = A::Record::KIND, field, "Options loaded");
                    }
                }
                Err(err) => {
                    warn!(entity = A::Record::KIND, field, error = %err, "Option load failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn finish_loading(&self, loaded: Result<()>) -> Result<()> {
        if self.phase() == SessionPhase::Closed {
            return Ok(());
        }
        loaded?;
        let ready = self.inner.state.send_if_modified(|state| {
            if state.phase != SessionPhase::Loading {
                return false;
            }
            state.phase = SessionPhase::Ready;
            true
        });
        if ready {
            info!(
                entity = A::Record::KIND,
                id = ?self.inner.state.borrow().form.id(),
                phase = %SessionPhase::Ready,
                "Edit session ready"
            );
        }
        Ok(())
    }

    fn begin_save(&self) -> Result<(SaveGuard<A, S>, A::Record)> {
        let inner = &self.inner;
        let mut record = None;
        inner.state.send_if_modified(|state| {
            if state.phase.is_terminal() {
                return false;
            }
            if state.saving {
                warn!(entity = A::Record::KIND, "Save requested while a save is in flight");
            }
            state.saving = true;
            state.phase = SessionPhase::Saving;
            record = Some(inner.adapter.from_form_state(&state.form));
            true
        });
        let record = record.ok_or(Error::SessionClosed)?;
        let guard = SaveGuard {
            inner: Arc::clone(inner),
            saved: None,
        };
        Ok((guard, record))
    }
}

/// Clears the saving flag when a save ends, however it ends.
struct SaveGuard<A, S>
where
    A: FormAdapter,
    S: OptionSources<A::Record>,
{
    inner: Arc<Inner<A, S>>,
    saved: Option<A::Record>,
}

impl<A, S> Drop for SaveGuard<A, S>
where
    A: FormAdapter,
    S: OptionSources<A::Record>,
{
    fn drop(&mut self) {
        let saved = self.saved.take();
        self.inner.state.send_if_modified(|state| {
            if state.phase == SessionPhase::Closed {
                return false;
            }
            state.saving = false;
            if state.phase == SessionPhase::Saving {
                match saved {
                    Some(record) => {
                        state.record = Some(record);
                        state.phase = SessionPhase::Saved;
                    }
                    None => state.phase = SessionPhase::Ready,
                }
            }
            true
        });
    }
}
