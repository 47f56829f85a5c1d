//! Option collections for reference fields.
//!
//! Each reference field of a record kind has its own option list, fetched
//! with its own `list` call. [`OptionSources`] describes those calls for one
//! kind; the session runs them concurrently and applies each result to its
//! own slot as it arrives.

use futures::FutureExt;
use futures::future::BoxFuture;
use shelfdesk_core::{
    Book, Borrow, Entity, EntityService, Member, QueryParams, Result, reconcile,
};
use std::fmt::Debug;
use std::future::Future;
use std::mem;
use std::sync::Arc;

/// Writes a fetched page into its slot, reconciled against the record's
/// current reference (`None` while creating).
pub type ApplyOptions<R, O> = Box<dyn FnOnce(&mut O, Option<&R>) + Send>;

/// One in-flight option fetch.
pub struct OptionLoad<R, O> {
    /// Reference field the load fills
    pub field: &'static str,
    /// The fetch, resolving to the slot write
    pub future: BoxFuture<'static, Result<ApplyOptions<R, O>>>,
}

impl<R, O> OptionLoad<R, O> {
    /// Creates a load for `field`.
    pub fn new<F>(field: &'static str, future: F) -> Self
    where
        F: Future<Output = Result<ApplyOptions<R, O>>> + Send + 'static,
    {
        Self {
            field,
            future: future.boxed(),
        }
    }
}

/// The option fetches for one record kind.
pub trait OptionSources<R: Entity>: Send + Sync + 'static {
    /// One slot per reference field.
    type Options: Clone + Debug + Default + Send + Sync + 'static;

    /// Makes the record's current references selectable in `options`.
    ///
    /// Called whenever the session's record is set, before or after any
    /// fetch has completed.
    fn seed(&self, options: &mut Self::Options, record: Option<&R>);

    /// Starts every option fetch. Called regardless of whether a record is
    /// being edited.
    fn loads(&self) -> Vec<OptionLoad<R, Self::Options>>;
}

/// Sources for record kinds without reference fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOptions;

impl<R: Entity> OptionSources<R> for NoOptions {
    type Options = ();

    fn seed(&self, _options: &mut (), _record: Option<&R>) {}

    fn loads(&self) -> Vec<OptionLoad<R, ()>> {
        Vec::new()
    }
}

/// Selectable members and books for a borrow form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorrowOptions {
    /// Member choices
    pub members: Vec<Member>,
    /// Book choices
    pub books: Vec<Book>,
}

/// Member and book fetches for a borrow form.
#[derive(Clone)]
pub struct BorrowOptionSources {
    members: Arc<dyn EntityService<Member>>,
    books: Arc<dyn EntityService<Book>>,
    query: QueryParams,
}

impl BorrowOptionSources {
    /// Creates sources listing the store's default page.
    pub fn new(members: Arc<dyn EntityService<Member>>, books: Arc<dyn EntityService<Book>>) -> Self {
        Self {
            members,
            books,
            query: QueryParams::default(),
        }
    }

    /// Uses `query` for both option fetches.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

fn current_member(record: Option<&Borrow>) -> Option<&Member> {
    record.and_then(|borrow| borrow.member.as_ref())
}

fn current_book(record: Option<&Borrow>) -> Option<&Book> {
    record.and_then(|borrow| borrow.book.as_ref())
}

impl OptionSources<Borrow> for BorrowOptionSources {
    type Options = BorrowOptions;

    fn seed(&self, options: &mut BorrowOptions, record: Option<&Borrow>) {
        options.members = reconcile(mem::take(&mut options.members), current_member(record));
        options.books = reconcile(mem::take(&mut options.books), current_book(record));
    }

    fn loads(&self) -> Vec<OptionLoad<Borrow, BorrowOptions>> {
        let members = Arc::clone(&self.members);
        let member_query = self.query.clone();
        let books = Arc::clone(&self.books);
        let book_query = self.query.clone();

        vec![
            OptionLoad::new("members", async move {
                let fetched = members.list(&member_query).await?;
                let apply: ApplyOptions<Borrow, BorrowOptions> =
                    Box::new(move |options: &mut BorrowOptions, record: Option<&Borrow>| {
                        options.members = reconcile(fetched, current_member(record));
                    });
                Ok(apply)
            }),
            OptionLoad::new("books", async move {
                let fetched = books.list(&book_query).await?;
                let apply: ApplyOptions<Borrow, BorrowOptions> =
                    Box::new(move |options: &mut BorrowOptions, record: Option<&Borrow>| {
                        options.books = reconcile(fetched, current_book(record));
                    });
                Ok(apply)
            }),
        ]
    }
}
