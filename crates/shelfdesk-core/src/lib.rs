#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shelfdesk Core Library
//!
//! Records, codecs, and collaborator contracts shared by the form and session crates.

pub mod error;
pub mod reconcile;
pub mod service;
pub mod temporal;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use reconcile::{reconcile, reconcile_all};
pub use service::{
    EntityService, InMemoryService, QueryParams, SortDirection, SortOrder, TimeoutService,
};
pub use temporal::{DATE_FORMAT, DATE_TIME_FORMAT, DateTimeFormat};
pub use types::{
    Book, Borrow, Entity, EntityId, Member, compare, compare_books, compare_borrows,
    compare_members,
};
