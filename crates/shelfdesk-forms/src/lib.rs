#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shelfdesk Forms Library
//!
//! Form state and per-entity adapters.

pub mod adapter;
pub mod book;
pub mod borrow;
pub mod form;
pub mod member;

mod proptests;

pub use adapter::FormAdapter;
pub use book::{BookFields, BookFormAdapter};
pub use borrow::{BorrowFields, BorrowFormAdapter};
pub use form::FormState;
pub use member::{MemberFields, MemberFormAdapter};
