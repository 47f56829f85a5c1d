//! Core record types for Shelfdesk.

mod book;
mod borrow;
mod entity;
mod ids;
mod member;
mod proptests;

pub use book::{Book, compare_books};
pub use borrow::{Borrow, compare_borrows};
pub use entity::{Entity, compare};
pub use ids::EntityId;
pub use member::{Member, compare_members};
