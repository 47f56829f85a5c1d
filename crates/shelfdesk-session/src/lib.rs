#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shelfdesk Session Library
//!
//! Edit sessions, option collections, and runtime configuration.

pub mod config;
pub mod options;
pub mod seed;
pub mod session;

pub use config::ShelfdeskConfig;
pub use options::{
    ApplyOptions, BorrowOptionSources, BorrowOptions, NoOptions, OptionLoad, OptionSources,
};
pub use seed::{SeedData, Stores};
pub use session::{
    BookEditSession, BorrowEditSession, EditSession, MemberEditSession, SessionPhase,
    SessionState, StateOf,
};
