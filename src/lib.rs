//! famtree: hierarchical family-tree record manager
//!
//! A family document owns a forest of member nodes. The pure tree core lives
//! in [`domain::forest`]; [`application::services::FamilyService`] runs one
//! core operation per storage round-trip against a [`infrastructure::FamilyStore`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
