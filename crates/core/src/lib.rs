//! Core domain logic for the go-link directory.
//!
//! Everything in this crate is pure: link validation, name resolution, and
//! prefix grouping operate on in-memory values and know nothing about
//! Slack, HTTP, or the backing store. The storage and transport crates
//! depend on this one, never the other way around.
//!
//! # Key Types
//!
//! - `Link` - a stored name→URL pair
//! - `Resolution` - outcome of looking a name up (exact, group, not found)
//! - `LinkError` - user-facing failures with their canonical wording
//! - `AppConfig` - layered configuration (file, env, overrides)

pub mod config;
pub mod domain;
pub mod errors;
pub mod resolve;
pub mod validate;

pub use domain::link::{group_prefix, Link};
pub use errors::LinkError;
pub use resolve::{group_links, group_matches, resolve, LinkGroup, Resolution, UNGROUPED};
pub use validate::{parse_name_and_url, validate_command_prefix, validate_url};
