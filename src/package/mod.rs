//! OOXML container access.
//!
//! A [`Package`] holds every entry of a ZIP container in memory, keyed by its
//! part path. Lookups never fail: a missing part is `None` (or an empty list)
//! and the caller decides what an absent part means. Only a buffer that is not
//! a readable archive at all is an error ([`crate::Error::CorruptContainer`]).

mod archive;
mod relationships;

pub use archive::Package;
pub use relationships::{resolve_target, Relationship, Relationships};
