//! LITREALM: story discovery, co-writing and narration state for the
//! LITREALM reader.
//!
//! Holds the catalog search/filter, the themed suggestion selector, and the
//! per-view sessions (explorer, co-writer, narration player, dashboard) that
//! a presentation layer drives. Rendering lives elsewhere.

pub mod core;
pub mod schema;

pub use crate::core::engine::{Litrealm, LitrealmBuilder, LitrealmError};
