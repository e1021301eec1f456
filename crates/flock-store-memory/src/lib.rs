//! In-memory backend for the Flock site store.
//!
//! The collection lives behind a lock that is held only long enough to swap
//! in a new [`flock_core::site::Sites`] value; readers get a cheap snapshot.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
