//! Core types and pure logic for the Flock agency dashboard.
//!
//! This crate has no I/O. Storage backends implement [`store::SiteStore`];
//! presentation layers feed a [`view::ViewState`] and the current
//! [`site::Sites`] snapshot into [`listing::derive`] to get the page to show.

pub mod error;
pub mod feed;
pub mod listing;
pub mod mock;
pub mod pagination;
pub mod request;
pub mod site;
pub mod store;
pub mod view;

pub use error::{Error, Result, ValidationError};
