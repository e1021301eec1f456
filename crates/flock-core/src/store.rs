//! The `SiteStore` trait.
//!
//! Implemented by storage backends (e.g. `flock-store-memory`). The
//! dashboard depends on this abstraction, not on a concrete backend.

use uuid::Uuid;

use crate::{
  feed::Feed,
  request::{AddSiteRequest, UpdateSiteRequest},
  site::{Site, Sites},
};

/// Abstraction over a collection of sites.
///
/// Writes replace the whole collection: a caller holding an earlier
/// [`snapshot`](SiteStore::snapshot) keeps seeing it unchanged, and no reader
/// ever observes a half-applied write.
pub trait SiteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Validate `request`, then create a site with a fresh id and
  /// `created_at = now`. A rejected request leaves the store unchanged.
  fn add_site(&self, request: AddSiteRequest) -> Result<Site, Self::Error>;

  /// Validate `request`, then replace the given fields of an existing site.
  fn update_site(&self, request: UpdateSiteRequest) -> Result<Site, Self::Error>;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a site by id. Returns `None` if not found.
  fn get_site(&self, site_id: Uuid) -> Result<Option<Site>, Self::Error>;

  /// The current collection, in insertion order.
  fn snapshot(&self) -> Result<Sites, Self::Error>;

  /// Feeds embedded on a site. Errors if the site does not exist.
  fn list_feeds(&self, site_id: Uuid) -> Result<Vec<Feed>, Self::Error>;
}
