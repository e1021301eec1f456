//! In-memory implementation of [`SiteStore`].

use std::{collections::HashMap, sync::RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use flock_core::{
  feed::Feed,
  mock::{MockGenerator, sample_feeds, sample_sites},
  request::{AddSiteRequest, UpdateSiteRequest},
  site::{Site, Sites},
  store::SiteStore,
};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A site store held entirely in memory.
///
/// Each write builds a new [`Sites`] value and swaps it in; the lock is never
/// held while a snapshot is being read.
#[derive(Debug, Default)]
pub struct MemoryStore {
  sites: RwLock<Sites>,
  feeds: HashMap<Uuid, Vec<Feed>>,
}

impl MemoryStore {
  /// An empty store.
  pub fn new() -> Self { Self::default() }

  /// A store preloaded with `sites` and their `feeds`.
  pub fn with_sites(sites: Sites, feeds: HashMap<Uuid, Vec<Feed>>) -> Self {
    Self {
      sites: RwLock::new(sites),
      feeds,
    }
  }

  /// A store of `count` generated sites. The same seed gives the same store.
  pub fn seeded(seed: u64, count: usize) -> Self {
    let mut generator = MockGenerator::new(seed);
    let sites = generator.sites(count);
    let feeds = sites
      .iter()
      .map(|site| (site.site_id, generator.feeds_for(site)))
      .collect();
    tracing::debug!(seed = generator.seed(), count, "generated mock sites");
    Self::with_sites(sites, feeds)
  }

  /// The six demo sites, each with the three demo feeds.
  pub fn sample(now: DateTime<Utc>) -> Self {
    let sites = sample_sites();
    let feeds = sites
      .iter()
      .map(|site| (site.site_id, sample_feeds(site, now)))
      .collect();
    Self::with_sites(sites, feeds)
  }

  /// Swap in the result of `write` applied to the current collection.
  fn publish(
    &self,
    write: impl FnOnce(&Sites) -> flock_core::Result<(Sites, Site)>,
  ) -> Result<Site> {
    let mut guard = self.sites.write()?;
    let (next, site) = write(&guard)?;
    *guard = next;
    Ok(site)
  }
}

// ─── SiteStore impl ──────────────────────────────────────────────────────────

impl SiteStore for MemoryStore {
  type Error = Error;

  fn add_site(&self, request: AddSiteRequest) -> Result<Site> {
    let result = self.publish(|sites| sites.add(&request, Uuid::new_v4, Utc::now()));
    match &result {
      Ok(site) => {
        tracing::debug!(site_id = %site.site_id, name = %site.name, "site added");
      }
      Err(e) => tracing::warn!(error = %e, "add site rejected"),
    }
    result
  }

  fn update_site(&self, request: UpdateSiteRequest) -> Result<Site> {
    let result = self.publish(|sites| sites.update(&request));
    match &result {
      Ok(site) => {
        tracing::debug!(site_id = %site.site_id, name = %site.name, "site updated");
      }
      Err(e) => {
        tracing::warn!(site_id = %request.site_id, error = %e, "update site rejected");
      }
    }
    result
  }

  fn get_site(&self, site_id: Uuid) -> Result<Option<Site>> {
    Ok(self.sites.read()?.get(site_id).cloned())
  }

  fn snapshot(&self) -> Result<Sites> { Ok(self.sites.read()?.clone()) }

  fn list_feeds(&self, site_id: Uuid) -> Result<Vec<Feed>> {
    if !self.sites.read()?.contains(site_id) {
      return Err(flock_core::Error::SiteNotFound(site_id).into());
    }
    Ok(self.feeds.get(&site_id).cloned().unwrap_or_default())
  }
}
