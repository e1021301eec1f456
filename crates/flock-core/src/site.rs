//! Managed client websites and the collection that holds them.
//!
//! A site's alert badge is never stored. It is recomputed from the feed
//! counters and the externally reported alert count on every read.

use std::{ops::Deref, sync::Arc};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  request::{AddSiteRequest, UpdateSiteRequest},
};

// ─── Billing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
  #[default]
  Active,
  Suspended,
}

/// Static billing display values. No invoicing happens anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Billing {
  pub status: BillingStatus,
  pub amount: u64,
}

/// Day of the month on which a billing cycle begins.
pub const INVOICE_DAY: u32 = 15;

/// The start of the next billing cycle: the 15th of the month after `today`.
pub fn next_invoice_date(today: NaiveDate) -> NaiveDate {
  let (year, month) = if today.month() == 12 {
    (today.year() + 1, 1)
  } else {
    (today.year(), today.month() + 1)
  };
  NaiveDate::from_ymd_opt(year, month, INVOICE_DAY).unwrap_or(today)
}

// ─── Site ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
  pub site_id:      Uuid,
  pub name:         String,
  /// Opaque client label; sometimes a company name, sometimes a bare domain.
  pub client:       String,
  pub domain:       Option<String>,
  pub active_feeds: u32,
  /// Always at least 1.
  pub feed_limit:   u32,
  pub users:        u32,
  /// Externally reported problems (e.g. disconnected feeds).
  pub alerts:       u32,
  /// Set once when the site is added; never changes.
  pub created_at:   DateTime<Utc>,
  pub billing:      Billing,
}

/// The alert badge for a site, computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStatus {
  pub feeds_maxed_out: bool,
  /// Stored alerts plus one when the feed limit is reached.
  pub total_alerts:    u32,
}

impl AlertStatus {
  pub fn has_alerts(&self) -> bool { self.total_alerts > 0 }
}

impl Site {
  pub fn feeds_maxed_out(&self) -> bool { self.active_feeds >= self.feed_limit }

  pub fn alert_status(&self) -> AlertStatus {
    let feeds_maxed_out = self.feeds_maxed_out();
    AlertStatus {
      feeds_maxed_out,
      total_alerts: self.alerts + u32::from(feeds_maxed_out),
    }
  }

  /// Whether the site has externally reported alerts. The feed-limit badge
  /// does not count here.
  pub fn has_reported_alerts(&self) -> bool { self.alerts > 0 }
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// An immutable, insertion-ordered collection of sites.
///
/// Cloning is cheap. Writes never mutate the receiver; they build and return
/// a new collection, so a holder of an older value keeps a consistent view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sites(Arc<Vec<Site>>);

impl Sites {
  pub fn new(sites: Vec<Site>) -> Self { Self(Arc::new(sites)) }

  pub fn get(&self, site_id: Uuid) -> Option<&Site> {
    self.0.iter().find(|s| s.site_id == site_id)
  }

  pub fn contains(&self, site_id: Uuid) -> bool { self.get(site_id).is_some() }

  /// A new collection with `site` appended.
  pub fn with_added(&self, site: Site) -> Self {
    let mut next = Vec::with_capacity(self.0.len() + 1);
    next.extend(self.0.iter().cloned());
    next.push(site);
    Self::new(next)
  }

  /// A new collection with the site `site_id` replaced by `update(site)`.
  ///
  /// Returns `None` if no such site exists. The replacement keeps its
  /// position in the collection.
  pub fn with_updated(
    &self,
    site_id: Uuid,
    update: impl FnOnce(&Site) -> Site,
  ) -> Option<(Self, Site)> {
    let index = self.0.iter().position(|s| s.site_id == site_id)?;
    let updated = update(&self.0[index]);
    let mut next = self.0.as_ref().clone();
    next[index] = updated.clone();
    Some((Self::new(next), updated))
  }

  /// Validate `request` and append the new site.
  ///
  /// `next_id` is only called once validation has passed, so a rejected
  /// request allocates nothing.
  pub fn add(
    &self,
    request: &AddSiteRequest,
    next_id: impl FnOnce() -> Uuid,
    now: DateTime<Utc>,
  ) -> Result<(Self, Site)> {
    let site = request.validate()?.into_site(next_id(), now);
    Ok((self.with_added(site.clone()), site))
  }

  /// Validate `request` and apply it to the site it names.
  pub fn update(&self, request: &UpdateSiteRequest) -> Result<(Self, Site)> {
    let patch = request.validate()?;
    self
      .with_updated(request.site_id, |site| patch.apply(site))
      .ok_or(Error::SiteNotFound(request.site_id))
  }
}

impl Deref for Sites {
  type Target = [Site];

  fn deref(&self) -> &[Site] { &self.0 }
}

impl FromIterator<Site> for Sites {
  fn from_iter<I: IntoIterator<Item = Site>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}
