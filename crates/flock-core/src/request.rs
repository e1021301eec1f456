//! Add/update payloads for sites and their validation.
//!
//! Requests carry raw form values. `validate` turns them into typed values
//! or a [`ValidationError`]; nothing is written and no id is allocated until
//! validation has passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  ValidationError,
  site::{Billing, Site},
};

/// Feed limit used when the submitted value is not a positive integer.
pub const DEFAULT_FEED_LIMIT: u32 = 8;

/// Parse a submitted feed limit, falling back to [`DEFAULT_FEED_LIMIT`].
pub fn parse_feed_limit(raw: &str) -> u32 {
  match raw.trim().parse::<u32>() {
    Ok(limit) if limit > 0 => limit,
    _ => DEFAULT_FEED_LIMIT,
  }
}

fn required(raw: &str, missing: ValidationError) -> Result<String, ValidationError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    Err(missing)
  } else {
    Ok(trimmed.to_owned())
  }
}

fn optional(raw: Option<&str>) -> Option<String> {
  raw
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

// ─── Add ─────────────────────────────────────────────────────────────────────

/// Raw values from the "Add New Site" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSiteRequest {
  pub name:       String,
  pub client:     String,
  #[serde(default)]
  pub domain:     Option<String>,
  #[serde(default)]
  pub feed_limit: String,
}

/// A validated [`AddSiteRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
  pub name:       String,
  pub client:     String,
  pub domain:     Option<String>,
  pub feed_limit: u32,
}

impl AddSiteRequest {
  pub fn validate(&self) -> Result<NewSite, ValidationError> {
    Ok(NewSite {
      name:       required(&self.name, ValidationError::EmptyName)?,
      client:     required(&self.client, ValidationError::EmptyClient)?,
      domain:     optional(self.domain.as_deref()),
      feed_limit: parse_feed_limit(&self.feed_limit),
    })
  }
}

impl NewSite {
  /// Build the stored record with the defaults every new site starts with.
  pub fn into_site(self, site_id: Uuid, created_at: DateTime<Utc>) -> Site {
    Site {
      site_id,
      name: self.name,
      client: self.client,
      domain: self.domain,
      active_feeds: 0,
      feed_limit: self.feed_limit,
      users: 1,
      alerts: 0,
      created_at,
      billing: Billing::default(),
    }
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Replace a subset of a site's fields. `None` leaves a field unchanged.
///
/// `domain: Some("")` clears the domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSiteRequest {
  pub site_id:      Uuid,
  #[serde(default)]
  pub name:         Option<String>,
  #[serde(default)]
  pub client:       Option<String>,
  #[serde(default)]
  pub domain:       Option<String>,
  #[serde(default)]
  pub feed_limit:   Option<String>,
  #[serde(default)]
  pub active_feeds: Option<u32>,
  #[serde(default)]
  pub users:        Option<u32>,
  #[serde(default)]
  pub alerts:       Option<u32>,
  #[serde(default)]
  pub billing:      Option<Billing>,
}

/// A validated [`UpdateSiteRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitePatch {
  pub name:         Option<String>,
  pub client:       Option<String>,
  pub domain:       Option<Option<String>>,
  pub feed_limit:   Option<u32>,
  pub active_feeds: Option<u32>,
  pub users:        Option<u32>,
  pub alerts:       Option<u32>,
  pub billing:      Option<Billing>,
}

impl UpdateSiteRequest {
  pub fn new(site_id: Uuid) -> Self {
    Self {
      site_id,
      ..Self::default()
    }
  }

  pub fn validate(&self) -> Result<SitePatch, ValidationError> {
    Ok(SitePatch {
      name:         self
        .name
        .as_deref()
        .map(|n| required(n, ValidationError::EmptyName))
        .transpose()?,
      client:       self
        .client
        .as_deref()
        .map(|c| required(c, ValidationError::EmptyClient))
        .transpose()?,
      domain:       self.domain.as_deref().map(|d| optional(Some(d))),
      feed_limit:   self.feed_limit.as_deref().map(parse_feed_limit),
      active_feeds: self.active_feeds,
      users:        self.users,
      alerts:       self.alerts,
      billing:      self.billing,
    })
  }
}

impl SitePatch {
  /// The site with this patch applied. `site_id` and `created_at` are never
  /// touched.
  pub fn apply(&self, site: &Site) -> Site {
    let mut next = site.clone();
    if let Some(name) = &self.name {
      next.name = name.clone();
    }
    if let Some(client) = &self.client {
      next.client = client.clone();
    }
    if let Some(domain) = &self.domain {
      next.domain = domain.clone();
    }
    if let Some(limit) = self.feed_limit {
      next.feed_limit = limit;
    }
    if let Some(active) = self.active_feeds {
      next.active_feeds = active;
    }
    if let Some(users) = self.users {
      next.users = users;
    }
    if let Some(alerts) = self.alerts {
      next.alerts = alerts;
    }
    if let Some(billing) = self.billing {
      next.billing = billing;
    }
    next
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::site::BillingStatus;

  fn add(name: &str, client: &str, feed_limit: &str) -> AddSiteRequest {
    AddSiteRequest {
      name:       name.into(),
      client:     client.into(),
      domain:     None,
      feed_limit: feed_limit.into(),
    }
  }

  #[test]
  fn add_trims_required_fields() {
    let new = add("  Healthcare Portal ", "\tMedCare Solutions", "20")
      .validate()
      .unwrap();
    assert_eq!(new.name, "Healthcare Portal");
    assert_eq!(new.client, "MedCare Solutions");
    assert_eq!(new.feed_limit, 20);
    assert_eq!(new.domain, None);
  }

  #[test]
  fn add_rejects_blank_name_before_client() {
    assert_eq!(add("   ", "", "5").validate(), Err(ValidationError::EmptyName));
    assert_eq!(
      add("Blog", " ", "5").validate(),
      Err(ValidationError::EmptyClient)
    );
  }

  #[test]
  fn feed_limit_falls_back_when_not_positive() {
    assert_eq!(parse_feed_limit("25"), 25);
    assert_eq!(parse_feed_limit(" 10 "), 10);
    assert_eq!(parse_feed_limit("0"), DEFAULT_FEED_LIMIT);
    assert_eq!(parse_feed_limit("-3"), DEFAULT_FEED_LIMIT);
    assert_eq!(parse_feed_limit("ten"), DEFAULT_FEED_LIMIT);
    assert_eq!(parse_feed_limit(""), DEFAULT_FEED_LIMIT);
  }

  #[test]
  fn blank_domain_becomes_none() {
    let mut req = add("Blog", "Fashion Forward LLC", "25");
    req.domain = Some("   ".into());
    assert_eq!(req.validate().unwrap().domain, None);

    req.domain = Some(" fashion.example ".into());
    assert_eq!(
      req.validate().unwrap().domain.as_deref(),
      Some("fashion.example")
    );
  }

  #[test]
  fn new_site_gets_lifecycle_defaults() {
    let id = Uuid::new_v4();
    let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap();
    let site = add("E-commerce Store", "ShopSmart Ltd", "10")
      .validate()
      .unwrap()
      .into_site(id, at);

    assert_eq!(site.site_id, id);
    assert_eq!(site.created_at, at);
    assert_eq!(site.active_feeds, 0);
    assert_eq!(site.users, 1);
    assert_eq!(site.alerts, 0);
    assert_eq!(site.billing.status, BillingStatus::Active);
    assert_eq!(site.billing.amount, 0);
  }

  #[test]
  fn update_rejects_blank_name() {
    let mut req = UpdateSiteRequest::new(Uuid::new_v4());
    req.name = Some("  ".into());
    assert_eq!(req.validate(), Err(ValidationError::EmptyName));
  }

  #[test]
  fn patch_replaces_only_present_fields() {
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let original = add("TechCorp Website", "TechCorp Inc.", "10")
      .validate()
      .unwrap()
      .into_site(Uuid::new_v4(), at);

    let mut req = UpdateSiteRequest::new(original.site_id);
    req.client = Some(" techcorp.example ".into());
    req.feed_limit = Some("nope".into());
    req.active_feeds = Some(8);
    req.domain = Some(String::new());

    let updated = req.validate().unwrap().apply(&original);
    assert_eq!(updated.site_id, original.site_id);
    assert_eq!(updated.created_at, at);
    assert_eq!(updated.name, "TechCorp Website");
    assert_eq!(updated.client, "techcorp.example");
    assert_eq!(updated.feed_limit, DEFAULT_FEED_LIMIT);
    assert_eq!(updated.active_feeds, 8);
    assert_eq!(updated.domain, None);
    assert_eq!(updated.users, 1);
  }
}
