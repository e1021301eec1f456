//! Social-media feed embeds listed on a site's feeds page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use uuid::Uuid;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedKind {
  Instagram,
  Twitter,
  Facebook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedStatus {
  Active,
  Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
  pub feed_id:        Uuid,
  pub site_id:        Uuid,
  pub name:           String,
  pub kind:           FeedKind,
  pub status:         FeedStatus,
  /// Where on the site the feed is embedded, e.g. "Homepage Hero".
  pub embed_location: String,
  pub last_updated:   DateTime<Utc>,
  pub posts:          u32,
}

impl Feed {
  pub fn is_active(&self) -> bool { self.status == FeedStatus::Active }
}
