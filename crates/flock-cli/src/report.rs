//! Plain-text output for the non-interactive subcommands.

use std::fmt;

use chrono::{DateTime, Utc};
use flock_core::{
  feed::Feed,
  listing::SiteListing,
  pagination::PageIndicator,
  site::Site,
};

/// Coarse "5 minutes ago" style age of `then` relative to `now`.
pub fn ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let secs = (now - then).num_seconds().max(0);
  let (n, unit) = match secs {
    0..60 => return "just now".to_string(),
    60..3_600 => (secs / 60, "minute"),
    3_600..86_400 => (secs / 3_600, "hour"),
    _ => (secs / 86_400, "day"),
  };
  let plural = if n == 1 { "" } else { "s" };
  format!("{n} {unit}{plural} ago")
}

fn page_strip(listing: &SiteListing) -> String {
  listing
    .indicators
    .iter()
    .map(|indicator| match indicator {
      PageIndicator::Page(n) if *n == listing.page => format!("[{n}]"),
      PageIndicator::Page(n) => n.to_string(),
      PageIndicator::Ellipsis => "…".to_string(),
    })
    .collect::<Vec<_>>()
    .join(" ")
}

/// The listing as a header line, one line per site and a page strip.
pub struct ListingReport<'a>(pub &'a SiteListing);

impl fmt::Display for ListingReport<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let listing = self.0;
    let totals = listing.aggregates;
    writeln!(
      f,
      "{} sites · {} active feeds · {} with alerts · ${} monthly",
      totals.total_sites,
      totals.total_active_feeds,
      totals.sites_with_alerts,
      totals.monthly_billing,
    )?;

    if let Some(empty) = listing.empty_state() {
      return writeln!(f, "{}. {}", empty.title(), empty.hint());
    }

    for row in &listing.rows {
      let site = &row.site;
      let badge = if row.alert.has_alerts() {
        format!("  ⚠ {}", row.alert.total_alerts)
      } else {
        String::new()
      };
      writeln!(
        f,
        "{}  {:<28} {:<22} {:>3}/{:<3} feeds {:>3} users{badge}",
        site.site_id, site.name, site.client, site.active_feeds, site.feed_limit, site.users,
      )?;
    }

    writeln!(
      f,
      "page {} of {}: {}",
      listing.page,
      listing.total_pages,
      page_strip(listing)
    )
  }
}

/// A site's feeds, one per line, aged relative to `now`.
pub struct FeedsReport<'a> {
  pub site:  &'a Site,
  pub feeds: &'a [Feed],
  pub now:   DateTime<Utc>,
}

impl fmt::Display for FeedsReport<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let site = self.site;
    writeln!(
      f,
      "{} - Feeds ({} active feeds • {} feed limit • {} feeds total)",
      site.name,
      site.active_feeds,
      site.feed_limit,
      self.feeds.len()
    )?;
    for feed in self.feeds {
      writeln!(
        f,
        "  {:<18} {:<7} {:<16} {:>3} posts  updated {}",
        feed.name,
        feed.status.to_string(),
        feed.embed_location,
        feed.posts,
        ago(feed.last_updated, self.now),
      )?;
    }
    Ok(())
  }
}
