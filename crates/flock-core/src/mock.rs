//! Mock dashboard data.
//!
//! [`MockGenerator`] produces random but reproducible sites and feeds: the
//! same seed always yields the same records, ids and timestamps included.
//! [`sample_sites`] and [`sample_feeds`] are the fixed demo records.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use strum::IntoEnumIterator;
use uuid::{Builder, Uuid};

use crate::{
  feed::{Feed, FeedKind, FeedStatus},
  site::{Billing, BillingStatus, Site, Sites},
};

const FEED_LIMITS: [u32; 6] = [1, 5, 10, 25, 50, 100];

const SITE_ADJECTIVES: &[&str] = &[
  "Local", "Global", "Urban", "Coastal", "Modern", "Classic", "Green",
  "Bright", "Northern", "Digital",
];

const SITE_NOUNS: &[&str] = &[
  "Restaurant Chain", "Fashion Blog", "Healthcare Portal", "Tech Website",
  "E-commerce Store", "Learning Platform", "Travel Guide", "Fitness Studio",
  "News Magazine", "Real Estate Listings",
];

const CLIENTS: &[&str] = &[
  "TechCorp Inc.", "Fashion Forward LLC", "Delicious Eats",
  "MedCare Solutions", "ShopSmart Ltd", "LearnMore Academy",
  "Wanderlust Media", "PeakForm Gyms", "Daily Ledger", "Harbor Homes",
];

const EMBED_LOCATIONS: &[&str] = &[
  "Homepage Hero", "About Page", "Events Section", "Footer", "Blog Sidebar",
  "Product Gallery", "Landing Page",
];

/// Monthly amount billed per active feed in the generated data.
const AMOUNT_PER_FEED: u64 = 30;

fn random_id(rng: &mut StdRng) -> Uuid {
  Builder::from_random_bytes(rng.random()).into_uuid()
}

/// A stable id for the `n`th child of `parent`.
fn derived_id(parent: Uuid, n: u128) -> Uuid {
  Uuid::from_u128(parent.as_u128().rotate_left(8) ^ n)
}

fn feed_name(kind: FeedKind) -> &'static str {
  match kind {
    FeedKind::Instagram => "Instagram Feed",
    FeedKind::Twitter => "Twitter Timeline",
    FeedKind::Facebook => "Facebook Events",
  }
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Seedable source of mock sites and feeds.
#[derive(Debug, Clone)]
pub struct MockGenerator {
  seed: u64,
  rng:  StdRng,
}

impl MockGenerator {
  pub fn new(seed: u64) -> Self {
    Self {
      seed,
      rng: StdRng::seed_from_u64(seed),
    }
  }

  pub fn seed(&self) -> u64 { self.seed }

  /// Generate the next site from the stream.
  pub fn site(&mut self) -> Site {
    let rng = &mut self.rng;

    let adjective = SITE_ADJECTIVES.choose(rng).copied().unwrap_or("Local");
    let noun = SITE_NOUNS.choose(rng).copied().unwrap_or("Website");
    let client = CLIENTS.choose(rng).copied().unwrap_or("Acme");
    let feed_limit = FEED_LIMITS.choose(rng).copied().unwrap_or(5);
    let active_feeds = rng.random_range(0..=feed_limit);
    let alerts = if rng.random_bool(0.3) {
      rng.random_range(1..=3)
    } else {
      0
    };
    let status = if rng.random_bool(0.9) {
      BillingStatus::Active
    } else {
      BillingStatus::Suspended
    };
    let created_at = epoch()
      + Duration::days(rng.random_range(0..365))
      + Duration::seconds(rng.random_range(0..86_400));

    Site {
      site_id: random_id(rng),
      name: format!("{adjective} {noun}"),
      client: client.to_owned(),
      domain: None,
      active_feeds,
      feed_limit,
      users: rng.random_range(1..=50),
      alerts,
      created_at,
      billing: Billing {
        status,
        amount: u64::from(active_feeds) * AMOUNT_PER_FEED,
      },
    }
  }

  /// Generate `count` sites.
  pub fn sites(&mut self, count: usize) -> Sites {
    (0..count).map(|_| self.site()).collect()
  }

  /// Feeds embedded on `site`: one active feed per counted active feed, plus
  /// up to two paused ones.
  ///
  /// Depends only on the seed and the site, not on what was generated before.
  pub fn feeds_for(&self, site: &Site) -> Vec<Feed> {
    let mut rng = StdRng::seed_from_u64(self.seed ^ site.site_id.as_u64_pair().1);
    let paused = rng.random_range(0..=2);
    let kinds: Vec<FeedKind> = FeedKind::iter().collect();

    (0..site.active_feeds + paused)
      .map(|i| {
        let kind = kinds.choose(&mut rng).copied().unwrap_or(FeedKind::Instagram);
        let status = if i < site.active_feeds {
          FeedStatus::Active
        } else {
          FeedStatus::Paused
        };
        Feed {
          feed_id: random_id(&mut rng),
          site_id: site.site_id,
          name: feed_name(kind).to_owned(),
          kind,
          status,
          embed_location: EMBED_LOCATIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or("Homepage Hero")
            .to_owned(),
          last_updated: site.created_at
            + Duration::minutes(rng.random_range(0..60 * 24 * 90)),
          posts: rng.random_range(0..=60),
        }
      })
      .collect()
  }
}

fn epoch() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
    .single()
    .unwrap_or_default()
}

// ─── Fixed demo data ─────────────────────────────────────────────────────────

struct SampleSite {
  name:         &'static str,
  client:       &'static str,
  active_feeds: u32,
  feed_limit:   u32,
  users:        u32,
  alerts:       u32,
  created:      (i32, u32, u32),
  amount:       u64,
}

const SAMPLE_SITES: [SampleSite; 6] = [
  SampleSite {
    name:         "TechCorp Website",
    client:       "TechCorp Inc.",
    active_feeds: 8,
    feed_limit:   10,
    users:        12,
    alerts:       1,
    created:      (2024, 1, 15),
    amount:       240,
  },
  SampleSite {
    name:         "Fashion Forward Blog",
    client:       "Fashion Forward LLC",
    active_feeds: 15,
    feed_limit:   25,
    users:        8,
    alerts:       0,
    created:      (2024, 2, 20),
    amount:       450,
  },
  SampleSite {
    name:         "Local Restaurant Chain",
    client:       "Delicious Eats",
    active_feeds: 5,
    feed_limit:   5,
    users:        3,
    alerts:       2,
    created:      (2024, 3, 10),
    amount:       150,
  },
  SampleSite {
    name:         "Healthcare Portal",
    client:       "MedCare Solutions",
    active_feeds: 12,
    feed_limit:   20,
    users:        25,
    alerts:       0,
    created:      (2024, 1, 5),
    amount:       360,
  },
  SampleSite {
    name:         "E-commerce Store",
    client:       "ShopSmart Ltd",
    active_feeds: 3,
    feed_limit:   10,
    users:        6,
    alerts:       0,
    created:      (2024, 4, 1),
    amount:       90,
  },
  SampleSite {
    name:         "Educational Platform",
    client:       "LearnMore Academy",
    active_feeds: 18,
    feed_limit:   25,
    users:        45,
    alerts:       1,
    created:      (2024, 2, 28),
    amount:       540,
  },
];

/// The six demo sites, with ids `00000000-0000-0000-0000-000000000001`
/// through `...0006`.
pub fn sample_sites() -> Sites {
  SAMPLE_SITES
    .iter()
    .zip(1u128..)
    .map(|(s, n)| {
      let (y, m, d) = s.created;
      Site {
        site_id:      Uuid::from_u128(n),
        name:         s.name.to_owned(),
        client:       s.client.to_owned(),
        domain:       None,
        active_feeds: s.active_feeds,
        feed_limit:   s.feed_limit,
        users:        s.users,
        alerts:       s.alerts,
        created_at:   Utc
          .with_ymd_and_hms(y, m, d, 0, 0, 0)
          .single()
          .unwrap_or_else(epoch),
        billing:      Billing {
          status: BillingStatus::Active,
          amount: s.amount,
        },
      }
    })
    .collect()
}

/// The three demo feeds shown on every site's feeds page, last updated
/// relative to `now`.
pub fn sample_feeds(site: &Site, now: DateTime<Utc>) -> Vec<Feed> {
  let feed = |n: u128,
              kind: FeedKind,
              status: FeedStatus,
              embed_location: &str,
              age: Duration,
              posts: u32| Feed {
    feed_id: derived_id(site.site_id, n),
    site_id: site.site_id,
    name: feed_name(kind).to_owned(),
    kind,
    status,
    embed_location: embed_location.to_owned(),
    last_updated: now - age,
    posts,
  };

  vec![
    feed(
      1,
      FeedKind::Instagram,
      FeedStatus::Active,
      "Homepage Hero",
      Duration::hours(2),
      24,
    ),
    feed(
      2,
      FeedKind::Twitter,
      FeedStatus::Active,
      "About Page",
      Duration::minutes(5),
      18,
    ),
    feed(
      3,
      FeedKind::Facebook,
      FeedStatus::Paused,
      "Events Section",
      Duration::days(1),
      6,
    ),
  ]
}
