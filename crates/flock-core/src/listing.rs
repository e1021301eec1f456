//! The site-list pipeline: filter, sort, paginate, then attach each visible
//! site's alert badge.
//!
//! Everything here is a pure function of the site collection and a
//! [`ViewState`]. Calling [`derive`] twice with the same inputs yields the same
//! [`SiteListing`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{
  pagination::{PageIndicator, page_indicators, paginate, total_pages},
  site::{AlertStatus, BillingStatus, Site},
  view::ViewState,
};

/// Sites shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
  /// By name, ascending.
  #[default]
  Alphabetical,
  /// By creation time, most recent first.
  Newest,
  /// By active feed count, highest first.
  ActiveFeeds,
}

impl SortKey {
  pub fn label(self) -> &'static str {
    match self {
      Self::Alphabetical => "Alphabetical",
      Self::Newest => "Newest First",
      Self::ActiveFeeds => "Most Active Feeds",
    }
  }

  /// The next key in menu order, wrapping around.
  pub fn next(self) -> Self {
    let mut keys = Self::iter().cycle().skip_while(|k| *k != self);
    keys.nth(1).unwrap_or_default()
  }
}

/// Base letters only: decomposed, accents dropped, lowercased.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
  s.nfd()
    .filter(|c| !is_combining_mark(*c))
    .flat_map(char::to_lowercase)
}

/// Human-facing name comparison in three levels:
///
/// 1. base letters, ignoring accents and case (`é` sorts with `e`);
/// 2. accents, unaccented first;
/// 3. case, lowercase first.
pub fn collate(a: &str, b: &str) -> Ordering {
  let accented = |s: &str| s.nfd().flat_map(char::to_lowercase).collect::<String>();
  base_letters(a)
    .cmp(base_letters(b))
    .then_with(|| accented(a).cmp(&accented(b)))
    .then_with(|| b.cmp(a))
}

/// Stable sort of `sites` by `key`; ties keep their relative order.
pub fn sort_sites(sites: &mut [&Site], key: SortKey) {
  match key {
    SortKey::Alphabetical => sites.sort_by(|a, b| collate(&a.name, &b.name)),
    SortKey::Newest => sites.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    SortKey::ActiveFeeds => {
      sites.sort_by(|a, b| b.active_feeds.cmp(&a.active_feeds))
    }
  }
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Whether `site` matches a search term, case-insensitively, on its name or
/// its client. An empty term matches everything.
pub fn matches_search(site: &Site, search: &str) -> bool {
  if search.is_empty() {
    return true;
  }
  let needle = search.to_lowercase();
  site.name.to_lowercase().contains(&needle)
    || site.client.to_lowercase().contains(&needle)
}

/// Sites matching `search`, in their original order. With `alerts_only`, only
/// sites with stored alerts are kept; a maxed-out feed limit alone does not
/// qualify.
pub fn filter_sites<'a>(
  sites: &'a [Site],
  search: &str,
  alerts_only: bool,
) -> Vec<&'a Site> {
  sites
    .iter()
    .filter(|s| matches_search(s, search))
    .filter(|s| !alerts_only || s.has_reported_alerts())
    .collect()
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Dashboard header figures, always over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Aggregates {
  pub total_sites:        usize,
  pub total_active_feeds: u64,
  /// Sites with stored alerts. Maxed-out feed limits are not counted.
  pub sites_with_alerts:  usize,
  /// Sum of billing amounts over sites whose billing is active.
  pub monthly_billing:    u64,
}

impl Aggregates {
  pub fn compute(sites: &[Site]) -> Self {
    sites.iter().fold(Self::default(), |mut acc, site| {
      acc.total_sites += 1;
      acc.total_active_feeds += u64::from(site.active_feeds);
      if site.has_reported_alerts() {
        acc.sites_with_alerts += 1;
      }
      if site.billing.status == BillingStatus::Active {
        acc.monthly_billing += site.billing.amount;
      }
      acc
    })
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// A visible site with its alert badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRow {
  pub site:  Site,
  pub alert: AlertStatus,
}

impl SiteRow {
  pub fn new(site: Site) -> Self {
    let alert = site.alert_status();
    Self { site, alert }
  }
}

/// Why a listing has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
  /// The collection itself is empty.
  NoSites,
  /// Alerts-only is on and no site has stored alerts matching the search.
  NoAlerts,
  /// Sites exist but none match the search.
  NoMatches,
}

impl EmptyState {
  pub fn title(self) -> &'static str {
    match self {
      Self::NoSites | Self::NoMatches => "No sites found",
      Self::NoAlerts => "No sites with alerts found",
    }
  }

  pub fn hint(self) -> &'static str {
    match self {
      Self::NoSites => "Add a site to get started",
      Self::NoAlerts => "All sites are running smoothly!",
      Self::NoMatches => "Try adjusting your search or filters",
    }
  }
}

/// One rendered page of the site list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteListing {
  pub rows:           Vec<SiteRow>,
  pub page:           usize,
  pub page_size:      usize,
  /// Zero when nothing matches.
  pub total_pages:    usize,
  pub filtered_count: usize,
  pub total_count:    usize,
  pub alerts_only:    bool,
  pub indicators:     Vec<PageIndicator>,
  pub aggregates:     Aggregates,
}

impl SiteListing {
  /// `None` unless the filter matched nothing. A page past the end of a
  /// non-empty result is not an empty state.
  pub fn empty_state(&self) -> Option<EmptyState> {
    if self.filtered_count > 0 {
      None
    } else if self.total_count == 0 {
      Some(EmptyState::NoSites)
    } else if self.alerts_only {
      Some(EmptyState::NoAlerts)
    } else {
      Some(EmptyState::NoMatches)
    }
  }

  pub fn has_next_page(&self) -> bool { self.page < self.total_pages }

  pub fn has_prev_page(&self) -> bool { self.page > 1 }
}

/// Run the whole pipeline for `view` over `sites`.
pub fn derive(sites: &[Site], view: &ViewState, page_size: usize) -> SiteListing {
  let page_size = page_size.max(1);
  let page = view.page.max(1);
  let mut matched = filter_sites(sites, &view.search, view.alerts_only);
  sort_sites(&mut matched, view.sort);

  let filtered_count = matched.len();
  let total_pages = total_pages(filtered_count, page_size);
  let rows = paginate(&matched, page, page_size)
    .iter()
    .map(|site| SiteRow::new((*site).clone()))
    .collect();

  SiteListing {
    rows,
    page,
    page_size,
    total_pages,
    filtered_count,
    total_count: sites.len(),
    alerts_only: view.alerts_only,
    indicators: page_indicators(page, total_pages),
    aggregates: Aggregates::compute(sites),
  }
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, TimeZone, Utc};
  use uuid::Uuid;

  use super::*;
  use crate::{
    pagination::PageIndicator,
    site::Billing,
    view::ViewAction,
  };

  fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
  }

  fn site(
    name: &str,
    client: &str,
    created_at: DateTime<Utc>,
    active_feeds: u32,
    feed_limit: u32,
    alerts: u32,
  ) -> Site {
    Site {
      site_id: Uuid::new_v4(),
      name: name.into(),
      client: client.into(),
      domain: None,
      active_feeds,
      feed_limit,
      users: 1,
      alerts,
      created_at,
      billing: Billing::default(),
    }
  }

  /// Beta is maxed out but has no stored alerts; Alpha has one stored alert.
  fn alpha_beta() -> Vec<Site> {
    vec![
      site("Beta", "Beta Co", at(2024, 2, 1), 5, 5, 0),
      site("Alpha", "Alpha Co", at(2024, 1, 1), 2, 10, 1),
    ]
  }

  fn names(listing: &SiteListing) -> Vec<&str> {
    listing.rows.iter().map(|r| r.site.name.as_str()).collect()
  }

  fn view(sort: SortKey) -> ViewState {
    ViewState::default().reduce(ViewAction::SetSort(sort))
  }

  fn numbered(n: usize) -> Vec<Site> {
    (0..n)
      .map(|i| {
        site(
          &format!("Site {i:02}"),
          "Client",
          at(2024, 1, 1),
          0,
          5,
          0,
        )
      })
      .collect()
  }

  #[test]
  fn sorts_each_key() {
    let sites = alpha_beta();

    let listing = derive(&sites, &view(SortKey::Alphabetical), 12);
    assert_eq!(names(&listing), ["Alpha", "Beta"]);

    let listing = derive(&sites, &view(SortKey::Newest), 12);
    assert_eq!(names(&listing), ["Beta", "Alpha"]);

    let listing = derive(&sites, &view(SortKey::ActiveFeeds), 12);
    assert_eq!(names(&listing), ["Beta", "Alpha"]);
  }

  #[test]
  fn alerts_only_ignores_feed_limit_badge() {
    let sites = alpha_beta();
    let state = ViewState::default().reduce(ViewAction::ToggleAlertsOnly);
    let listing = derive(&sites, &state, 12);

    assert_eq!(names(&listing), ["Alpha"]);
  }

  #[test]
  fn rows_carry_composite_alerts() {
    let sites = alpha_beta();
    let listing = derive(&sites, &view(SortKey::Alphabetical), 12);

    let beta = &listing.rows[1];
    assert!(beta.alert.feeds_maxed_out);
    assert_eq!(beta.alert.total_alerts, 1);
    assert_eq!(listing.rows[0].alert.total_alerts, 1);
  }

  #[test]
  fn aggregates_cover_unfiltered_collection() {
    let sites = alpha_beta();
    let state = ViewState::default().reduce(ViewAction::SetSearch("zzz".into()));
    let listing = derive(&sites, &state, 12);

    assert!(listing.rows.is_empty());
    assert_eq!(listing.aggregates.total_sites, 2);
    assert_eq!(listing.aggregates.total_active_feeds, 7);
    // Beta's maxed-out limit does not make it a site with alerts.
    assert_eq!(listing.aggregates.sites_with_alerts, 1);
  }

  #[test]
  fn monthly_billing_skips_suspended_sites() {
    let mut sites = alpha_beta();
    sites[0].billing = Billing {
      status: BillingStatus::Active,
      amount: 240,
    };
    sites[1].billing = Billing {
      status: BillingStatus::Suspended,
      amount: 90,
    };
    assert_eq!(Aggregates::compute(&sites).monthly_billing, 240);
  }

  #[test]
  fn search_matches_name_or_client_case_insensitively() {
    let sites = vec![
      site("TechCorp Website", "TechCorp Inc.", at(2024, 1, 15), 8, 10, 1),
      site("Healthcare Portal", "MedCare Solutions", at(2024, 1, 5), 12, 20, 0),
      site("Fashion Forward Blog", "Fashion Forward LLC", at(2024, 2, 20), 15, 25, 0),
    ];

    let by_name = filter_sites(&sites, "WEBSITE", false);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "TechCorp Website");

    let by_client = filter_sites(&sites, "medcare", false);
    assert_eq!(by_client.len(), 1);
    assert_eq!(by_client[0].name, "Healthcare Portal");

    let both = filter_sites(&sites, "care", false);
    assert_eq!(both.len(), 1);

    assert_eq!(filter_sites(&sites, "", false).len(), 3);
    assert_eq!(filter_sites(&sites, "", true).len(), 1);
  }

  #[test]
  fn alphabetical_is_stable_for_equal_names() {
    let first = site("Same", "First", at(2024, 1, 1), 0, 5, 0);
    let second = site("Same", "Second", at(2024, 3, 1), 0, 5, 0);
    let sites = vec![first.clone(), second.clone()];

    let listing = derive(&sites, &view(SortKey::Alphabetical), 12);
    assert_eq!(listing.rows[0].site.site_id, first.site_id);
    assert_eq!(listing.rows[1].site.site_id, second.site_id);
  }

  #[test]
  fn collate_ignores_case_first() {
    assert_eq!(collate("apple", "Banana"), Ordering::Less);
    assert_eq!(collate("Zeta", "alpha"), Ordering::Greater);
    assert_eq!(collate("a", "A"), Ordering::Less);
    assert_eq!(collate("Same", "Same"), Ordering::Equal);
  }

  #[test]
  fn pages_cover_everything_exactly_once() {
    let sites = numbered(26);
    let first = derive(&sites, &ViewState::default(), 12);
    assert_eq!(first.total_pages, 3);

    let mut seen = Vec::new();
    let mut state = ViewState::default();
    for page in 1..=first.total_pages {
      state = state.reduce(ViewAction::GoToPage(page));
      let listing = derive(&sites, &state, 12);
      seen.extend(listing.rows.into_iter().map(|r| r.site.name));
    }

    let mut expected: Vec<&Site> = sites.iter().collect();
    sort_sites(&mut expected, SortKey::Alphabetical);
    let expected: Vec<String> = expected.into_iter().map(|s| s.name.clone()).collect();
    assert_eq!(seen, expected);
  }

  #[test]
  fn second_page_of_twenty_six() {
    let sites = numbered(26);
    let state = ViewState::default().reduce(ViewAction::GoToPage(2));
    let listing = derive(&sites, &state, 12);

    assert_eq!(listing.rows.len(), 12);
    assert_eq!(listing.rows[0].site.name, "Site 12");
    assert_eq!(listing.rows[11].site.name, "Site 23");
    assert_eq!(
      listing.indicators,
      vec![
        PageIndicator::Page(1),
        PageIndicator::Page(2),
        PageIndicator::Page(3)
      ]
    );
    assert!(listing.has_next_page());
    assert!(listing.has_prev_page());
  }

  #[test]
  fn derive_is_idempotent() {
    let sites = numbered(30);
    let state = ViewState::default()
      .reduce(ViewAction::SetSort(SortKey::ActiveFeeds))
      .reduce(ViewAction::GoToPage(2));
    assert_eq!(derive(&sites, &state, 12), derive(&sites, &state, 12));
  }

  #[test]
  fn empty_states_are_distinguished() {
    let none = derive(&[], &ViewState::default(), 12);
    assert_eq!(none.total_pages, 0);
    assert!(none.indicators.is_empty());
    assert_eq!(none.empty_state(), Some(EmptyState::NoSites));

    let sites = vec![site("Quiet", "Quiet Co", at(2024, 1, 1), 1, 5, 0)];
    let alerts = ViewState::default().reduce(ViewAction::ToggleAlertsOnly);
    assert_eq!(
      derive(&sites, &alerts, 12).empty_state(),
      Some(EmptyState::NoAlerts)
    );

    let search = ViewState::default().reduce(ViewAction::SetSearch("loud".into()));
    assert_eq!(
      derive(&sites, &search, 12).empty_state(),
      Some(EmptyState::NoMatches)
    );

    assert_eq!(derive(&sites, &ViewState::default(), 12).empty_state(), None);
  }

  #[test]
  fn page_past_end_is_empty_but_not_an_empty_state() {
    let sites = numbered(3);
    let state = ViewState::default().reduce(ViewAction::GoToPage(9));
    let listing = derive(&sites, &state, 12);
    assert!(listing.rows.is_empty());
    assert_eq!(listing.empty_state(), None);
  }

  #[test]
  fn sort_key_cycles_in_menu_order() {
    assert_eq!(SortKey::Alphabetical.next(), SortKey::Newest);
    assert_eq!(SortKey::Newest.next(), SortKey::ActiveFeeds);
    assert_eq!(SortKey::ActiveFeeds.next(), SortKey::Alphabetical);
  }

  #[test]
  fn sort_key_parses_dashboard_values() {
    assert_eq!("activeFeeds".parse::<SortKey>().unwrap(), SortKey::ActiveFeeds);
    assert_eq!(SortKey::Newest.to_string(), "newest");
    assert!("oldest".parse::<SortKey>().is_err());
  }

  #[test]
  fn accents_sort_with_their_base_letter() {
    assert_eq!(collate("Émile", "Zeta"), Ordering::Less);
    assert_eq!(collate("éclair", "eclipse"), Ordering::Less);
    assert_eq!(collate("eclair", "éclair"), Ordering::Less);
    assert_eq!(collate("apple", "Apple"), Ordering::Less);
    assert_eq!(collate("Zoë", "Zoë"), Ordering::Equal);

    let sites = vec![
      site("Zeta", "Z", at(2024, 1, 1), 0, 5, 0),
      site("Émile Bakery", "E", at(2024, 1, 1), 0, 5, 0),
      site("eclipse", "E", at(2024, 1, 1), 0, 5, 0),
      site("éclair", "E", at(2024, 1, 1), 0, 5, 0),
    ];
    let listing = derive(&sites, &ViewState::default(), 12);
    assert_eq!(names(&listing), ["éclair", "eclipse", "Émile Bakery", "Zeta"]);
  }

  #[test]
  fn page_zero_is_reported_as_first_page() {
    let sites = numbered(26);
    let state = ViewState {
      page: 0,
      ..ViewState::default()
    };
    let listing = derive(&sites, &state, 12);

    assert_eq!(listing.page, 1);
    assert_eq!(listing.rows.len(), 12);
    assert_eq!(listing.rows[0].site.name, "Site 00");
    assert!(listing.indicators.contains(&PageIndicator::Page(1)));
    assert!(!listing.has_prev_page());
  }
}
