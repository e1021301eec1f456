//! Dashboard view state and its transition function.
//!
//! The presentation layer keeps one [`ViewState`] value and replaces it with
//! `state.reduce(action)` on every user interaction. Any change to the search
//! term, the alerts-only toggle or the sort key sends the view back to page 1.

use serde::{Deserialize, Serialize};

use crate::listing::SortKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
  pub search:      String,
  pub alerts_only: bool,
  pub sort:        SortKey,
  /// 1-based.
  pub page:        usize,
}

impl Default for ViewState {
  fn default() -> Self {
    Self {
      search:      String::new(),
      alerts_only: false,
      sort:        SortKey::default(),
      page:        1,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
  SetSearch(String),
  ToggleAlertsOnly,
  SetAlertsOnly(bool),
  SetSort(SortKey),
  GoToPage(usize),
  /// Advance one page, stopping at `total_pages`.
  NextPage { total_pages: usize },
  PrevPage,
}

impl ViewState {
  pub fn reduce(self, action: ViewAction) -> Self {
    match action {
      ViewAction::SetSearch(search) => Self {
        search,
        page: 1,
        ..self
      },
      ViewAction::ToggleAlertsOnly => Self {
        alerts_only: !self.alerts_only,
        page: 1,
        ..self
      },
      ViewAction::SetAlertsOnly(alerts_only) => Self {
        alerts_only,
        page: 1,
        ..self
      },
      ViewAction::SetSort(sort) => Self {
        sort,
        page: 1,
        ..self
      },
      ViewAction::GoToPage(page) => Self {
        page: page.max(1),
        ..self
      },
      ViewAction::NextPage { total_pages } => Self {
        page: self.page.saturating_add(1).min(total_pages.max(1)),
        ..self
      },
      ViewAction::PrevPage => Self {
        page: self.page.saturating_sub(1).max(1),
        ..self
      },
    }
  }

  /// Whether any filter narrows the list.
  pub fn is_filtered(&self) -> bool {
    self.alerts_only || !self.search.is_empty()
  }
}
