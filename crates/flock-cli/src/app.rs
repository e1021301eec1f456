//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flock_core::{
  feed::Feed,
  listing::{SiteListing, derive},
  site::{Site, Sites},
  store::SiteStore,
  view::{ViewAction, ViewState},
};
use flock_store_memory::MemoryStore;

use crate::form::{FormMode, SiteForm};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The paged site cards.
  SiteList,
  /// Feeds embedded on the selected site.
  Feeds,
  /// The add/edit form, drawn over the site list.
  Form,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  pub store: MemoryStore,

  /// The collection as of the last write.
  pub sites: Sites,

  /// Search, sort, alerts-only and page.
  pub view: ViewState,

  pub page_size: usize,

  /// The page currently on screen, derived from `sites` and `view`.
  pub listing: SiteListing,

  /// Whether the user is typing a search term.
  pub search_active: bool,

  /// Cursor position within the current page.
  pub list_cursor: usize,

  /// Site whose feeds are shown on the feeds screen.
  pub selected_site: Option<Site>,

  pub feeds: Vec<Feed>,

  /// Scroll offset within the feeds list.
  pub feed_scroll: usize,

  /// Open add/edit form, if any.
  pub form: Option<SiteForm>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(store: MemoryStore, page_size: usize) -> anyhow::Result<Self> {
    let sites = store.snapshot()?;
    let view = ViewState::default();
    let listing = derive(&sites, &view, page_size);
    Ok(Self {
      screen: Screen::SiteList,
      store,
      sites,
      view,
      page_size,
      listing,
      search_active: false,
      list_cursor: 0,
      selected_site: None,
      feeds: Vec::new(),
      feed_scroll: 0,
      form: None,
      status_msg: String::new(),
    })
  }

  // ── Derived state ─────────────────────────────────────────────────────────

  /// Re-read the store and recompute the visible page.
  fn reload(&mut self) -> anyhow::Result<()> {
    self.sites = self.store.snapshot()?;
    self.relist();
    Ok(())
  }

  fn relist(&mut self) {
    self.listing = derive(&self.sites, &self.view, self.page_size);
    let rows = self.listing.rows.len();
    if self.list_cursor >= rows {
      self.list_cursor = rows.saturating_sub(1);
    }
  }

  /// Apply a view transition and recompute the page.
  pub fn dispatch(&mut self, action: ViewAction) {
    let moved = matches!(
      action,
      ViewAction::NextPage { .. } | ViewAction::PrevPage | ViewAction::GoToPage(_)
    );
    self.view = std::mem::take(&mut self.view).reduce(action);
    if !moved || self.listing.page != self.view.page {
      self.list_cursor = 0;
    }
    self.relist();
  }

  /// The site under the list cursor, if any.
  pub fn cursor_site(&self) -> Option<&Site> {
    self.listing.rows.get(self.list_cursor).map(|row| &row.site)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // A status message lasts until the next key press.
    self.status_msg.clear();

    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.search_active {
      self.handle_search_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::SiteList => self.handle_list_key(key),
      Screen::Feeds => Ok(self.handle_feeds_key(key)),
      Screen::Form => {
        self.handle_form_key(key)?;
        Ok(true)
      }
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.dispatch(ViewAction::SetSearch(String::new()));
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        let mut search = self.view.search.clone();
        search.pop();
        self.dispatch(ViewAction::SetSearch(search));
      }
      KeyCode::Char(c) => {
        let search = format!("{}{c}", self.view.search);
        self.dispatch(ViewAction::SetSearch(search));
      }
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Cursor
      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.listing.rows.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Pages
      KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
        self.dispatch(ViewAction::NextPage {
          total_pages: self.listing.total_pages,
        });
      }
      KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
        self.dispatch(ViewAction::PrevPage);
      }
      KeyCode::Char(d @ '1'..='9') => {
        let page = d.to_digit(10).map_or(1, |n| n as usize);
        if page <= self.listing.total_pages {
          self.dispatch(ViewAction::GoToPage(page));
        }
      }

      // Filters
      KeyCode::Char('/') => self.search_active = true,
      KeyCode::Char('a') => self.dispatch(ViewAction::ToggleAlertsOnly),
      KeyCode::Char('s') => self.dispatch(ViewAction::SetSort(self.view.sort.next())),

      // Feeds
      KeyCode::Enter => {
        if let Some(site) = self.cursor_site().cloned() {
          self.open_feeds(site)?;
        }
      }

      // Forms
      KeyCode::Char('n') | KeyCode::Char('+') => {
        self.form = Some(SiteForm::add());
        self.screen = Screen::Form;
      }
      KeyCode::Char('e') => {
        if let Some(site) = self.cursor_site() {
          self.form = Some(SiteForm::edit(site));
          self.screen = Screen::Form;
        }
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_feeds_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::SiteList;
        self.selected_site = None;
        self.feeds.clear();
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if self.feed_scroll + 1 < self.feeds.len() {
          self.feed_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.feed_scroll = self.feed_scroll.saturating_sub(1);
      }

      _ => {}
    }
    true
  }

  fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
    let Some(form) = self.form.as_mut() else {
      self.screen = Screen::SiteList;
      return Ok(());
    };

    match key.code {
      KeyCode::Esc => self.close_form(),
      KeyCode::Tab | KeyCode::Down => form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
      KeyCode::Backspace => form.pop(),
      KeyCode::Char(c) => form.push(c),
      KeyCode::Enter => self.submit_form()?,
      _ => {}
    }
    Ok(())
  }

  fn close_form(&mut self) {
    self.form = None;
    self.screen = Screen::SiteList;
  }

  /// Send the open form to the store. A validation failure keeps the form
  /// open and reports the problem in the status bar.
  fn submit_form(&mut self) -> anyhow::Result<()> {
    let Some(form) = self.form.as_ref() else {
      return Ok(());
    };

    let (result, title, verb) = match form.mode {
      FormMode::Add => (
        self.store.add_site(form.to_add_request()),
        "Site Created",
        "added",
      ),
      FormMode::Edit(id) => (
        self.store.update_site(form.to_update_request(id)),
        "Site Updated",
        "updated",
      ),
    };

    match result {
      Ok(site) => {
        self.status_msg =
          format!("{title}: {} has been successfully {verb}.", site.name);
        self.close_form();
        self.reload()
      }
      Err(e) => match e.validation() {
        Some(v) => {
          tracing::info!(error = %v, "form rejected");
          self.status_msg = format!("Validation Error: {v}");
          Ok(())
        }
        None => Err(e.into()),
      },
    }
  }

  /// Transition to the feeds screen for `site`.
  fn open_feeds(&mut self, site: Site) -> anyhow::Result<()> {
    self.feeds = self.store.list_feeds(site.site_id)?;
    self.feed_scroll = 0;
    self.selected_site = Some(site);
    self.screen = Screen::Feeds;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use flock_core::listing::SortKey;

  use super::*;

  fn app() -> App {
    App::new(MemoryStore::sample(Utc::now()), 4).unwrap()
  }

  fn press(app: &mut App, code: KeyCode) -> bool {
    app
      .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
      .unwrap()
  }

  fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  #[test]
  fn starts_on_first_page_of_sample() {
    let app = app();
    assert_eq!(app.listing.total_pages, 2);
    assert_eq!(app.listing.rows.len(), 4);
    assert_eq!(app.listing.rows[0].site.name, "E-commerce Store");
  }

  #[test]
  fn alerts_toggle_filters_stored_alerts() {
    let mut app = app();
    press(&mut app, KeyCode::Char('a'));
    assert!(app.view.alerts_only);
    let names: Vec<_> = app.listing.rows.iter().map(|r| r.site.name.as_str()).collect();
    assert_eq!(
      names,
      ["Educational Platform", "Local Restaurant Chain", "TechCorp Website"]
    );
  }

  #[test]
  fn search_typing_filters_and_escape_clears() {
    let mut app = app();
    press(&mut app, KeyCode::Right);
    assert_eq!(app.view.page, 2);

    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "corp");
    assert_eq!(app.view.page, 1);
    assert_eq!(app.listing.filtered_count, 1);

    press(&mut app, KeyCode::Esc);
    assert!(!app.search_active);
    assert_eq!(app.listing.filtered_count, 6);
  }

  #[test]
  fn sort_key_cycles() {
    let mut app = app();
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.view.sort, SortKey::Newest);
    assert_eq!(app.listing.rows[0].site.name, "E-commerce Store");
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.listing.rows[0].site.name, "Educational Platform");
  }

  #[test]
  fn paging_stops_at_last_page() {
    let mut app = app();
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.view.page, 2);
    assert_eq!(app.listing.rows.len(), 2);
  }

  #[test]
  fn enter_opens_feeds_for_cursor_site() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::Feeds);
    assert_eq!(
      app.selected_site.as_ref().map(|s| s.name.as_str()),
      Some("Educational Platform")
    );
    assert_eq!(app.feeds.len(), 3);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::SiteList);
  }

  #[test]
  fn invalid_form_stays_open() {
    let mut app = app();
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.screen, Screen::Form);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::Form);
    assert!(app.status_msg.starts_with("Validation Error"));
    assert_eq!(app.sites.len(), 6);
  }

  #[test]
  fn valid_form_adds_site() {
    let mut app = app();
    press(&mut app, KeyCode::Char('n'));
    type_str(&mut app, "Aardvark Zoo");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "Wildlife Trust");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::SiteList);
    assert!(app.status_msg.starts_with("Site Created: Aardvark Zoo"));
    assert_eq!(app.sites.len(), 7);
    assert_eq!(app.listing.rows[0].site.name, "Aardvark Zoo");
    assert_eq!(app.listing.aggregates.total_sites, 7);
  }

  #[test]
  fn status_message_clears_on_next_key() {
    let mut app = app();
    press(&mut app, KeyCode::Char('n'));
    type_str(&mut app, "Aardvark Zoo");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "Wildlife Trust");
    press(&mut app, KeyCode::Enter);
    assert!(!app.status_msg.is_empty());

    press(&mut app, KeyCode::Down);
    assert!(app.status_msg.is_empty());
  }

  #[test]
  fn edit_form_updates_cursor_site() {
    let mut app = app();
    press(&mut app, KeyCode::Char('e'));
    let form = app.form.as_mut().unwrap();
    form.name = "Online Store".into();
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::SiteList);
    assert!(app.sites.iter().any(|s| s.name == "Online Store"));
    assert_eq!(app.sites.len(), 6);
  }

  #[test]
  fn q_quits_from_list() {
    let mut app = app();
    assert!(!press(&mut app, KeyCode::Char('q')));
  }
}
