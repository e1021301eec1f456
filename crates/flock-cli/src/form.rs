//! The add/edit site form.

use flock_core::{
  request::{AddSiteRequest, UpdateSiteRequest},
  site::Site,
};
use uuid::Uuid;

/// Initial feed limit offered by the add form.
const DEFAULT_FORM_FEED_LIMIT: &str = "5";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Add,
  Edit(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Client,
  Domain,
  FeedLimit,
}

impl Field {
  pub const ALL: [Field; 4] = [Field::Name, Field::Client, Field::Domain, Field::FeedLimit];

  pub fn label(self) -> &'static str {
    match self {
      Field::Name => "Site Name *",
      Field::Client => "Client Name *",
      Field::Domain => "Domain (Optional)",
      Field::FeedLimit => "Feed Limit",
    }
  }
}

/// Raw text of every field plus which one has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteForm {
  pub mode:       FormMode,
  pub name:       String,
  pub client:     String,
  pub domain:     String,
  pub feed_limit: String,
  pub focus:      Field,
}

impl SiteForm {
  pub fn add() -> Self {
    Self {
      mode:       FormMode::Add,
      name:       String::new(),
      client:     String::new(),
      domain:     String::new(),
      feed_limit: DEFAULT_FORM_FEED_LIMIT.to_owned(),
      focus:      Field::Name,
    }
  }

  pub fn edit(site: &Site) -> Self {
    Self {
      mode:       FormMode::Edit(site.site_id),
      name:       site.name.clone(),
      client:     site.client.clone(),
      domain:     site.domain.clone().unwrap_or_default(),
      feed_limit: site.feed_limit.to_string(),
      focus:      Field::Name,
    }
  }

  pub fn title(&self) -> &'static str {
    match self.mode {
      FormMode::Add => " Add New Site ",
      FormMode::Edit(_) => " Edit Site ",
    }
  }

  pub fn value(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Client => &self.client,
      Field::Domain => &self.domain,
      Field::FeedLimit => &self.feed_limit,
    }
  }

  fn focused_mut(&mut self) -> &mut String {
    match self.focus {
      Field::Name => &mut self.name,
      Field::Client => &mut self.client,
      Field::Domain => &mut self.domain,
      Field::FeedLimit => &mut self.feed_limit,
    }
  }

  pub fn push(&mut self, c: char) { self.focused_mut().push(c); }

  pub fn pop(&mut self) { self.focused_mut().pop(); }

  pub fn focus_next(&mut self) { self.shift_focus(1); }

  pub fn focus_prev(&mut self) { self.shift_focus(Field::ALL.len() - 1); }

  fn shift_focus(&mut self, by: usize) {
    let at = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
    self.focus = Field::ALL[(at + by) % Field::ALL.len()];
  }

  pub fn to_add_request(&self) -> AddSiteRequest {
    AddSiteRequest {
      name:       self.name.clone(),
      client:     self.client.clone(),
      domain:     Some(self.domain.clone()),
      feed_limit: self.feed_limit.clone(),
    }
  }

  pub fn to_update_request(&self, site_id: Uuid) -> UpdateSiteRequest {
    UpdateSiteRequest {
      name: Some(self.name.clone()),
      client: Some(self.client.clone()),
      domain: Some(self.domain.clone()),
      feed_limit: Some(self.feed_limit.clone()),
      ..UpdateSiteRequest::new(site_id)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn typing_goes_to_focused_field() {
    let mut form = SiteForm::add();
    form.push('A');
    form.focus_next();
    form.push('B');
    form.pop();
    form.push('C');

    assert_eq!(form.name, "A");
    assert_eq!(form.client, "C");
    assert_eq!(form.feed_limit, "5");
  }

  #[test]
  fn focus_wraps_both_ways() {
    let mut form = SiteForm::add();
    form.focus_prev();
    assert_eq!(form.focus, Field::FeedLimit);
    form.focus_next();
    assert_eq!(form.focus, Field::Name);
  }

  #[test]
  fn edit_form_round_trips_into_update() {
    let site = flock_core::mock::sample_sites()[0].clone();
    let form = SiteForm::edit(&site);
    assert_eq!(form.feed_limit, "10");

    let req = form.to_update_request(site.site_id);
    let updated = req.validate().unwrap().apply(&site);
    assert_eq!(updated, site);
  }
}
