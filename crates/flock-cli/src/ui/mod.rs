//! TUI rendering for every screen.

pub mod feeds;
pub mod site_form;
pub mod site_list;

use chrono::Local;
use flock_core::site::next_invoice_date;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, stats, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(4), // stats
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_stats(f, rows[1], app);

  match app.screen {
    Screen::Feeds => feeds::draw(f, rows[2], app),
    Screen::SiteList => site_list::draw(f, rows[2], app),
    Screen::Form => {
      site_list::draw(f, rows[2], app);
      if let Some(form) = &app.form {
        site_form::draw(f, area, form);
      }
    }
  }

  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let invoice = next_invoice_date(Local::now().date_naive()).format("%B %-d, %Y");

  let left = Span::styled(
    " Flock Agency Dashboard",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("Next invoice {invoice} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Stats ────────────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let totals = app.listing.aggregates;
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(area);

  let alert_color = if totals.sites_with_alerts > 0 {
    Color::Red
  } else {
    Color::White
  };

  let cards = [
    ("Total Sites", totals.total_sites.to_string(), Color::White),
    ("Active Feeds", totals.total_active_feeds.to_string(), Color::Green),
    ("Sites with Alerts", totals.sites_with_alerts.to_string(), alert_color),
    ("Monthly Billing", format!("${}", totals.monthly_billing), Color::Magenta),
  ];

  for ((title, value, color), col) in cards.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .title(format!(" {title} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(*col);
    f.render_widget(block, *col);
    f.render_widget(
      Paragraph::new(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      )),
      inner,
    );
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    Screen::SiteList if app.search_active => (
      "SEARCH",
      "Type to filter  Esc clear  Enter done",
    ),
    Screen::SiteList => (
      "SITES",
      "↑↓ select  ←→ page  / search  a alerts  s sort  Enter feeds  n add  e edit  q quit",
    ),
    Screen::Feeds => ("FEEDS", "↑↓ scroll  Esc back  q quit"),
    Screen::Form => ("FORM", "Tab next field  Enter save  Esc cancel"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
