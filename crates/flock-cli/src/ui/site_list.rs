//! Site list pane: one card per visible site plus the page strip.

use flock_core::{
  listing::SiteRow,
  pagination::PageIndicator,
  site::BillingStatus,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the site list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let listing = &app.listing;

  let mut title = if app.view.is_filtered() {
    format!(" Sites ({}/{}) ", listing.filtered_count, listing.total_count)
  } else {
    format!(" Sites ({}) ", listing.total_count)
  };
  title.push_str(&format!("· {} ", app.view.sort.label()));
  if app.view.alerts_only {
    title.push_str("· Showing Alerts Only ");
  }

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // search bar
      Constraint::Min(0),    // cards
      Constraint::Length(1), // page strip
    ])
    .split(inner);

  draw_search(f, rows[0], app);

  if let Some(empty) = listing.empty_state() {
    let text = vec![
      Line::from(Span::styled(
        empty.title(),
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(empty.hint(), Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(text), rows[1]);
  } else {
    let items: Vec<ListItem> = listing.rows.iter().map(card).collect();
    let mut state = ListState::default();
    state.select((!items.is_empty()).then_some(app.list_cursor));
    f.render_stateful_widget(
      List::new(items).highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
      rows[1],
      &mut state,
    );
  }

  f.render_widget(Paragraph::new(page_strip(app)), rows[2]);
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
  let text = if app.search_active {
    format!("/{}_", app.view.search)
  } else if app.view.search.is_empty() {
    "Search sites or clients…  (/)".to_string()
  } else {
    format!("/{}", app.view.search)
  };
  let style = if app.search_active || !app.view.search.is_empty() {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  f.render_widget(Paragraph::new(text).style(style), area);
}

/// Two lines per site: name and client, then the counters.
fn card(row: &SiteRow) -> ListItem<'static> {
  let site = &row.site;
  let alert = row.alert;

  let mut headline = vec![Span::styled(
    site.name.clone(),
    Style::default().add_modifier(Modifier::BOLD),
  )];
  headline.push(Span::styled(
    format!("  {}", site.client),
    Style::default().fg(Color::Gray),
  ));
  if alert.has_alerts() {
    let plural = if alert.total_alerts > 1 { "s" } else { "" };
    headline.push(Span::styled(
      format!("  ⚠ {} Active Alert{plural}", alert.total_alerts),
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
  }
  if site.billing.status == BillingStatus::Suspended {
    headline.push(Span::styled("  suspended", Style::default().fg(Color::Red)));
  }

  let feeds_style = if alert.feeds_maxed_out {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::Green)
  };
  let details = Line::from(vec![
    Span::raw("    "),
    Span::styled(format!("{} users", site.users), Style::default().fg(Color::Blue)),
    Span::raw("  "),
    Span::styled(
      format!("{}/{} feeds", site.active_feeds, site.feed_limit),
      feeds_style,
    ),
    Span::styled(
      format!("  created {}", site.created_at.format("%Y-%m-%d")),
      Style::default().fg(Color::DarkGray),
    ),
  ]);

  ListItem::new(vec![Line::from(headline), details])
}

fn page_strip(app: &App) -> Line<'static> {
  let listing = &app.listing;
  let mut spans = Vec::new();

  let arrow = |enabled: bool, glyph: &'static str| {
    let color = if enabled { Color::White } else { Color::DarkGray };
    Span::styled(glyph, Style::default().fg(color))
  };

  spans.push(arrow(listing.has_prev_page(), "‹ "));
  for indicator in &listing.indicators {
    spans.push(match indicator {
      PageIndicator::Page(n) if *n == listing.page => Span::styled(
        format!("[{n}] "),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      PageIndicator::Page(n) => Span::raw(format!("{n} ")),
      PageIndicator::Ellipsis => Span::styled("… ", Style::default().fg(Color::DarkGray)),
    });
  }
  spans.push(arrow(listing.has_next_page(), "›"));

  Line::from(spans)
}
