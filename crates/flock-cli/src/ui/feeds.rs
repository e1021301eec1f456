//! Feeds pane for a single site.

use flock_core::feed::FeedStatus;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, report::ago};

/// Render the feeds of `app.selected_site` into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(site) = &app.selected_site else {
    let block = Block::default().title(" Feeds ").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("Site not found").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let block = Block::default()
    .title(format!(" {} - Feeds ", site.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    Line::from(Span::styled(
      format!("Manage social media feeds for {}", site.client),
      Style::default().fg(Color::Gray),
    )),
    Line::from(Span::styled(
      format!(
        "{} active feeds • {} feed limit • {} feeds total",
        site.active_feeds,
        site.feed_limit,
        app.feeds.len()
      ),
      Style::default().fg(Color::DarkGray),
    )),
    Line::from(""),
  ];

  if app.feeds.is_empty() {
    lines.push(Line::from(Span::styled(
      "No feeds embedded yet.",
      Style::default().fg(Color::DarkGray),
    )));
  }

  let now = chrono::Utc::now();
  for feed in app.feeds.iter().skip(app.feed_scroll) {
    let status_color = match feed.status {
      FeedStatus::Active => Color::Green,
      FeedStatus::Paused => Color::Yellow,
    };
    lines.push(Line::from(vec![
      Span::styled(feed.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
      Span::raw("  "),
      Span::styled(format!("[{}]", feed.status), Style::default().fg(status_color)),
    ]));
    lines.push(Line::from(Span::styled(
      format!(
        "    Embedded in: {}  •  {} posts  •  updated {}",
        feed.embed_location,
        feed.posts,
        ago(feed.last_updated, now)
      ),
      Style::default().fg(Color::Gray),
    )));
  }

  f.render_widget(Paragraph::new(lines), inner);
}
