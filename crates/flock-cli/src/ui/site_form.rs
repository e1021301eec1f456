//! Add/edit site popup.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::form::{Field, SiteForm};

/// Render `form` centred over `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &SiteForm) {
  let popup = centered(area, 52, 12);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(form.title())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let mut lines = Vec::new();
  for field in Field::ALL {
    let focused = field == form.focus;
    let label_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };
    lines.push(Line::from(Span::styled(field.label(), label_style)));
    lines.push(Line::from(format!("  {}{cursor}", form.value(field))));
  }
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "Enter save  Esc cancel",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  cell
}
