//! `flock`: agency dashboard for the sites whose social feeds we embed.
//!
//! # Usage
//!
//! ```
//! flock                                  # terminal UI over the demo sites
//! flock --seed 7 --sites 40              # terminal UI over generated sites
//! flock list --search tech --sort newest
//! flock feeds 00000000-0000-0000-0000-000000000001 --json
//! ```

mod app;
mod form;
mod report;
mod settings;
mod ui;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flock_core::{
  listing::{SortKey, derive},
  store::SiteStore,
  view::{ViewAction, ViewState},
};
use flock_store_memory::MemoryStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::DashboardConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "flock", version, about = "Agency dashboard for embedded social feeds")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "flock.toml")]
  config: PathBuf,

  /// Generate mock sites from this seed instead of the demo set.
  #[arg(long, env = "FLOCK_SEED")]
  seed: Option<u64>,

  /// Number of sites to generate when seeded.
  #[arg(long = "sites", env = "FLOCK_SITE_COUNT")]
  site_count: Option<usize>,

  /// Sites per page.
  #[arg(long, env = "FLOCK_PAGE_SIZE")]
  page_size: Option<usize>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Interactive terminal UI (the default).
  Tui,
  /// Print one page of the site list.
  List {
    /// Case-insensitive match against site or client name.
    #[arg(long, default_value = "")]
    search: String,
    /// alphabetical, newest or activeFeeds.
    #[arg(long, default_value = "alphabetical")]
    sort: SortKey,
    /// Only sites with stored alerts.
    #[arg(long)]
    alerts_only: bool,
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
  },
  /// Print the feeds embedded on one site.
  Feeds {
    site_id: Uuid,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Flags override the config file, which overrides defaults.
  let mut cfg = DashboardConfig::load(&cli.config)?;
  if cli.seed.is_some() {
    cfg.seed = cli.seed;
  }
  if let Some(count) = cli.site_count {
    cfg.site_count = count;
  }
  if let Some(size) = cli.page_size {
    cfg.page_size = size;
  }

  let command = cli.command.unwrap_or(Command::Tui);
  init_tracing(&cfg, matches!(command, Command::Tui))?;

  let store = match cfg.seed {
    Some(seed) => MemoryStore::seeded(seed, cfg.site_count),
    None => MemoryStore::sample(Utc::now()),
  };
  tracing::info!(seed = ?cfg.seed, page_size = cfg.page_size, "store ready");

  match command {
    Command::Tui => run_tui(store, cfg.page_size),
    Command::List {
      search,
      sort,
      alerts_only,
      page,
      json,
    } => {
      let view = list_view(search, sort, alerts_only, page);
      let listing = derive(&store.snapshot()?, &view, cfg.page_size);
      if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
      } else {
        print!("{}", report::ListingReport(&listing));
      }
      Ok(())
    }
    Command::Feeds { site_id, json } => {
      let site = store
        .get_site(site_id)?
        .with_context(|| format!("Site not found: {site_id}"))?;
      let feeds = store.list_feeds(site_id)?;
      if json {
        println!("{}", serde_json::to_string_pretty(&feeds)?);
      } else {
        print!(
          "{}",
          report::FeedsReport {
            site:  &site,
            feeds: &feeds,
            now:   Utc::now(),
          }
        );
      }
      Ok(())
    }
  }
}

/// The view a `list` invocation asks for, built through the same transitions
/// the dashboard uses.
fn list_view(search: String, sort: SortKey, alerts_only: bool, page: usize) -> ViewState {
  ViewState::default()
    .reduce(ViewAction::SetSearch(search))
    .reduce(ViewAction::SetSort(sort))
    .reduce(ViewAction::SetAlertsOnly(alerts_only))
    .reduce(ViewAction::GoToPage(page))
}

/// Logs go to `log_file` when configured. Otherwise the terminal UI runs
/// silent and the one-shot commands log warnings to stderr.
fn init_tracing(cfg: &DashboardConfig, interactive: bool) -> Result<()> {
  let filter = || {
    EnvFilter::builder()
      .with_default_directive(LevelFilter::WARN.into())
      .from_env_lossy()
  };

  if let Some(path) = &cfg.log_file {
    let file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(filter())
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  } else if !interactive {
    tracing_subscriber::fmt()
      .with_env_filter(filter())
      .with_writer(io::stderr)
      .init();
  }
  Ok(())
}

fn run_tui(store: MemoryStore, page_size: usize) -> Result<()> {
  let mut app = App::new(store, page_size)?;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250))? {
      continue;
    }
    match event::read()? {
      Event::Key(key) => {
        if !app.handle_key(key)? {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn list_view_applies_every_flag() {
    let view = list_view("corp".into(), SortKey::Newest, true, 2);
    assert_eq!(view.search, "corp");
    assert_eq!(view.sort, SortKey::Newest);
    assert!(view.alerts_only);
    assert_eq!(view.page, 2);
  }

  #[test]
  fn list_view_treats_page_zero_as_first() {
    assert_eq!(list_view(String::new(), SortKey::default(), false, 0).page, 1);
  }
}
