mod app;
mod cli;
mod config;
mod input;
mod logging;
mod player;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::time::Duration;
use tracing::info;

use vodshelf::constants::constants;
use vodshelf::{Archive, QueryConfig};

use app::App;
use cli::Args;
use config::Config;
use player::ExternalPlayer;

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), "vodshelf", &mut std::io::stdout());
    return Ok(());
  }

  let _log_guard = logging::init_logging()?;
  let config = Config::load();

  let catalog_path = args
    .catalog
    .clone()
    .or_else(|| config.catalog_path.clone())
    .context("No catalog given: pass a path or set catalog_path in prefs.toml")?;

  let query_config = QueryConfig {
    tag_filter: cli::resolve_tag_filter(args.filter, config.tag_filter.as_deref()),
    search_text: String::new(),
    sort_order: cli::resolve_sort_order(args.sort, config.sort_order.as_deref()),
  };
  let archive = Archive::load(&catalog_path, query_config)
    .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

  let command = config.player_command.clone().unwrap_or_else(|| constants().player_command.clone());
  let player = ExternalPlayer::new(command, !args.no_player);
  let mut app = App::new(archive, player, theme::theme_index(config.theme_name.as_deref()));
  info!(catalog = %catalog_path.display(), player = app.player.is_enabled(), "vodshelf: starting");

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, &mut app).await;
  ratatui::restore();
  app.player.stop().await.context("Failed to stop player on exit")?;
  info!("vodshelf: exiting");
  result
}

async fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
  loop {
    app.tick().await;

    terminal.draw(|frame| ui::ui(frame, app))?;

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(app, key).await?;
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }
  Ok(())
}
