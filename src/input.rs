use anyhow::Result;
use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};

use crate::app::{App, AppMode};

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Event Handling ---

pub async fn handle_key_event(app: &mut App, key: event::KeyEvent) -> Result<()> {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
    if app.player.is_playing() {
      app.stop_player().await;
    }
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('o') {
    let url = app.current_watch_url();
    open_in_browser(app, &url);
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('e') {
    let url = app.current_embed_url();
    open_in_browser(app, &url);
    return Ok(());
  }

  match app.mode {
    AppMode::Browse => handle_browse_key(app, key),
    AppMode::Search => handle_search_key(app, key),
    AppMode::Timestamps => handle_timestamps_key(app, key),
  }
  Ok(())
}

fn open_in_browser(app: &mut App, url: &str) {
  // Use platform-appropriate command to open URL in default browser.
  #[cfg(target_os = "macos")]
  let cmd = "open";
  #[cfg(not(target_os = "macos"))]
  let cmd = "xdg-open";
  match std::process::Command::new(cmd)
    .arg(url)
    .stdin(std::process::Stdio::null())
    .stdout(std::process::Stdio::null())
    .stderr(std::process::Stdio::null())
    .spawn()
  {
    Ok(mut child) => {
      // Reap the child in a background thread to avoid zombie processes.
      std::thread::spawn(move || {
        let _ = child.wait();
      });
    }
    Err(e) => {
      app.set_error(format!("Failed to open browser: {}", e));
    }
  }
}

fn handle_browse_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Enter => {
      app.play_highlighted();
    }
    KeyCode::Down | KeyCode::Char('j') => app.move_highlight(1),
    KeyCode::Up | KeyCode::Char('k') => app.move_highlight(-1),
    KeyCode::PageDown => app.move_highlight(10),
    KeyCode::PageUp => app.move_highlight(-10),
    KeyCode::Home | KeyCode::Char('g') => app.highlight_first(),
    KeyCode::End | KeyCode::Char('G') => app.highlight_last(),
    KeyCode::Char('r') => app.play_random(),
    KeyCode::Char('f') => app.cycle_tag_filter(),
    KeyCode::Char('s') => app.toggle_sort_order(),
    KeyCode::Char('/') => {
      app.clear_error();
      app.mode = AppMode::Search;
    }
    KeyCode::Tab => {
      app.mode = AppMode::Timestamps;
    }
    KeyCode::Esc | KeyCode::Char('q') => {
      app.should_quit = true;
    }
    _ => {}
  }
}

fn handle_search_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Char(c) => {
      let byte_idx = char_to_byte_index(&app.search_input, app.search_cursor);
      app.search_input.insert(byte_idx, c);
      app.search_cursor += 1;
      app.apply_search();
    }
    KeyCode::Backspace => {
      if app.search_cursor > 0 {
        app.search_cursor -= 1;
        let byte_idx = char_to_byte_index(&app.search_input, app.search_cursor);
        app.search_input.remove(byte_idx);
        app.apply_search();
      }
    }
    KeyCode::Delete => {
      if app.search_cursor < app.search_input.chars().count() {
        let byte_idx = char_to_byte_index(&app.search_input, app.search_cursor);
        app.search_input.remove(byte_idx);
        app.apply_search();
      }
    }
    KeyCode::Left => {
      app.search_cursor = app.search_cursor.saturating_sub(1);
    }
    KeyCode::Right => {
      if app.search_cursor < app.search_input.chars().count() {
        app.search_cursor += 1;
      }
    }
    KeyCode::Home => {
      app.search_cursor = 0;
    }
    KeyCode::End => {
      app.search_cursor = app.search_input.chars().count();
    }
    // Navigate the narrowed list while typing
    KeyCode::Down => app.move_highlight(1),
    KeyCode::Up => app.move_highlight(-1),
    KeyCode::Enter => {
      app.mode = AppMode::Browse;
    }
    KeyCode::Esc => {
      app.clear_search();
      app.mode = AppMode::Browse;
    }
    _ => {}
  }
}

fn handle_timestamps_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Enter => app.play_highlighted_timestamp(),
    KeyCode::Down | KeyCode::Char('j') => app.move_timestamp(1),
    KeyCode::Up | KeyCode::Char('k') => app.move_timestamp(-1),
    KeyCode::Char('m') => app.toggle_timestamps_expanded(),
    KeyCode::Tab | KeyCode::Esc => {
      app.mode = AppMode::Browse;
    }
    KeyCode::Char('q') => {
      app.should_quit = true;
    }
    _ => {}
  }
}
