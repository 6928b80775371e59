use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, BorderType, List, ListItem, Padding, Paragraph},
};

use vodshelf::timecode::format_offset;
use vodshelf::{Description, VideoMode};

use crate::app::{App, AppMode};
use crate::theme::Theme;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` display columns, appending "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
  use unicode_width::UnicodeWidthChar;
  if display_width(s, usize::MAX) <= max_width {
    return s.to_string();
  }
  let budget = max_width.saturating_sub(1);
  let mut used = 0;
  let mut out = String::new();
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > budget {
      break;
    }
    used += w;
    out.push(c);
  }
  out.push('…');
  out
}

fn rounded_block<'a>(title: Line<'a>, border: ratatui::style::Color) -> Block<'a> {
  Block::bordered().title(title).border_type(BorderType::Rounded).border_style(Style::default().fg(border))
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, input_area, footer_area] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Min(6),
    Constraint::Length(1),
    Constraint::Length(3),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  let [left_area, right_area] =
    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(main_area);

  render_header(frame, theme, header_area);
  render_now_playing(frame, app, left_area);
  render_songs(frame, app, right_area);
  render_status(frame, app, status_area);
  render_input(frame, app, input_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
  let left = Line::from(Span::styled(" ♪ vodshelf ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn info_row<'a>(theme: &Theme, label: &'a str, value: String, width: usize) -> Line<'a> {
  let value_w = width.saturating_sub(label.chars().count());
  Line::from(vec![
    Span::styled(label, Style::default().fg(theme.muted)),
    Span::styled(truncate_str(&value, value_w), Style::default().fg(theme.fg)),
  ])
}

fn description_lines(theme: &Theme, d: &Description, offset_seconds: u32, width: usize) -> Vec<Line<'static>> {
  let mut lines = vec![
    Line::from(Span::styled(truncate_str(&d.title, width), Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))),
    Line::from(""),
    info_row(theme, "Uploaded  ", d.published_at.format("%Y-%m-%d").to_string(), width),
  ];
  if !d.credited_artist.is_empty() {
    lines.push(info_row(theme, "Vocal     ", d.credited_artist.display(), width));
  }
  if d.mode == VideoMode::ShortformPiece
    && let Some(original) = d.timestamps.first().and_then(|t| t.original_artist.as_ref())
  {
    lines.push(info_row(theme, "Original  ", original.display(), width));
  }
  if d.mode == VideoMode::LongformRecording {
    lines.push(info_row(theme, "Position  ", format_offset(offset_seconds), width));
  }

  let mut tag_spans = vec![Span::styled("Tags      ", Style::default().fg(theme.muted))];
  if d.tags.is_empty() {
    tag_spans.push(Span::styled("—", Style::default().fg(theme.muted)));
  } else {
    for (i, tag) in d.tags.iter().enumerate() {
      if i > 0 {
        tag_spans.push(Span::raw(" "));
      }
      tag_spans.push(Span::styled(format!("[{}]", tag), Style::default().fg(theme.tag)));
    }
  }
  lines.push(Line::from(tag_spans));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    truncate_str(&d.external_url, width),
    Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
  )));
  lines
}

fn render_now_playing(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let projection = app.archive.projection();
  let d = &projection.description;
  let inner_w = area.width.saturating_sub(4) as usize;

  let info = description_lines(theme, d, projection.cue.offset_seconds, inner_w);
  let info_h = (info.len() as u16 + 2).min(area.height);
  let [info_area, stamps_area] = Layout::vertical([Constraint::Length(info_h), Constraint::Min(0)]).areas(area);

  let title = Line::from(vec![
    Span::styled(" Now Playing ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled(format!("[{}] ", d.mode.label().to_lowercase()), Style::default().fg(theme.muted)),
  ]);
  let info_block = rounded_block(title, theme.border).padding(Padding::horizontal(1));
  frame.render_widget(Paragraph::new(info).block(info_block), info_area);

  let focused = app.mode == AppMode::Timestamps;
  let border = if focused { theme.accent } else { theme.border };
  let hidden = d.hidden_timestamps(app.timestamps_expanded);
  let stamps_title = if hidden > 0 {
    format!(" Timestamps (+{} more, m) ", hidden)
  } else if d.timestamps.len() > d.visible_timestamps(false).len() {
    " Timestamps (m to collapse) ".to_string()
  } else {
    " Timestamps ".to_string()
  };

  let current_offset = app.archive.selection().current_offset().map(str::to_string);
  let rows: Vec<ListItem> = d
    .visible_timestamps(app.timestamps_expanded)
    .iter()
    .map(|t| {
      let playing = d.mode == VideoMode::LongformRecording && current_offset.as_deref() == Some(t.offset.as_str());
      let marker = if playing { "♪ " } else { "  " };
      let fg = if playing { theme.active } else { theme.fg };
      let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.active)),
        Span::styled(format!("{}  ", t.offset), Style::default().fg(theme.accent)),
      ];
      let artist = t.original_artist.as_ref().map(|a| a.display()).unwrap_or_default();
      let right_w = if artist.is_empty() { 0 } else { display_width(&artist, usize::MAX) + 3 };
      let title_w = inner_w.saturating_sub(t.offset.chars().count() + 4 + right_w);
      spans.push(Span::styled(truncate_str(&t.title, title_w), Style::default().fg(fg)));
      if !artist.is_empty() {
        spans.push(Span::styled(format!(" · {}", artist), Style::default().fg(theme.muted)));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let list = List::new(rows)
    .block(
      Block::bordered()
        .title(stamps_title)
        .title_style(Style::default().fg(border))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border)),
    )
    .highlight_style(if focused {
      Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    });

  frame.render_stateful_widget(list, stamps_area, &mut app.timestamp_state);
}

fn render_songs(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.mode != AppMode::Timestamps;
  let border = if focused { theme.accent } else { theme.border };

  // Inner width: area minus 2 borders minus 2 chars for highlight symbol ("▶ ")
  let inner_w = area.width.saturating_sub(4) as usize;
  let selected = app.list_state.selected();

  let items: Vec<ListItem> = app
    .archive
    .displayed_entries()
    .enumerate()
    .map(|(row, (idx, entry))| {
      let is_selected = Some(row) == selected;
      let is_active = app.archive.is_active(idx);
      let fg = if is_selected {
        theme.highlight_fg
      } else if is_active {
        theme.active
      } else {
        theme.fg
      };
      let bg = if is_selected {
        theme.highlight_bg
      } else if row % 2 == 1 {
        theme.stripe_bg
      } else {
        theme.bg
      };

      let date = app.archive.catalog().published_at(entry).map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
      let right = match entry.mode {
        VideoMode::LongformRecording => format!("{}  {}", entry.song.offset, date),
        VideoMode::ShortformPiece => format!("MV  {}", date),
      };
      let marker = if is_active { "♪ " } else { "" };
      let left = format!("{}{} · {}", marker, entry.song.title, entry.song.performing_artist.display());

      let right_w = right.chars().count();
      let left = truncate_str(&left, inner_w.saturating_sub(right_w + 2));
      let gap = inner_w.saturating_sub(display_width(&left, usize::MAX) + right_w);

      let line = Line::from(vec![
        Span::styled(left, Style::default().fg(fg)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(if is_selected { theme.highlight_fg } else { theme.muted })),
      ]);
      ListItem::new(line).bg(bg)
    })
    .collect();

  let config = app.archive.config();
  let title = format!(
    " {} · {} ({}/{}) ",
    config.tag_filter.label(),
    config.sort_order.label(),
    app.archive.displayed().len(),
    app.archive.catalog().entries().len()
  );

  let list = List::new(items)
    .block(
      Block::bordered()
        .title(title)
        .title_style(Style::default().fg(border).add_modifier(Modifier::BOLD))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border)),
    )
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else if let Some(status) = app.player.last_status() {
    (format!(" ♪ {}", status), Style::default().fg(theme.status))
  } else if let Some(cue) = app.player.current_cue()
    && app.player.is_playing()
  {
    (format!(" ▶ {} from {}", cue.video_id, format_offset(cue.offset_seconds)), Style::default().fg(theme.status))
  } else if !app.player.is_enabled() {
    (" Browse only (player disabled)".to_string(), Style::default().fg(theme.muted))
  } else {
    (" Ready".to_string(), Style::default().fg(theme.muted))
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let border_color = if app.mode == AppMode::Search { theme.accent } else { theme.border };
  let input_block = Block::bordered()
    .title(" Search songs / artists / tags ")
    .title_style(Style::default().fg(border_color))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.search_input, app.search_cursor);

  app.search_scroll = scroll_to_cursor(cursor_col, app.search_scroll, inner_w);

  let visible: String = app
    .search_input
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.search_scroll)
    .take_while(|(start, _, _)| *start < app.search_scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(input_block);
  frame.render_widget(paragraph, area);

  if app.mode == AppMode::Search {
    let cursor_x = area.x + 2 + cursor_col.saturating_sub(app.search_scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

/// Horizontal scroll that keeps the cursor column inside a `width`-column window.
fn scroll_to_cursor(cursor_col: usize, scroll: usize, width: usize) -> usize {
  if cursor_col < scroll {
    cursor_col
  } else if cursor_col >= scroll + width {
    cursor_col.saturating_sub(width) + 1
  } else {
    scroll
  }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let is_playing = app.player.is_playing();
  let keys: Vec<(&str, &str)> = match app.mode {
    AppMode::Browse => {
      let mut k = vec![("Enter", "Play"), ("j/k", "Navigate"), ("r", "Random"), ("f", "Filter"), ("s", "Sort")];
      k.push(("/", "Search"));
      k.push(("Tab", "Timestamps"));
      if is_playing {
        k.push(("^s", "Stop"));
      }
      k.push(("^o", "Browser"));
      k.push(("^e", "Embed"));
      k.push(("q", "Quit"));
      k
    }
    AppMode::Search => vec![("Enter", "Done"), ("↑/↓", "Navigate"), ("Esc", "Clear")],
    AppMode::Timestamps => {
      vec![("Enter", "Jump"), ("j/k", "Navigate"), ("m", "More/less"), ("Tab", "Songs"), ("^o", "Browser")]
    }
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw(" "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}
