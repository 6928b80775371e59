use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub accent: Color,
  pub muted: Color,
  pub border: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub active: Color,
  pub tag: Color,
  pub status: Color,
  pub error: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "Sakura",
    bg: Color::Rgb(30, 24, 32),
    fg: Color::Rgb(238, 228, 236),
    accent: Color::Rgb(255, 217, 102),
    muted: Color::Rgb(150, 136, 150),
    border: Color::Rgb(88, 72, 90),
    highlight_fg: Color::Rgb(30, 24, 32),
    highlight_bg: Color::Rgb(118, 176, 253),
    stripe_bg: Color::Rgb(38, 31, 41),
    active: Color::Rgb(255, 217, 102),
    tag: Color::Rgb(216, 99, 124),
    status: Color::Rgb(148, 210, 189),
    error: Color::Rgb(255, 107, 107),
    key_fg: Color::Rgb(30, 24, 32),
    key_bg: Color::Rgb(255, 217, 102),
  },
  Theme {
    name: "Midnight",
    bg: Color::Rgb(16, 20, 32),
    fg: Color::Rgb(220, 226, 240),
    accent: Color::Rgb(118, 176, 253),
    muted: Color::Rgb(120, 130, 155),
    border: Color::Rgb(52, 62, 88),
    highlight_fg: Color::Rgb(16, 20, 32),
    highlight_bg: Color::Rgb(255, 216, 107),
    stripe_bg: Color::Rgb(22, 27, 42),
    active: Color::Rgb(118, 176, 253),
    tag: Color::Rgb(148, 55, 253),
    status: Color::Rgb(120, 200, 160),
    error: Color::Rgb(240, 96, 96),
    key_fg: Color::Rgb(16, 20, 32),
    key_bg: Color::Rgb(118, 176, 253),
  },
  Theme {
    name: "Paper",
    bg: Color::Rgb(250, 246, 238),
    fg: Color::Rgb(40, 36, 32),
    accent: Color::Rgb(196, 92, 38),
    muted: Color::Rgb(130, 122, 110),
    border: Color::Rgb(200, 190, 175),
    highlight_fg: Color::Rgb(250, 246, 238),
    highlight_bg: Color::Rgb(196, 92, 38),
    stripe_bg: Color::Rgb(242, 236, 224),
    active: Color::Rgb(196, 92, 38),
    tag: Color::Rgb(90, 110, 170),
    status: Color::Rgb(60, 130, 90),
    error: Color::Rgb(190, 40, 40),
    key_fg: Color::Rgb(250, 246, 238),
    key_bg: Color::Rgb(130, 122, 110),
  },
];

/// Index of the theme called `name` (case-insensitive), or the first theme.
pub fn theme_index(name: Option<&str>) -> usize {
  name.and_then(|n| THEMES.iter().position(|t| t.name.eq_ignore_ascii_case(n.trim()))).unwrap_or(0)
}
