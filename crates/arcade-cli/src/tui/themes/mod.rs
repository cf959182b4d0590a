//! Theme palette for the TUI
//!
//! Resolves a stored [`Theme`] into ratatui colors and modifiers once, so
//! drawing code only ever asks for a [`ColorRole`].

use arcade_core::themes::{AnsiColor, ColorRole, Theme, ThemeColor};
use ratatui::style::{Color, Modifier, Style};

/// Resolved colors and text styles of one theme
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: String,
    colors: [Color; 14],
    pub logo: Modifier,
    pub menu: Modifier,
    pub selected: Modifier,
    pub border: Modifier,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            name: theme.name.clone(),
            colors: ColorRole::ALL.map(|role| to_color(theme.resolve(role))),
            logo: modifier(&theme.styles.logo_style),
            menu: modifier(&theme.styles.menu_style),
            selected: modifier(&theme.styles.selected_style),
            border: modifier(&theme.styles.border_style),
        }
    }

    pub fn color(&self, role: ColorRole) -> Color {
        self.colors[role as usize]
    }

    /// Foreground style for `role` on the theme background
    pub fn style(&self, role: ColorRole) -> Style {
        Style::default()
            .fg(self.color(role))
            .bg(self.color(ColorRole::Background))
    }

    pub fn background(&self) -> Style {
        Style::default().bg(self.color(ColorRole::Background))
    }

    pub fn border_style(&self) -> Style {
        self.style(ColorRole::Border).add_modifier(self.border)
    }
}

fn to_color(color: ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(rgb) => Color::Rgb(rgb.r, rgb.g, rgb.b),
        ThemeColor::Ansi(ansi) => match ansi {
            AnsiColor::Black => Color::Black,
            AnsiColor::Red => Color::Red,
            AnsiColor::Green => Color::Green,
            AnsiColor::Yellow => Color::Yellow,
            AnsiColor::Blue => Color::Blue,
            AnsiColor::Magenta => Color::Magenta,
            AnsiColor::Cyan => Color::Cyan,
            AnsiColor::White => Color::White,
            AnsiColor::BrightBlack => Color::DarkGray,
        },
    }
}

/// Map a style name from a theme file to a modifier; unknown names are plain
fn modifier(name: &str) -> Modifier {
    match name.trim().to_ascii_lowercase().as_str() {
        "bold" => Modifier::BOLD,
        "italic" => Modifier::ITALIC,
        "underline" | "underlined" => Modifier::UNDERLINED,
        "dim" => Modifier::DIM,
        "reverse" | "reversed" => Modifier::REVERSED,
        _ => Modifier::empty(),
    }
}
