//! Color themes
//!
//! A theme maps semantic color roles to hex colors plus a few named text
//! styles. Themes are plain data here; the TUI turns them into terminal
//! colors. Built-ins live in [`builtin`], user themes are handled by
//! [`ThemeManager`].

pub mod builtin;
mod manager;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use manager::{ThemeFormat, ThemeManager};

/// Errors from loading, downloading or selecting themes
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to download theme: HTTP {0}")]
    HttpStatus(u16),
    #[error("failed to parse theme: {0}")]
    Parse(String),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_author() -> String {
    "ArcadeTUI".to_string()
}

/// A named palette as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_author")]
    pub author: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub styles: ThemeStyles,
}

impl Theme {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        colors: ThemeColors,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: default_version(),
            author: default_author(),
            colors,
            styles: ThemeStyles::default(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ThemeError> {
        serde_json::from_str(content).map_err(|e| ThemeError::Parse(e.to_string()))
    }

    pub fn from_yaml(content: &str) -> Result<Self, ThemeError> {
        serde_yaml::from_str(content).map_err(|e| ThemeError::Parse(e.to_string()))
    }

    /// Raw hex string configured for `role`
    pub fn hex(&self, role: ColorRole) -> &str {
        let c = &self.colors;
        match role {
            ColorRole::Primary => &c.primary,
            ColorRole::Secondary => &c.secondary,
            ColorRole::Accent => &c.accent,
            ColorRole::Background => &c.background,
            ColorRole::Text => &c.text,
            ColorRole::TextDim => &c.text_dim,
            ColorRole::Success => &c.success,
            ColorRole::Warning => &c.warning,
            ColorRole::Error => &c.error,
            ColorRole::GameArea => &c.game_area,
            ColorRole::Player => &c.player,
            ColorRole::Enemy => &c.enemy,
            ColorRole::Bullet => &c.bullet,
            ColorRole::Border => &c.border,
        }
    }

    /// Concrete color for `role`: the configured hex if it parses, else the
    /// role's fallback ANSI color.
    pub fn resolve(&self, role: ColorRole) -> ThemeColor {
        match Rgb::from_hex(self.hex(role)) {
            Some(rgb) => ThemeColor::Rgb(rgb),
            None => ThemeColor::Ansi(role.fallback()),
        }
    }
}

/// Hex colors per role. Missing keys take the Classic palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub text_dim: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub game_area: String,
    pub player: String,
    pub enemy: String,
    pub bullet: String,
    pub border: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#00FFFF".into(),
            secondary: "#FFFF00".into(),
            accent: "#00FF00".into(),
            background: "#000000".into(),
            text: "#FFFFFF".into(),
            text_dim: "#808080".into(),
            success: "#00FF00".into(),
            warning: "#FFFF00".into(),
            error: "#FF0000".into(),
            game_area: "#FFFFFF".into(),
            player: "#FFFF00".into(),
            enemy: "#FF0000".into(),
            bullet: "#FFFFFF".into(),
            border: "#FFFFFF".into(),
        }
    }
}

/// Named text styles (`bold`, `normal`, `italic`, `underline`, `dim`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeStyles {
    pub logo_style: String,
    pub menu_style: String,
    pub selected_style: String,
    pub border_style: String,
}

impl Default for ThemeStyles {
    fn default() -> Self {
        Self {
            logo_style: "bold".into(),
            menu_style: "normal".into(),
            selected_style: "bold".into(),
            border_style: "normal".into(),
        }
    }
}

/// Semantic color slots that UI code draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    TextDim,
    Success,
    Warning,
    Error,
    GameArea,
    Player,
    Enemy,
    Bullet,
    Border,
}

impl ColorRole {
    pub const ALL: [ColorRole; 14] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Background,
        ColorRole::Text,
        ColorRole::TextDim,
        ColorRole::Success,
        ColorRole::Warning,
        ColorRole::Error,
        ColorRole::GameArea,
        ColorRole::Player,
        ColorRole::Enemy,
        ColorRole::Bullet,
        ColorRole::Border,
    ];

    /// Key used in theme files
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Text => "text",
            ColorRole::TextDim => "textDim",
            ColorRole::Success => "success",
            ColorRole::Warning => "warning",
            ColorRole::Error => "error",
            ColorRole::GameArea => "gameArea",
            ColorRole::Player => "player",
            ColorRole::Enemy => "enemy",
            ColorRole::Bullet => "bullet",
            ColorRole::Border => "border",
        }
    }

    /// ANSI color used when the configured value is not a valid hex color
    pub fn fallback(self) -> AnsiColor {
        match self {
            ColorRole::Primary => AnsiColor::Cyan,
            ColorRole::Secondary | ColorRole::Warning | ColorRole::Player => AnsiColor::Yellow,
            ColorRole::Accent | ColorRole::Success => AnsiColor::Green,
            ColorRole::Background => AnsiColor::Black,
            ColorRole::TextDim => AnsiColor::BrightBlack,
            ColorRole::Error | ColorRole::Enemy => AnsiColor::Red,
            ColorRole::Text | ColorRole::GameArea | ColorRole::Bullet | ColorRole::Border => {
                AnsiColor::White
            }
        }
    }
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (case-insensitive). Anything else is `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Basic terminal palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
}

/// A role's resolved color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Rgb(Rgb),
    Ansi(AnsiColor),
}
