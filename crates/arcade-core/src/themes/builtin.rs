//! Themes shipped with the arcade

use once_cell::sync::Lazy;

use super::{Theme, ThemeColors};

/// Name of the theme used when nothing else is selected
pub const DEFAULT_THEME: &str = "Classic";

/// Built-in themes in menu order
pub static BUILTIN_THEMES: Lazy<Vec<Theme>> =
    Lazy::new(|| vec![classic(), neon(), minimal(), dark(), retro()]);

/// Look up a built-in theme by name, ignoring case
pub fn find(name: &str) -> Option<&'static Theme> {
    BUILTIN_THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

pub fn is_builtin(name: &str) -> bool {
    find(name).is_some()
}

fn palette(hex: [&str; 14]) -> ThemeColors {
    let [
        primary,
        secondary,
        accent,
        background,
        text,
        text_dim,
        success,
        warning,
        error,
        game_area,
        player,
        enemy,
        bullet,
        border,
    ] = hex.map(String::from);
    ThemeColors {
        primary,
        secondary,
        accent,
        background,
        text,
        text_dim,
        success,
        warning,
        error,
        game_area,
        player,
        enemy,
        bullet,
        border,
    }
}

pub fn classic() -> Theme {
    Theme::new(DEFAULT_THEME, "Original ArcadeTUI theme", ThemeColors::default())
}

/// Hot pink and electric blue
pub fn neon() -> Theme {
    Theme::new(
        "Neon",
        "Bright neon colors for a cyberpunk feel",
        palette([
            "#FF0080", "#00FF80", "#0080FF", "#000000", "#FFFFFF", "#808080", "#00FF80",
            "#FFFF00", "#FF4040", "#FF0080", "#00FF80", "#FF4040", "#FFFFFF", "#0080FF",
        ]),
    )
}

/// Whites and grays only
pub fn minimal() -> Theme {
    Theme::new(
        "Minimal",
        "Clean monochrome theme",
        palette([
            "#FFFFFF", "#C0C0C0", "#808080", "#000000", "#FFFFFF", "#808080", "#FFFFFF",
            "#C0C0C0", "#808080", "#FFFFFF", "#FFFFFF", "#808080", "#C0C0C0", "#808080",
        ]),
    )
}

pub fn dark() -> Theme {
    Theme::new(
        "Dark",
        "Dark theme with muted colors",
        palette([
            "#4080FF", "#8080FF", "#40FF80", "#000000", "#C0C0C0", "#606060", "#40FF80",
            "#FFFF40", "#FF4040", "#C0C0C0", "#4080FF", "#FF4040", "#C0C0C0", "#606060",
        ]),
    )
}

/// 80s cabinet orange, yellow and magenta
pub fn retro() -> Theme {
    Theme::new(
        "Retro",
        "Classic 80s arcade colors",
        palette([
            "#FF8000", "#FFFF00", "#FF0080", "#000000", "#FFFFFF", "#808080", "#00FF00",
            "#FFFF00", "#FF0000", "#FFFFFF", "#FF8000", "#FF0080", "#FFFF00", "#00FF00",
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::{ColorRole, Rgb};

    #[test]
    fn test_five_builtins_in_order() {
        let names: Vec<_> = BUILTIN_THEMES.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Classic", "Neon", "Minimal", "Dark", "Retro"]);
    }

    #[test]
    fn test_builtin_palettes_are_valid_hex() {
        for theme in BUILTIN_THEMES.iter() {
            for role in ColorRole::ALL {
                assert!(
                    Rgb::from_hex(theme.hex(role)).is_some(),
                    "{} {}",
                    theme.name,
                    role.key()
                );
            }
            assert_eq!(theme.author, "ArcadeTUI");
        }
    }

    #[test]
    fn test_palette_order_matches_roles() {
        let neon = neon();
        assert_eq!(neon.hex(ColorRole::Primary), "#FF0080");
        assert_eq!(neon.hex(ColorRole::TextDim), "#808080");
        assert_eq!(neon.hex(ColorRole::GameArea), "#FF0080");
        assert_eq!(neon.hex(ColorRole::Border), "#0080FF");
        assert_eq!(retro().hex(ColorRole::Player), "#FF8000");
    }

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(find("neon").map(|t| t.name.as_str()), Some("Neon"));
        assert!(is_builtin("RETRO"));
        assert!(find("Ocean").is_none());
    }
}
