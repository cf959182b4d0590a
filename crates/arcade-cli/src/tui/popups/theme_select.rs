//! Theme selection popup
//!
//! Lists built-in and custom themes from a snapshot taken when the popup
//! opens. The popup is drawn in the highlighted theme's own colors so
//! moving the cursor previews it.

use arcade_core::themes::{ColorRole, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::common::{center_rect, popup_block, popup_title, render_popup_background, PopupSize};
use crate::tui::themes::Palette;
use crate::tui::utils::{display_width, truncate_ellipsis};

/// Roles shown in the preview strip, in display order
const PREVIEW_ROLES: [(ColorRole, &str); 6] = [
    (ColorRole::Primary, "Primary"),
    (ColorRole::Secondary, "Secondary"),
    (ColorRole::Accent, "Accent"),
    (ColorRole::Success, "Success"),
    (ColorRole::Warning, "Warning"),
    (ColorRole::Error, "Error"),
];

/// Theme selection popup state
pub struct ThemeSelectPopup {
    themes: Vec<Theme>,
    pub selected_index: usize,
}

impl ThemeSelectPopup {
    /// Open on `themes`, highlighting `current` when present
    pub fn new(themes: Vec<Theme>, current: &str) -> Self {
        let selected_index = themes
            .iter()
            .position(|t| t.name == current)
            .unwrap_or(0);
        Self {
            themes,
            selected_index,
        }
    }

    pub fn next(&mut self) {
        if !self.themes.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.themes.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.themes.is_empty() {
            self.selected_index = self
                .selected_index
                .checked_sub(1)
                .unwrap_or(self.themes.len() - 1);
        }
    }

    pub fn selected(&self) -> Option<&Theme> {
        self.themes.get(self.selected_index)
    }

    pub fn render(&self, f: &mut Frame, fallback: &Palette, current_theme_name: &str) {
        let palette = self
            .selected()
            .map(Palette::from_theme)
            .unwrap_or_else(|| fallback.clone());

        f.render_widget(Block::default().style(palette.background()), f.area());
        let (w, h) = PopupSize::Large.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, &palette);

        let block = popup_block(&palette);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(3),    // Theme list
                Constraint::Length(3), // Preview
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(popup_title("THEME SELECTOR", &palette))
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let visible = chunks[1].height as usize;
        let offset = (self.selected_index + 1).saturating_sub(visible);
        let width = chunks[1].width as usize;
        let lines: Vec<Line> = self
            .themes
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(idx, theme)| {
                let is_selected = idx == self.selected_index;
                let is_active = theme.name == current_theme_name;

                let marker = if is_selected { "► " } else { "  " };
                let active = if is_active { " (ACTIVE)" } else { "" };
                let role = match (is_selected, is_active) {
                    (_, true) => ColorRole::Success,
                    (true, false) => ColorRole::Accent,
                    (false, false) => ColorRole::Text,
                };
                let mut style = palette.style(role);
                if is_selected {
                    style = style.add_modifier(palette.selected);
                }

                let name = format!("{marker}{}{active}", theme.name);
                let rest = width.saturating_sub(display_width(&name));
                let description = format!(" - {}", theme.description);
                Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(
                        truncate_ellipsis(&description, rest).into_owned(),
                        palette.style(ColorRole::TextDim),
                    ),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[1]);

        let preview = vec![
            Line::styled(
                "═══ PREVIEW ═══",
                palette.style(ColorRole::Secondary),
            ),
            preview_line(&palette),
        ];
        f.render_widget(Paragraph::new(preview), chunks[2]);

        let footer = Paragraph::new(Line::styled(
            "Use ↑↓ (W/S) to navigate, ENTER to apply theme, ESC/Q to return",
            palette.style(ColorRole::TextDim),
        ))
        .alignment(Alignment::Center);
        f.render_widget(footer, chunks[3]);
    }
}

/// Role names each drawn in their own color
pub fn preview_line(palette: &Palette) -> Line<'static> {
    let spans: Vec<Span> = PREVIEW_ROLES
        .iter()
        .map(|(role, label)| {
            Span::styled(
                format!("{label} "),
                palette.style(*role).add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::buffer_text;
    use arcade_core::themes::builtin::{self, BUILTIN_THEMES};
    use ratatui::{backend::TestBackend, Terminal};

    fn popup(current: &str) -> ThemeSelectPopup {
        ThemeSelectPopup::new(BUILTIN_THEMES.clone(), current)
    }

    #[test]
    fn test_opens_on_current_theme() {
        assert_eq!(popup("Dark").selected().unwrap().name, "Dark");
        assert_eq!(popup("Missing").selected_index, 0);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut popup = popup("Classic");
        popup.prev();
        assert_eq!(popup.selected().unwrap().name, "Retro");
        popup.next();
        assert_eq!(popup.selected().unwrap().name, "Classic");
        popup.next();
        assert_eq!(popup.selected().unwrap().name, "Neon");
    }

    #[test]
    fn test_empty_list_is_inert() {
        let mut popup = ThemeSelectPopup::new(Vec::new(), "Classic");
        popup.next();
        popup.prev();
        assert!(popup.selected().is_none());
    }

    #[test]
    fn test_render_marks_active_and_selected() {
        let mut popup = popup("Classic");
        popup.next();
        let fallback = Palette::from_theme(&builtin::classic());
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal
            .draw(|f| popup.render(f, &fallback, "Classic"))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("═══ THEME SELECTOR ═══"));
        assert!(text.contains("  Classic (ACTIVE)"));
        assert!(text.contains("► Neon"));
        assert!(text.contains("═══ PREVIEW ═══"));
        assert!(text.contains("Primary Secondary Accent Success Warning Error"));
    }
}
