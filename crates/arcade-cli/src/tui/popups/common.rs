//! Layout and chrome shared by every popup

use arcade_core::themes::ColorRole;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::tui::themes::Palette;

/// Standard popup dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupSize {
    Small,
    Large,
}

impl PopupSize {
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            PopupSize::Small => (52, 12),
            PopupSize::Large => (76, 30),
        }
    }
}

/// A `width`×`height` rect centered in `area`, shrunk to fit
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clear whatever is under the popup and paint the theme background
pub fn render_popup_background(f: &mut Frame, area: Rect, palette: &Palette) {
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(palette.background()), area);
}

pub fn popup_block(palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style())
        .style(palette.background())
}

/// `═══ TITLE ═══` header followed by a blank line
pub fn popup_title(title: &str, palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::styled(
            format!("═══ {title} ═══"),
            palette
                .style(ColorRole::Primary)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ]
}
