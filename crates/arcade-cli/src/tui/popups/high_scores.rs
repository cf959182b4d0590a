//! High scores view: top entries of every cartridge

use arcade_core::scores::{ScoreEntry, ScoreStore};
use arcade_core::themes::ColorRole;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use super::common::{center_rect, popup_block, popup_title, render_popup_background, PopupSize};
use crate::tui::cartridges::Cartridge;
use crate::tui::themes::Palette;

/// Entries shown per game
pub const SHOWN_PER_GAME: usize = 5;

/// Scores loaded once when the view opens
pub struct HighScoresPopup {
    boards: Vec<(String, Vec<ScoreEntry>)>,
}

impl HighScoresPopup {
    pub fn load(cartridges: &[Box<dyn Cartridge>], store: &dyn ScoreStore) -> Self {
        let boards = cartridges
            .iter()
            .map(|c| {
                let mut scores = c.high_scores(store);
                scores.truncate(SHOWN_PER_GAME);
                (c.name().to_string(), scores)
            })
            .collect();
        Self { boards }
    }

    fn lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        if self.boards.is_empty() {
            return vec![Line::styled(
                "No games available",
                palette.style(ColorRole::TextDim),
            )];
        }

        let mut lines = Vec::new();
        for (name, scores) in &self.boards {
            lines.push(Line::styled(
                format!("{name}:"),
                palette.style(ColorRole::Secondary),
            ));
            if scores.is_empty() {
                lines.push(Line::styled(
                    "  No scores yet",
                    palette.style(ColorRole::TextDim),
                ));
            }
            for entry in scores {
                lines.push(Line::styled(
                    format!("  {}: {} ({})", entry.player_name, entry.score, entry.date),
                    palette.style(ColorRole::Text),
                ));
            }
            lines.push(Line::from(""));
        }
        lines
    }

    pub fn render(&self, f: &mut Frame, palette: &Palette) {
        f.render_widget(Block::default().style(palette.background()), f.area());
        let (w, h) = PopupSize::Large.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, palette);

        let block = popup_block(palette);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            Paragraph::new(popup_title("HIGH SCORES", palette)).alignment(Alignment::Center),
            chunks[0],
        );
        f.render_widget(Paragraph::new(self.lines(palette)), chunks[1]);
        f.render_widget(
            Paragraph::new(Line::styled(
                "Press ESC or Q to return to main menu",
                palette.style(ColorRole::TextDim),
            ))
            .alignment(Alignment::Center),
            chunks[2],
        );
    }
}
