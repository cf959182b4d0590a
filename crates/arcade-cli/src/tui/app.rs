//! Menu shell
//!
//! Owns the cartridge registry, score store and theme manager, and drives
//! the main menu, high scores, theme selector and error views. Games run
//! synchronously inside [`Cartridge::play`]; the menu resumes when they
//! return, whether they finished or failed.

use std::time::{Duration, Instant};

use anyhow::Result;
use arcade_core::config::GameConfig;
use arcade_core::scores::JsonScoreStore;
use arcade_core::themes::{ColorRole, Theme, ThemeManager};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Alignment,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use tracing::{error, info};

use super::cartridges::{Cartridge, PlayContext};
use super::input::{is_back, is_down, is_quit, is_up, InputSource};
use super::popups::{
    center_rect, popup_block, theme_select::preview_line, HighScoresPopup, PopupSize,
    ThemeSelectPopup,
};
use super::terminal::Screen;
use super::themes::Palette;

/// How long "Theme changed to" stays up
pub const MESSAGE_DURATION: Duration = Duration::from_secs(1);
/// How long the theme demo shows each theme unless a key is pressed
pub const DEMO_INTERVAL: Duration = Duration::from_secs(3);

const LOGO: [&str; 2] = [
    "▄▀█ █▀█ █▀▀ ▄▀█ █▀▄ █▀▀   ▀█▀ █ █ █",
    "█▀█ █▀▄ █▄▄ █▀█ █▄▀ ██▄    █  █▄█ █",
];
const MENU_WIDTH: u16 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Game(usize),
    HighScores,
    Themes,
    Quit,
}

/// What the shell is showing
pub enum View {
    Menu,
    HighScores(HighScoresPopup),
    Themes(ThemeSelectPopup),
    Error(String),
}

pub struct App {
    cartridges: Vec<Box<dyn Cartridge>>,
    themes: ThemeManager,
    scores: JsonScoreStore,
    config: GameConfig,
    seed: Option<u64>,
    palette: Palette,
    selected: usize,
    view: View,
    message_duration: Duration,
    running: bool,
}

impl App {
    pub fn new(
        cartridges: Vec<Box<dyn Cartridge>>,
        themes: ThemeManager,
        scores: JsonScoreStore,
        config: GameConfig,
        seed: Option<u64>,
    ) -> Self {
        let palette = Palette::from_theme(themes.current());
        Self {
            cartridges,
            themes,
            scores,
            config,
            seed,
            palette,
            selected: 0,
            view: View::Menu,
            message_duration: MESSAGE_DURATION,
            running: true,
        }
    }

    #[cfg(test)]
    pub fn with_message_duration(mut self, duration: Duration) -> Self {
        self.message_duration = duration;
        self
    }

    fn menu_items(&self) -> Vec<MenuItem> {
        (0..self.cartridges.len())
            .map(MenuItem::Game)
            .chain([MenuItem::HighScores, MenuItem::Themes, MenuItem::Quit])
            .collect()
    }

    fn item_labels(&self, item: MenuItem) -> (String, &str) {
        match item {
            MenuItem::Game(i) => {
                let c = &self.cartridges[i];
                (format!("{} {}", c.icon(), c.name()), c.description())
            }
            MenuItem::HighScores => ("📊 High Scores".into(), "View top scores for all games"),
            MenuItem::Themes => ("🎨 Themes".into(), "Change visual theme"),
            MenuItem::Quit => ("❌ Quit".into(), "Exit ArcadeTUI"),
        }
    }

    /// Run until the user quits from the main menu
    pub fn run(&mut self, screen: &mut dyn Screen, input: &mut dyn InputSource) -> Result<()> {
        info!(
            cartridges = self.cartridges.len(),
            theme = %self.themes.current().name,
            "Arcade started"
        );
        while self.running {
            self.draw(screen)?;
            if let Some(key) = input.poll_key(self.config.input_poll())? {
                self.handle_key(&key, screen, input)?;
            }
        }
        info!("Arcade closed");
        Ok(())
    }

    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        screen: &mut dyn Screen,
        input: &mut dyn InputSource,
    ) -> Result<()> {
        match &mut self.view {
            View::Menu => {
                self.handle_menu_key(key, screen, input);
                Ok(())
            }
            View::HighScores(_) => {
                if is_back(key) {
                    self.view = View::Menu;
                }
                Ok(())
            }
            View::Themes(popup) => {
                if is_up(key) {
                    popup.prev();
                } else if is_down(key) {
                    popup.next();
                } else if key.code == KeyCode::Enter {
                    let chosen = popup.selected().cloned();
                    if let Some(theme) = chosen {
                        self.apply_theme(theme, screen)?;
                    }
                } else if is_back(key) {
                    self.view = View::Menu;
                }
                Ok(())
            }
            View::Error(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.view = View::Menu;
                }
                Ok(())
            }
        }
    }

    fn handle_menu_key(
        &mut self,
        key: &KeyEvent,
        screen: &mut dyn Screen,
        input: &mut dyn InputSource,
    ) {
        let items = self.menu_items();
        if is_up(key) {
            self.selected = self.selected.checked_sub(1).unwrap_or(items.len() - 1);
        } else if is_down(key) {
            self.selected = (self.selected + 1) % items.len();
        } else if key.code == KeyCode::Enter {
            match items[self.selected] {
                MenuItem::Game(i) => self.launch(i, screen, input),
                MenuItem::HighScores => {
                    self.view =
                        View::HighScores(HighScoresPopup::load(&self.cartridges, &self.scores));
                }
                MenuItem::Themes => {
                    let popup =
                        ThemeSelectPopup::new(self.themes.all_themes(), &self.themes.current().name);
                    self.view = View::Themes(popup);
                }
                MenuItem::Quit => self.running = false,
            }
        } else if is_quit(key) {
            self.running = false;
        }
    }

    /// Play one game. Failures land on the error view instead of ending
    /// the shell.
    fn launch(&mut self, index: usize, screen: &mut dyn Screen, input: &mut dyn InputSource) {
        let cartridge = &self.cartridges[index];
        let mut ctx = PlayContext {
            screen,
            input,
            scores: &self.scores,
            palette: &self.palette,
            config: &self.config,
            seed: self.seed,
        };
        if let Err(e) = cartridge.play(&mut ctx) {
            error!(game = cartridge.id(), error = %e, "Game failed");
            self.view = View::Error(format!("Error launching game: {e:#}"));
        }
    }

    fn apply_theme(&mut self, theme: Theme, screen: &mut dyn Screen) -> Result<()> {
        let name = theme.name.clone();
        if let Err(e) = self.themes.set_current(theme) {
            error!(theme = %name, error = %e, "Failed to apply theme");
            self.view = View::Error(format!("Could not apply theme: {e:#}"));
            return Ok(());
        }
        self.palette = Palette::from_theme(self.themes.current());
        info!(theme = %self.palette.name, "Palette switched");

        let message = format!("Theme changed to: {name}");
        let seconds = self.message_duration.as_secs().max(1);
        let palette = &self.palette;
        screen.render(&mut |frame: &mut Frame| {
            render_message(frame, palette, &message, seconds);
        })?;
        std::thread::sleep(self.message_duration);
        Ok(())
    }

    pub fn draw(&self, screen: &mut dyn Screen) -> Result<()> {
        screen.render(&mut |frame: &mut Frame| match &self.view {
            View::Menu => self.render_menu(frame),
            View::HighScores(popup) => popup.render(frame, &self.palette),
            View::Themes(popup) => popup.render(frame, &self.palette, &self.themes.current().name),
            View::Error(message) => render_error(frame, &self.palette, message),
        })
    }

    fn render_menu(&self, f: &mut Frame) {
        let palette = &self.palette;
        f.render_widget(Block::default().style(palette.background()), f.area());

        let mut lines: Vec<Line> = LOGO
            .iter()
            .map(|row| {
                Line::styled(
                    *row,
                    palette.style(ColorRole::Primary).add_modifier(palette.logo),
                )
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "═══ MAIN MENU ═══",
            palette.style(ColorRole::Secondary),
        ));
        lines.push(Line::from(""));

        for (idx, item) in self.menu_items().into_iter().enumerate() {
            let (label, description) = self.item_labels(item);
            let label = if idx == self.selected {
                Span::styled(
                    format!("► {label}"),
                    palette
                        .style(ColorRole::Accent)
                        .add_modifier(palette.selected),
                )
            } else {
                Span::styled(
                    format!("  {label}"),
                    palette.style(ColorRole::Text).add_modifier(palette.menu),
                )
            };
            lines.push(Line::from(vec![
                label,
                Span::styled(
                    format!("  {description}"),
                    palette.style(ColorRole::TextDim),
                ),
            ]));
        }

        lines.push(Line::from(""));
        let dim = palette.style(ColorRole::TextDim);
        lines.push(Line::styled(
            "Use ↑↓ (W/S) to navigate, ENTER to select, Q to quit",
            dim,
        ));
        lines.push(Line::styled(
            format!("Current theme: {}", self.themes.current().name),
            dim,
        ));

        let height = lines.len() as u16;
        let area = center_rect(MENU_WIDTH, height, f.area());
        f.render_widget(Paragraph::new(lines), area);
    }
}

fn render_error(f: &mut Frame, palette: &Palette, message: &str) {
    f.render_widget(Block::default().style(palette.background()), f.area());
    let lines = vec![
        Line::styled(
            "ERROR",
            palette.style(ColorRole::Error).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(message.to_string(), palette.style(ColorRole::Text)),
        Line::from(""),
        Line::styled(
            "Press ENTER or ESC to continue",
            palette.style(ColorRole::TextDim),
        ),
    ];
    render_box(f, palette, lines);
}

fn render_message(f: &mut Frame, palette: &Palette, message: &str, seconds: u64) {
    f.render_widget(Block::default().style(palette.background()), f.area());
    let lines = vec![
        Line::styled(message.to_string(), palette.style(ColorRole::Success)),
        Line::from(""),
        Line::styled(
            format!("This message will disappear in {seconds} seconds..."),
            palette.style(ColorRole::TextDim),
        ),
    ];
    render_box(f, palette, lines);
}

fn render_box(f: &mut Frame, palette: &Palette, lines: Vec<Line>) {
    let (width, _) = PopupSize::Small.dimensions();
    let area = center_rect(width.max(MENU_WIDTH), lines.len() as u16 + 2, f.area());
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(popup_block(palette));
    f.render_widget(paragraph, area);
}

/// Show each theme in turn. Any key advances; Esc or Q ends early.
/// Nothing is persisted.
pub fn run_theme_demo(
    screen: &mut dyn Screen,
    input: &mut dyn InputSource,
    themes: &[Theme],
    per_theme: Duration,
    poll: Duration,
) -> Result<()> {
    for theme in themes {
        info!(theme = %theme.name, "Theme demo");
        let palette = Palette::from_theme(theme);
        screen.render(&mut |frame: &mut Frame| render_demo(frame, &palette, theme))?;

        let deadline = Instant::now() + per_theme;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            if let Some(key) = input.poll_key(remaining.min(poll))? {
                if is_back(&key) {
                    return Ok(());
                }
                break;
            }
        }
    }
    Ok(())
}

fn render_demo(f: &mut Frame, palette: &Palette, theme: &Theme) {
    f.render_widget(Block::default().style(palette.background()), f.area());
    let lines = vec![
        Line::styled(
            format!("THEME: {}", theme.name.to_uppercase()),
            palette
                .style(ColorRole::Primary)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            format!("Description: {}", theme.description),
            palette.style(ColorRole::Secondary),
        ),
        Line::from(""),
        Line::styled("Color preview:", palette.style(ColorRole::Text)),
        preview_line(palette),
        Line::from(""),
        Line::styled(
            "Press any key for next theme...",
            palette.style(ColorRole::TextDim),
        ),
    ];
    let area = center_rect(MENU_WIDTH, lines.len() as u16 + 2, f.area());
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block(palette));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::cartridges::registry;
    use crate::tui::input::ScriptedInput;
    use crate::tui::testing::buffer_text;
    use arcade_core::scores::ScoreStore;
    use arcade_core::themes::builtin;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        themes_dir: std::path::PathBuf,
        app: App,
        terminal: Terminal<TestBackend>,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let themes_dir = dir.path().join("themes");
        let config = GameConfig {
            input_poll_ms: 0,
            frame_delay_ms: 0,
            ..GameConfig::default()
        };
        let app = App::new(
            registry(),
            ThemeManager::load(&themes_dir),
            JsonScoreStore::new(dir.path().join("scores")),
            config,
            Some(7),
        )
        .with_message_duration(Duration::ZERO);
        Fixture {
            _dir: dir,
            themes_dir,
            app,
            terminal: Terminal::new(TestBackend::new(100, 36)).unwrap(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(fx: &mut Fixture, code: KeyCode) {
        let mut input = ScriptedInput::new();
        fx.app
            .handle_key(&key(code), &mut fx.terminal, &mut input)
            .unwrap();
    }

    fn screen(fx: &mut Fixture) -> String {
        fx.app.draw(&mut fx.terminal).unwrap();
        buffer_text(fx.terminal.backend().buffer())
    }

    #[test]
    fn test_menu_lists_games_and_fixed_items() {
        let mut fx = fixture();
        let text = screen(&mut fx);
        assert!(text.contains("═══ MAIN MENU ═══"));
        assert!(text.contains("TETRIS"));
        assert!(text.contains("Classic falling blocks puzzle"));
        assert!(text.contains("GALAGA"));
        assert!(text.contains("View top scores for all games"));
        assert!(text.contains("Change visual theme"));
        assert!(text.contains("Exit ArcadeTUI"));
        assert!(text.contains("Current theme: Classic"));
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut fx = fixture();
        press(&mut fx, KeyCode::Up);
        assert_eq!(fx.app.selected, 4);
        press(&mut fx, KeyCode::Char('s'));
        assert_eq!(fx.app.selected, 0);
        press(&mut fx, KeyCode::Down);
        press(&mut fx, KeyCode::Char('W'));
        assert_eq!(fx.app.selected, 0);
    }

    #[test]
    fn test_run_quits_from_quit_item_and_q() {
        let mut fx = fixture();
        let mut input = ScriptedInput::new().key(KeyCode::Up).key(KeyCode::Enter);
        fx.app.run(&mut fx.terminal, &mut input).unwrap();
        assert_eq!(input.remaining(), 0);

        let mut fx = fixture();
        let mut input = ScriptedInput::new().idle(2).key(KeyCode::Char('q'));
        fx.app.run(&mut fx.terminal, &mut input).unwrap();
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_high_scores_view_and_back() {
        let mut fx = fixture();
        fx.app
            .scores
            .submit_score("galaga", arcade_core::ScoreEntry::new("Ada", 900, 3))
            .unwrap();

        press(&mut fx, KeyCode::Down);
        press(&mut fx, KeyCode::Down);
        press(&mut fx, KeyCode::Enter);
        assert!(matches!(&fx.app.view, View::HighScores(_)));
        let text = screen(&mut fx);
        assert!(text.contains("═══ HIGH SCORES ═══"));
        assert!(text.contains("Ada: 900"));
        assert!(text.contains("No scores yet"));

        press(&mut fx, KeyCode::Esc);
        assert!(matches!(&fx.app.view, View::Menu));
    }

    #[test]
    fn test_theme_apply_persists_and_stays_in_selector() {
        let mut fx = fixture();
        press(&mut fx, KeyCode::Up);
        press(&mut fx, KeyCode::Up);
        press(&mut fx, KeyCode::Enter);
        assert!(matches!(&fx.app.view, View::Themes(_)));

        press(&mut fx, KeyCode::Down);
        press(&mut fx, KeyCode::Enter);
        assert_eq!(fx.app.themes.current().name, "Neon");
        assert_eq!(fx.app.palette.name, "Neon");
        assert!(matches!(&fx.app.view, View::Themes(_)));
        assert!(screen(&mut fx).contains("Neon (ACTIVE)"));

        press(&mut fx, KeyCode::Char('q'));
        assert!(matches!(&fx.app.view, View::Menu));
        assert!(screen(&mut fx).contains("Current theme: Neon"));

        let reloaded = ThemeManager::load(&fx.themes_dir);
        assert_eq!(reloaded.current().name, "Neon");
    }

    #[test]
    fn test_game_failure_shows_error_view() {
        let mut fx = fixture();
        // Empty script: the game's first input poll fails
        press(&mut fx, KeyCode::Enter);
        let View::Error(message) = &fx.app.view else {
            panic!("expected error view");
        };
        assert!(message.contains("scripted input exhausted"));
        assert!(screen(&mut fx).contains("Press ENTER or ESC to continue"));

        press(&mut fx, KeyCode::Char('x'));
        assert!(matches!(&fx.app.view, View::Error(_)));
        press(&mut fx, KeyCode::Enter);
        assert!(matches!(&fx.app.view, View::Menu));
    }

    #[test]
    fn test_play_game_from_menu_and_return() {
        let mut fx = fixture();
        let mut input = ScriptedInput::new()
            .keys(&[KeyCode::Down, KeyCode::Enter])
            // In game: quit, type a name, confirm, continue
            .key(KeyCode::Char('q'))
            .text("Bo")
            .key(KeyCode::Enter)
            .key(KeyCode::Char(' '))
            // Back in the menu
            .key(KeyCode::Char('q'));
        fx.app.run(&mut fx.terminal, &mut input).unwrap();
        assert_eq!(input.remaining(), 0);

        let scores = fx.app.scores.load_top_scores("galaga");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].player_name, "Bo");
        assert_eq!(scores[0].score, 0);
    }

    #[test]
    fn test_theme_demo_advances_and_aborts() {
        let themes = vec![builtin::classic(), builtin::retro(), builtin::dark()];
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();

        let mut input = ScriptedInput::new()
            .key(KeyCode::Char(' '))
            .key(KeyCode::Char(' '))
            .key(KeyCode::Char(' '));
        run_theme_demo(
            &mut terminal,
            &mut input,
            &themes,
            Duration::from_secs(10),
            Duration::ZERO,
        )
        .unwrap();
        assert_eq!(input.remaining(), 0);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("THEME: DARK"));
        assert!(text.contains("Press any key for next theme..."));

        let mut input = ScriptedInput::new().key(KeyCode::Esc);
        run_theme_demo(
            &mut terminal,
            &mut input,
            &themes,
            Duration::from_secs(10),
            Duration::ZERO,
        )
        .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("THEME: CLASSIC"));
    }
}
