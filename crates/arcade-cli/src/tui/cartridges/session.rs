//! Shared play loop and game-over screen
//!
//! `Running` repeats input → physics (gated by the session's interval) →
//! timed events → render until the game ends or Q is pressed. The quit flag
//! is only checked at the end of an iteration. Afterwards the game-over
//! screen collects a name, submits the score and waits for a key.

use std::time::{Duration, Instant};

use anyhow::Result;
use arcade_core::scores::ScoreEntry;
use arcade_core::themes::ColorRole;
use ratatui::{
    layout::Alignment,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tracing::info;

use super::{GameSession, GameSummary, PlayContext};
use crate::tui::canvas::BufferCanvas;
use crate::tui::input::is_quit;
use crate::tui::popups::center_rect;
use crate::tui::themes::Palette;
use crate::tui::utils::{NameAction, NameEntry};

/// Longest wait on "Press any key to continue..."
const CONTINUE_TIMEOUT: Duration = Duration::from_secs(10);

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub summary: GameSummary,
    /// Name the score was submitted under, if any
    pub player_name: Option<String>,
    pub high_score: bool,
}

/// Drive `session` to the end, then run the game-over screen
pub fn run_session(
    game_id: &str,
    game_name: &str,
    mut session: Box<dyn GameSession>,
    ctx: &mut PlayContext<'_>,
) -> Result<SessionOutcome> {
    info!(game = game_id, "Session started");
    let started = Instant::now();
    let mut last_physics = Duration::ZERO;
    let mut quit = false;

    loop {
        if let Some(key) = ctx.input.poll_key(ctx.config.input_poll())? {
            if is_quit(&key) {
                quit = true;
            } else {
                session.handle_key(&key, started.elapsed());
            }
        }

        let now = started.elapsed();
        if now.saturating_sub(last_physics) >= session.physics_interval() {
            session.step();
            last_physics = now;
        }
        session.tick(now);

        let palette = ctx.palette;
        let game: &dyn GameSession = &*session;
        ctx.screen.render(&mut |frame: &mut Frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(palette.background()), area);
            let mut canvas = BufferCanvas::new(frame.buffer_mut(), area, palette);
            game.render(&mut canvas);
        })?;

        if quit {
            session.quit();
            break;
        }
        if session.is_over() {
            break;
        }
        std::thread::sleep(ctx.config.frame_delay());
    }

    let summary = session.summary();
    info!(
        game = game_id,
        score = summary.score,
        level = summary.level,
        quit,
        "Session ended"
    );
    game_over(game_id, game_name, summary, ctx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    EnteringName,
    Submitted { high_score: bool },
}

fn game_over(
    game_id: &str,
    game_name: &str,
    summary: GameSummary,
    ctx: &mut PlayContext<'_>,
) -> Result<SessionOutcome> {
    let mut entry = NameEntry::new(ctx.config.name_limit());
    let mut phase = Phase::EnteringName;
    draw_game_over(ctx, game_name, &summary, &entry, phase)?;

    let skipped = loop {
        let Some(key) = ctx.input.poll_key(ctx.config.input_poll())? else {
            continue;
        };
        match entry.handle_key(&key) {
            NameAction::Submit => break false,
            NameAction::Skip => break true,
            NameAction::Continue => draw_game_over(ctx, game_name, &summary, &entry, phase)?,
        }
    };

    let player_name = if skipped { None } else { entry.finish() };
    let mut high_score = false;
    if let Some(name) = &player_name {
        let score = ScoreEntry::new(name, summary.score, summary.level);
        high_score = ctx.scores.submit_score(game_id, score)?;
    }
    phase = Phase::Submitted { high_score };
    draw_game_over(ctx, game_name, &summary, &entry, phase)?;

    let deadline = Instant::now() + CONTINUE_TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        if ctx
            .input
            .poll_key(remaining.min(ctx.config.input_poll()))?
            .is_some()
        {
            break;
        }
    }

    Ok(SessionOutcome {
        summary,
        player_name,
        high_score,
    })
}

fn draw_game_over(
    ctx: &mut PlayContext<'_>,
    game_name: &str,
    summary: &GameSummary,
    entry: &NameEntry,
    phase: Phase,
) -> Result<()> {
    let palette = ctx.palette;
    let lines = game_over_lines(palette, game_name, summary, entry, phase);
    let height = lines.len() as u16 + 2;

    ctx.screen.render(&mut |frame: &mut Frame| {
        let full = frame.area();
        frame.render_widget(Block::default().style(palette.background()), full);

        let area = center_rect(52, height, full);
        let paragraph = Paragraph::new(lines.clone())
            .alignment(Alignment::Center)
            .style(palette.background())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border_style()),
            );
        frame.render_widget(paragraph, area);
    })
}

/// Line-clearing games report the current level, the others how far
/// the player got
fn level_label(summary: &GameSummary) -> String {
    match summary.lines {
        Some(_) => format!("Level: {}", summary.level),
        None => format!("Level Reached: {}", summary.level),
    }
}

fn game_over_lines(
    palette: &Palette,
    game_name: &str,
    summary: &GameSummary,
    entry: &NameEntry,
    phase: Phase,
) -> Vec<Line<'static>> {
    let bold = |role| palette.style(role).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{game_name} - GAME OVER"),
            bold(ColorRole::Error),
        )),
        Line::from(""),
        Line::styled(
            format!("Final Score: {}", summary.score),
            palette.style(ColorRole::Success),
        ),
        Line::styled(level_label(summary), palette.style(ColorRole::Success)),
    ];
    if let Some(cleared) = summary.lines {
        lines.push(Line::styled(
            format!("Lines: {cleared}"),
            palette.style(ColorRole::Success),
        ));
    }
    lines.push(Line::from(""));

    let cursor = if phase == Phase::EnteringName { "_" } else { "" };
    lines.push(Line::from(vec![
        Span::styled(
            format!("Enter your name (max {} chars): ", entry.max_len()),
            palette.style(ColorRole::Warning),
        ),
        Span::styled(
            format!("{}{}", entry.buffer(), cursor),
            palette.style(ColorRole::Text),
        ),
    ]));

    if let Phase::Submitted { high_score } = phase {
        lines.push(Line::from(""));
        if high_score {
            lines.push(Line::styled("NEW HIGH SCORE!", bold(ColorRole::Success)));
        }
        lines.push(Line::styled(
            "Press any key to continue...",
            palette.style(ColorRole::TextDim),
        ));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Enter: save  Esc/Ctrl+C: skip",
            palette.style(ColorRole::TextDim),
        ));
    }
    lines
}
