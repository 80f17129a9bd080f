use crate::command::Command;
use crate::config::ColorConfig;
use crate::consts;
use crate::game::{Direction, Game, InputSignals, Node, Status, StepResult};
use crate::highscores::{BoardSize, HighScores};
use crate::util::{center_rect, get_display_area};
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// The terminal front end for a [`Game`]: collects key presses into
/// directional signals, feeds them to the game once per frame, records high
/// scores, and draws the board.
#[derive(Clone, Debug)]
pub(crate) struct GameScreen {
    game: Game,
    colors: ColorConfig,
    high_scores: HighScores,
    high_scores_file: Option<PathBuf>,
    /// Signals from the key presses received since the last frame
    pending: InputSignals,
}

impl GameScreen {
    pub(crate) fn new(
        game: Game,
        colors: ColorConfig,
        high_scores: HighScores,
        high_scores_file: Option<PathBuf>,
    ) -> GameScreen {
        GameScreen {
            game,
            colors,
            high_scores,
            high_scores_file,
            pending: InputSignals::NONE,
        }
    }

    /// Handle an input event.  Returns `Some(Quit)` if the program should
    /// exit.
    pub(crate) fn handle_event(&mut self, event: Event) -> Option<Quit> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Quit),
            Command::Up => self.pending.set(Direction::Up),
            Command::Down => self.pending.set(Direction::Down),
            Command::Left => self.pending.set(Direction::Left),
            Command::Right => self.pending.set(Direction::Right),
            Command::R if self.game.status().is_terminal() => {
                if let Err(e) = self.game.restart() {
                    error!(error = %e, "Failed to restart game");
                    return Some(Quit);
                }
                self.pending = InputSignals::NONE;
            }
            Command::Q if self.game.status().is_terminal() => return Some(Quit),
            Command::R | Command::Q => (),
        }
        None
    }

    /// End the current frame: pass the signals collected during it and the
    /// time it took to the game
    pub(crate) fn end_frame(&mut self, delta: Duration) -> StepResult {
        let signals = std::mem::take(&mut self.pending);
        let r = self.game.tick(delta, signals);
        if matches!(r, StepResult::GameOver | StepResult::Won) {
            self.record_score();
        }
        r
    }

    fn board_size(&self) -> BoardSize {
        BoardSize {
            width: self.game.grid().width(),
            height: self.game.grid().height(),
        }
    }

    fn record_score(&mut self) {
        let score = self.game.score();
        if !self.high_scores.update(self.board_size(), score) {
            return;
        }
        info!(score, "New high score");
        if let Some(ref path) = self.high_scores_file {
            if let Err(e) = self.high_scores.save(path) {
                warn!(error = ?anyhow::Error::from(e), path = %path.display(), "Could not save high scores");
            }
        }
    }

    fn best(&self) -> u32 {
        self.high_scores
            .get(self.board_size())
            .map_or(0, std::num::NonZeroU32::get)
    }
}

/// Marker returned when the user asks to quit
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Quit;

impl Widget for &GameScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}   Best: {}", self.game.score(), self.best()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let grid = self.game.grid();
        let block_size = Size {
            width: grid
                .width()
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: grid.height().saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut board = Board {
            area: block_area.inner(Margin::new(1, 1)),
            height: grid.height(),
            buf,
        };
        for node in grid.nodes() {
            let bg = if node.x() % 2 == node.y() % 2 {
                self.colors.light
            } else {
                self.colors.dark
            };
            board.fill(node, bg);
        }
        board.draw(self.game.apple(), consts::APPLE_SYMBOL, consts::APPLE_STYLE);
        // Draw the head last so that a collision overwrites the board
        if self.game.status() == Status::GameOver {
            board.draw(
                self.game.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            board.draw(self.game.head(), consts::HEAD_SYMBOL, consts::HEAD_STYLE);
        }

        let banner = match self.game.status() {
            Status::Running => return,
            Status::GameOver => " — GAME OVER —",
            Status::Won => " — YOU WIN! —",
        };
        Span::from(banner).render(msg1_area, buf);
        Line::from_iter([
            Span::raw(" Choose One: Restart ("),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(msg2_area, buf);
    }
}

/// The area of the buffer in which the board's nodes are drawn.  World `y`
/// grows upwards while terminal rows grow downwards, so node rows are
/// flipped.
#[derive(Debug, Eq, PartialEq)]
struct Board<'a> {
    area: Rect,
    height: u16,
    buf: &'a mut Buffer,
}

impl Board<'_> {
    /// Return the terminal position of the leftmost column of `node`
    fn origin(&self, node: Node) -> Option<Position> {
        let x = self
            .area
            .x
            .checked_add(node.x().checked_mul(consts::CELL_WIDTH)?)?;
        let row = self.height.checked_sub(1)?.checked_sub(node.y())?;
        let y = self.area.y.checked_add(row)?;
        Some(Position { x, y })
    }

    fn positions(&self, node: Node) -> impl Iterator<Item = Position> {
        let area = self.area;
        self.origin(node).into_iter().flat_map(move |Position { x, y }| {
            (0..consts::CELL_WIDTH)
                .filter_map(move |dx| x.checked_add(dx))
                .map(move |x| Position { x, y })
                .filter(move |&p| area.contains(p))
        })
    }

    fn fill(&mut self, node: Node, bg: Color) {
        for pos in self.positions(node) {
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.set_char(' ');
                cell.set_style(Style::new().bg(bg));
            }
        }
    }

    fn draw(&mut self, node: Node, symbol: &str, style: Style) {
        for (pos, ch) in self.positions(node).zip(symbol.chars()) {
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}
