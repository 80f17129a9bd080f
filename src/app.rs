use crate::consts;
use crate::screen::{GameScreen, Quit};
use crossterm::event::{poll, read};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The main loop of the terminal front end.  Each frame draws the screen,
/// collects input for up to one frame period, and then tells the game how
/// much time has passed.
#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: GameScreen,
    quitting: bool,
}

impl App {
    pub(crate) fn new(screen: GameScreen) -> App {
        App {
            screen,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let mut last_frame = Instant::now();
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(&self.screen, frame.area()))?;
            self.process_input(last_frame)?;
            let now = Instant::now();
            self.screen
                .end_frame(now.saturating_duration_since(last_frame));
            last_frame = now;
        }
        Ok(())
    }

    /// Read input events until one frame period after `frame_start` has
    /// elapsed or the user quits
    fn process_input(&mut self, frame_start: Instant) -> io::Result<()> {
        let deadline = frame_start + consts::FRAME_PERIOD;
        loop {
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                return Ok(());
            }
            if let Some(Quit) = self.screen.handle_event(read()?) {
                self.quitting = true;
                return Ok(());
            }
        }
    }
}
