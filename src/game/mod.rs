//! The grid-and-movement state machine
mod apple;
mod direction;
mod grid;
mod input;
mod state;
use self::apple::ApplePlacer;
pub(crate) use self::direction::Direction;
use self::grid::Grid;
pub(crate) use self::grid::{GridError, Node};
use self::input::DirectionBuffer;
pub(crate) use self::input::InputSignals;
use self::state::GameState;
pub(crate) use self::state::Status;
use crate::consts;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Parameters fixed for the lifetime of a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) width: i32,
    pub(crate) height: i32,
    /// Time that must pass between movement steps
    pub(crate) movement_interval: Duration,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            width: consts::DEFAULT_WIDTH,
            height: consts::DEFAULT_HEIGHT,
            movement_interval: consts::DEFAULT_MOVEMENT_INTERVAL,
        }
    }
}

/// What happened during a call to [`Game::tick()`] or [`Game::step()`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum StepResult {
    /// Not enough time has accumulated for a movement step
    Waiting,
    /// The head moved onto an empty node
    Moved,
    /// The head moved onto the apple, and a new apple was placed
    Scored,
    /// The head tried to leave the board; the game is over
    GameOver,
    /// The head ate the last apple there was room for
    Won,
    /// The game had already ended; nothing changed
    Halted,
}

/// A single game: the board, the head and apple on it, and the machinery that
/// turns directional input and elapsed time into movement.
///
/// Two timing domains drive a game.  Every host frame calls
/// [`tick()`][Game::tick] with the frame's input, which updates the heading.
/// Only once more than the movement interval has accumulated does the head
/// actually move and the board's occupancy change.
#[derive(Clone, Debug)]
pub(crate) struct Game<R = StdRng> {
    settings: Settings,
    grid: Grid,
    state: GameState,
    buffer: DirectionBuffer,
    placer: ApplePlacer<R>,
}

impl Game<StdRng> {
    /// Start a new game using a random number generator seeded from the
    /// operating system
    pub(crate) fn new(settings: Settings) -> Result<Self, GridError> {
        Game::new_with_rng(settings, StdRng::from_os_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Start a new game: build the board, put the head on the starting node,
    /// and place the first apple.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if the dimensions in
    /// `settings` are not positive or the board does not contain the starting
    /// node.
    pub(crate) fn new_with_rng(settings: Settings, rng: R) -> Result<Game<R>, GridError> {
        let mut placer = ApplePlacer::new(rng);
        let (grid, state) = Self::setup(settings, &mut placer)?;
        Ok(Game {
            settings,
            grid,
            state,
            buffer: DirectionBuffer::new(),
            placer,
        })
    }

    /// Throw away the current game and start a fresh one with the same
    /// settings, continuing to draw from the same random number generator
    pub(crate) fn restart(&mut self) -> Result<(), GridError> {
        let (grid, state) = Self::setup(self.settings, &mut self.placer)?;
        self.grid = grid;
        self.state = state;
        self.buffer = DirectionBuffer::new();
        Ok(())
    }

    fn setup(
        settings: Settings,
        placer: &mut ApplePlacer<R>,
    ) -> Result<(Grid, GameState), GridError> {
        let mut grid = Grid::new(settings.width, settings.height)?;
        let (sx, sy) = consts::START_COORDS;
        let head = grid
            .node_at(sx, sy)
            .ok_or(GridError::InvalidDimension {
                width: settings.width,
                height: settings.height,
            })?;
        grid.mark_occupied(head);
        let apple = placer
            .place(&grid)
            .expect("a board containing the starting node should have room for an apple");
        grid.mark_occupied(apple);
        info!(
            width = settings.width,
            height = settings.height,
            apple_x = apple.x(),
            apple_y = apple.y(),
            "Starting new game"
        );
        Ok((grid, GameState::new(head, apple)))
    }

    /// Advance the game by one host frame.
    ///
    /// `signals` are captured and resolved into the current heading on every
    /// call.  `delta` is added to the time accumulator, and if the
    /// accumulator then exceeds the movement interval, one movement step is
    /// performed and the accumulator is reset to zero.
    pub(crate) fn tick(&mut self, delta: Duration, signals: InputSignals) -> StepResult {
        if self.state.status.is_terminal() {
            return StepResult::Halted;
        }
        if signals.any() {
            trace!(?signals, "Captured directional input");
        }
        self.buffer.capture(signals);
        self.state.direction = self.buffer.resolve(self.state.direction);
        self.state.elapsed = self.state.elapsed.saturating_add(delta);
        if self.state.elapsed > self.settings.movement_interval {
            let r = self.step();
            self.state.elapsed = Duration::ZERO;
            r
        } else {
            StepResult::Waiting
        }
    }

    /// Perform one movement step in the current direction, regardless of the
    /// time accumulator
    pub(crate) fn step(&mut self) -> StepResult {
        if self.state.status.is_terminal() {
            return StepResult::Halted;
        }
        let old_head = self.state.head;
        let (x, y) = self.state.direction.advance(old_head.coords());
        let Some(target) = self.grid.node_at(x, y) else {
            info!(
                x,
                y,
                score = self.state.score,
                "Snake hit the wall; game over"
            );
            self.state.status = Status::GameOver;
            return StepResult::GameOver;
        };
        if target == self.state.apple {
            // The apple's node is already out of the available set, so it
            // stays out now that the head is on it.
            self.grid.mark_available(old_head);
            self.state.head = target;
            self.state.score += 1;
            if self.grid.available_len() == 0 {
                info!(score = self.state.score, "Board is full; game won");
                self.state.status = Status::Won;
                return StepResult::Won;
            }
            let apple = self
                .placer
                .place(&self.grid)
                .expect("available set was checked to be nonempty");
            self.grid.mark_occupied(apple);
            self.state.apple = apple;
            debug_assert_eq!(self.grid.available_len() + 2, self.grid.len());
            info!(
                score = self.state.score,
                apple = ?apple.placement(),
                "Ate apple; placed new apple"
            );
            StepResult::Scored
        } else {
            self.grid.mark_available(old_head);
            self.state.head = target;
            self.grid.mark_occupied(target);
            debug_assert!(!self.grid.is_available(self.state.apple));
            debug!(
                x = target.x(),
                y = target.y(),
                direction = %self.state.direction,
                "Moved"
            );
            StepResult::Moved
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn head(&self) -> Node {
        self.state.head
    }

    pub(crate) fn apple(&self) -> Node {
        self.state.apple
    }

    pub(crate) fn direction(&self) -> Direction {
        self.state.direction
    }

    pub(crate) fn status(&self) -> Status {
        self.state.status
    }

    pub(crate) fn score(&self) -> u32 {
        self.state.score
    }

    #[cfg(test)]
    pub(crate) fn set_status(&mut self, status: Status) {
        self.state.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(width: i32, height: i32) -> Game<ChaCha12Rng> {
        let settings = Settings {
            width,
            height,
            ..Settings::default()
        };
        Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(RNG_SEED)).unwrap()
    }

    /// Move the apple to `(x, y)`, keeping the available set consistent
    fn put_apple<R>(game: &mut Game<R>, x: i32, y: i32) {
        let node = game.grid.node_at(x, y).unwrap();
        game.grid.mark_available(game.state.apple);
        game.grid.mark_occupied(node);
        game.state.apple = node;
    }

    /// Move the head to `(x, y)`, keeping the available set consistent
    fn put_head<R>(game: &mut Game<R>, x: i32, y: i32) {
        let node = game.grid.node_at(x, y).unwrap();
        game.grid.mark_available(game.state.head);
        game.grid.mark_occupied(node);
        game.state.head = node;
    }

    fn assert_partition<R>(game: &Game<R>) {
        let grid = game.grid();
        let head = game.head();
        assert!(!grid.is_available(head), "head {head:?} is available");
        if game.status() != Status::Won {
            let apple = game.apple();
            assert_ne!(head, apple);
            assert!(!grid.is_available(apple), "apple {apple:?} is available");
            assert_eq!(grid.available_len() + 2, grid.len());
        }
    }

    #[test]
    fn new_game_layout() {
        let game = new_game(17, 15);
        assert_eq!(game.head().coords(), (3, 3));
        assert_ne!(game.apple(), game.head());
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.direction(), Direction::Up);
        assert_eq!(game.state.elapsed, Duration::ZERO);
        assert_partition(&game);
    }

    #[rstest]
    #[case(3, 10)]
    #[case(10, 3)]
    #[case(0, 15)]
    #[case(17, -2)]
    fn start_outside_board(#[case] width: i32, #[case] height: i32) {
        let settings = Settings {
            width,
            height,
            ..Settings::default()
        };
        let r = Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(
            r.map(|_| ()),
            Err(GridError::InvalidDimension { width, height })
        );
    }

    #[test]
    fn smallest_board() {
        let game = new_game(4, 4);
        assert_eq!(game.head().coords(), (3, 3));
        assert_partition(&game);
    }

    #[test]
    fn eat_apple() {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 3, 4);
        let r = game.tick(
            Duration::from_millis(600),
            InputSignals::from_direction(Direction::Up),
        );
        assert_eq!(r, StepResult::Scored);
        assert_eq!(game.head().coords(), (3, 4));
        assert_eq!(game.score(), 1);
        assert_ne!(game.apple().coords(), (3, 4));
        assert_eq!(game.grid().available_len(), 17 * 15 - 2);
        // The new apple may land on the node the head just left
        let old_head = game.grid().node_at(3, 3).unwrap();
        assert_eq!(
            game.grid().is_available(old_head),
            game.apple() != old_head
        );
        assert_partition(&game);
    }

    #[test]
    fn plain_move() {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 10, 10);
        let r = game.tick(
            Duration::from_millis(600),
            InputSignals::from_direction(Direction::Right),
        );
        assert_eq!(r, StepResult::Moved);
        assert_eq!(game.head().coords(), (4, 3));
        assert_eq!(game.apple().coords(), (10, 10));
        assert_eq!(game.score(), 0);
        assert!(game.grid().is_available(game.grid().node_at(3, 3).unwrap()));
        assert_partition(&game);
    }

    #[rstest]
    #[case(0, 5, Direction::Left)]
    #[case(16, 5, Direction::Right)]
    #[case(5, 0, Direction::Down)]
    #[case(5, 14, Direction::Up)]
    fn hit_wall(#[case] x: i32, #[case] y: i32, #[case] direction: Direction) {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 8, 8);
        put_head(&mut game, x, y);
        let r = game.tick(
            Duration::from_millis(600),
            InputSignals::from_direction(direction),
        );
        assert_eq!(r, StepResult::GameOver);
        assert_eq!(game.status(), Status::GameOver);
        assert_eq!(game.head().coords(), (x, y));
        let grid = game.grid().clone();
        let state = game.state;
        for _ in 0..3 {
            assert_eq!(game.step(), StepResult::Halted);
            assert_eq!(
                game.tick(Duration::from_secs(1), InputSignals::from_direction(Direction::Up)),
                StepResult::Halted
            );
        }
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.state, state);
    }

    #[test]
    fn movement_waits_for_interval() {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 10, 10);
        let frame = Duration::from_millis(250);
        assert_eq!(game.tick(frame, InputSignals::NONE), StepResult::Waiting);
        assert_eq!(game.state.elapsed, frame);
        // Exactly reaching the interval is not enough
        assert_eq!(game.tick(frame, InputSignals::NONE), StepResult::Waiting);
        assert_eq!(game.head().coords(), (3, 3));
        assert_eq!(
            game.tick(Duration::from_millis(1), InputSignals::NONE),
            StepResult::Moved
        );
        assert_eq!(game.head().coords(), (3, 4));
        assert_eq!(game.state.elapsed, Duration::ZERO);
    }

    #[test]
    fn heading_changes_between_moves() {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 10, 10);
        let frame = Duration::from_millis(200);
        assert_eq!(
            game.tick(frame, InputSignals::from_direction(Direction::Left)),
            StepResult::Waiting
        );
        assert_eq!(game.direction(), Direction::Left);
        assert_eq!(game.tick(frame, InputSignals::NONE), StepResult::Waiting);
        assert_eq!(game.direction(), Direction::Left);
        assert_eq!(
            game.tick(frame, InputSignals::from_direction(Direction::Right)),
            StepResult::Moved
        );
        assert_eq!(game.head().coords(), (4, 3));
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn simultaneous_signals_prefer_up() {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 10, 10);
        let signals = InputSignals {
            up: true,
            right: true,
            ..InputSignals::NONE
        };
        assert_eq!(
            game.tick(Duration::from_millis(600), signals),
            StepResult::Moved
        );
        assert_eq!(game.head().coords(), (3, 4));
    }

    #[test]
    fn deterministic() {
        let mut g1 = new_game(17, 15);
        let mut g2 = new_game(17, 15);
        let moves = [
            Direction::Up,
            Direction::Up,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];
        for d in moves {
            let signals = InputSignals::from_direction(d);
            assert_eq!(
                g1.tick(Duration::from_millis(600), signals),
                g2.tick(Duration::from_millis(600), signals)
            );
            assert_eq!(g1.grid(), g2.grid());
            assert_eq!(g1.state, g2.state);
        }
    }

    #[test]
    fn random_walks_keep_partition() {
        let mut chooser = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for seed in 0..50 {
            let settings = Settings {
                width: 6,
                height: 5,
                ..Settings::default()
            };
            let mut game =
                Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(seed)).unwrap();
            let mut score = 0;
            for _ in 0..200 {
                let d = directions[chooser.random_range(0..directions.len())];
                let r = game.tick(
                    Duration::from_millis(501),
                    InputSignals::from_direction(d),
                );
                assert_partition(&game);
                match r {
                    StepResult::Scored => {
                        score += 1;
                        assert_eq!(game.score(), score);
                    }
                    StepResult::Moved => assert_eq!(game.score(), score),
                    StepResult::GameOver => break,
                    other => panic!("unexpected step result {other:?}"),
                }
            }
        }
    }

    #[test]
    fn restart() {
        let mut game = new_game(17, 15);
        put_apple(&mut game, 10, 10);
        put_head(&mut game, 0, 0);
        game.state.direction = Direction::Left;
        assert_eq!(game.step(), StepResult::GameOver);
        game.restart().unwrap();
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.head().coords(), (3, 3));
        assert_eq!(game.score(), 0);
        assert_eq!(game.direction(), Direction::Up);
        assert_partition(&game);
    }
}
