use super::direction::Direction;
use super::grid::Node;
use std::time::Duration;

/// Everything about a game in progress apart from the board itself
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(crate) head: Node,
    pub(crate) apple: Node,
    pub(crate) direction: Direction,
    /// Time accumulated since the last movement step
    pub(crate) elapsed: Duration,
    pub(crate) status: Status,
    /// Number of apples eaten
    pub(crate) score: u32,
}

impl GameState {
    pub(crate) fn new(head: Node, apple: Node) -> GameState {
        GameState {
            head,
            apple,
            direction: Direction::default(),
            elapsed: Duration::ZERO,
            status: Status::Running,
            score: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Status {
    #[default]
    Running,
    /// The head ran into a wall
    GameOver,
    /// The board has been filled and there is nowhere left to put an apple
    Won,
}

impl Status {
    pub(crate) fn is_terminal(self) -> bool {
        self != Status::Running
    }
}
