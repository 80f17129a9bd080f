//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Coordinates of the node on which the snake's head starts
pub(crate) const START_COORDS: (i32, i32) = (3, 3);

/// Default board width in nodes
pub(crate) const DEFAULT_WIDTH: i32 = 17;

/// Default board height in nodes
pub(crate) const DEFAULT_HEIGHT: i32 = 15;

/// Default time between movements of the snake
pub(crate) const DEFAULT_MOVEMENT_INTERVAL: Duration = Duration::from_millis(500);

/// Time between redraws & input samples of the terminal front end
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(33);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw one node
pub(crate) const CELL_WIDTH: u16 = 2;

/// Widest board that fits in [`DISPLAY_SIZE`] along with its border
pub(crate) const MAX_WIDTH: u16 = (DISPLAY_SIZE.width - 2) / CELL_WIDTH;

/// Tallest board that fits in [`DISPLAY_SIZE`] along with its border, the
/// score bar, and the two message lines underneath
pub(crate) const MAX_HEIGHT: u16 = DISPLAY_SIZE.height - 5;

/// Glyphs for the snake's head
pub(crate) const HEAD_SYMBOL: &str = "██";

/// Glyphs for the apple
pub(crate) const APPLE_SYMBOL: &str = "()";

/// Glyphs for the snake's head after it's run into a wall
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Default color of the board cells where `x` and `y` have the same parity
pub(crate) const DEFAULT_LIGHT_COLOR: Color = Color::Rgb(0xA8, 0xD8, 0x78);

/// Default color of the remaining board cells
pub(crate) const DEFAULT_DARK_COLOR: Color = Color::Rgb(0x88, 0xB8, 0x58);

/// Style for the snake's head
pub(crate) const HEAD_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);

/// Style for the apple
pub(crate) const APPLE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
