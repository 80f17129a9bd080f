use std::fmt;

/// Heading of the snake's head.  There are no diagonal headings.
///
/// World coordinates grow rightwards in `x` and upwards in `y`, so moving
/// [`Up`][Direction::Up] increases `y`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the `(dx, dy)` displacement of one movement step in this
    /// direction
    pub(crate) fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Return the coordinates one step away from `(x, y)` in this direction.
    /// The result may lie outside of any grid; bounds are checked by
    /// [`Grid::node_at()`][super::grid::Grid::node_at].
    pub(crate) fn advance(self, (x, y): (i32, i32)) -> (i32, i32) {
        let (dx, dy) = self.offset();
        (x.saturating_add(dx), y.saturating_add(dy))
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
