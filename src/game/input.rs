use super::direction::Direction;

/// The four edge-triggered directional signals sampled during one frame.
/// A signal is `true` only on the frame in which its key went from released
/// to pressed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct InputSignals {
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl InputSignals {
    pub(crate) const NONE: InputSignals = InputSignals {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Return the signals with only the one for `direction` set
    #[cfg(test)]
    pub(crate) fn from_direction(direction: Direction) -> InputSignals {
        let mut signals = InputSignals::NONE;
        signals.set(direction);
        signals
    }

    pub(crate) fn set(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    pub(crate) fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Return the single direction these signals select, breaking ties in the
    /// order up, down, left, right
    pub(crate) fn winner(self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Latches the directional signals captured during a frame until they are
/// resolved into a heading.
///
/// No attempt is made to stop the heading from reversing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DirectionBuffer {
    latched: InputSignals,
}

impl DirectionBuffer {
    pub(crate) fn new() -> DirectionBuffer {
        DirectionBuffer::default()
    }

    /// Record which signals fired this frame, replacing anything captured
    /// earlier and not yet resolved
    pub(crate) fn capture(&mut self, signals: InputSignals) {
        self.latched = signals;
    }

    /// Consume the latched signals and return the resulting heading.  If no
    /// signal fired, `previous` is returned unchanged.
    pub(crate) fn resolve(&mut self, previous: Direction) -> Direction {
        std::mem::take(&mut self.latched)
            .winner()
            .unwrap_or(previous)
    }
}
