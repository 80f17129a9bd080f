use super::grid::{Grid, Node};
use rand::Rng;
use thiserror::Error;

/// Chooses where the apple goes, using an injected random number generator
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ApplePlacer<R> {
    rng: R,
}

impl<R: Rng> ApplePlacer<R> {
    pub(crate) fn new(rng: R) -> ApplePlacer<R> {
        ApplePlacer { rng }
    }

    /// Draw a node uniformly at random from `grid`'s available set.  The
    /// node is not marked as occupied; that is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyBoard`] if `grid` has no available nodes.
    pub(crate) fn place(&mut self, grid: &Grid) -> Result<Node, EmptyBoard> {
        grid.random_available_node(&mut self.rng).ok_or(EmptyBoard)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no free cells left on the board")]
pub(crate) struct EmptyBoard;
