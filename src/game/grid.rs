use rand::{seq::IndexedRandom, Rng};
use thiserror::Error;

/// One cell of the board.  Nodes are created once when their [`Grid`] is
/// built and never change afterwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Node {
    x: u16,
    y: u16,
}

impl Node {
    pub(crate) fn x(self) -> u16 {
        self.x
    }

    pub(crate) fn y(self) -> u16 {
        self.y
    }

    pub(crate) fn coords(self) -> (i32, i32) {
        (i32::from(self.x), i32::from(self.y))
    }

    /// Return the position in world space at which the node should be
    /// placed.  This is the identity transform of the node's coordinates.
    pub(crate) fn placement(self) -> (f32, f32) {
        (f32::from(self.x), f32::from(self.y))
    }
}

/// The board: a fixed `width`×`height` array of [`Node`]s along with the set
/// of nodes not currently occupied by the head or the apple.
///
/// The available set is stored as a vector of node indices plus a table
/// mapping each node index to its slot in that vector, so that membership,
/// insertion, removal, and uniform random selection are all O(1).
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
    nodes: Vec<Node>,
    available: Vec<usize>,
    slots: Vec<Option<usize>>,
}

impl Grid {
    /// Construct a grid of the given dimensions with every node available.
    ///
    /// Storage is allocated up front for every node: roughly 20 bytes per
    /// node across the node array, the available set, and the slot table.
    /// Callers taking dimensions from the user should bound them first.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is not
    /// positive or does not fit in a `u16`.
    pub(crate) fn new(width: i32, height: i32) -> Result<Grid, GridError> {
        let invalid = || GridError::InvalidDimension { width, height };
        let w = u16::try_from(width)
            .ok()
            .filter(|&w| w > 0)
            .ok_or_else(invalid)?;
        let h = u16::try_from(height)
            .ok()
            .filter(|&h| h > 0)
            .ok_or_else(invalid)?;
        let nodes = (0..h)
            .flat_map(|y| (0..w).map(move |x| Node { x, y }))
            .collect::<Vec<_>>();
        let available = (0..nodes.len()).collect::<Vec<_>>();
        let slots = (0..nodes.len()).map(Some).collect::<Vec<_>>();
        Ok(Grid {
            width: w,
            height: h,
            nodes,
            available,
            slots,
        })
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    /// Total number of nodes in the grid
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return the node at `(x, y)`, or `None` if the coordinates lie outside
    /// the grid.  This is the only bounds check used by movement.
    pub(crate) fn node_at(&self, x: i32, y: i32) -> Option<Node> {
        let x = u16::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(y).ok().filter(|&y| y < self.height)?;
        self.nodes.get(self.flat_index(x, y)).copied()
    }

    /// Iterate over every node in row-major order, starting from `(0, 0)`
    pub(crate) fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().copied()
    }

    pub(crate) fn available_len(&self) -> usize {
        self.available.len()
    }

    pub(crate) fn is_available(&self, node: Node) -> bool {
        self.index_of(node)
            .is_some_and(|i| self.slots.get(i).is_some_and(Option::is_some))
    }

    /// Remove `node` from the available set.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this grid or is not currently
    /// available.
    pub(crate) fn mark_occupied(&mut self, node: Node) {
        let i = self.member_index(node);
        let Some(slot) = self.slots[i].take() else {
            panic!("Grid::mark_occupied() called on already-occupied node {node:?}");
        };
        let removed = self.available.swap_remove(slot);
        debug_assert_eq!(removed, i, "available set and slot table disagree");
        if let Some(&moved) = self.available.get(slot) {
            self.slots[moved] = Some(slot);
        }
    }

    /// Return `node` to the available set.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this grid or is already available.
    pub(crate) fn mark_available(&mut self, node: Node) {
        let i = self.member_index(node);
        assert!(
            self.slots[i].is_none(),
            "Grid::mark_available() called on already-available node {node:?}"
        );
        self.slots[i] = Some(self.available.len());
        self.available.push(i);
    }

    /// Select an available node uniformly at random.  Returns `None` when no
    /// nodes are available, i.e., when the board is full.
    pub(crate) fn random_available_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Node> {
        self.available.choose(rng).map(|&i| self.nodes[i])
    }

    fn flat_index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    fn index_of(&self, node: Node) -> Option<usize> {
        (node.x < self.width && node.y < self.height).then(|| self.flat_index(node.x, node.y))
    }

    fn member_index(&self, node: Node) -> usize {
        let Some(i) = self.index_of(node) else {
            panic!(
                "node {node:?} does not belong to a {}x{} grid",
                self.width, self.height
            );
        };
        i
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("invalid board dimensions {width}x{height}: both must be positive and at most 65535, and the board must contain the starting cell (3, 3)")]
    InvalidDimension { width: i32, height: i32 },
}
