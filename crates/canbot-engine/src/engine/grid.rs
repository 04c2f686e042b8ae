use rand::Rng;

use crate::core::{Direction, Percept};

/// Number of columns in the grid.
pub const GRID_WIDTH: usize = 10;
/// Number of rows in the grid.
pub const GRID_HEIGHT: usize = 10;

/// Position of the agent on the grid.
///
/// Coordinates are stored as `u8` for compactness. `(0, 0)` is the
/// northwest corner; rows increase southward and columns eastward. The
/// constructor asserts bounds, so a position is always on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentPosition {
    row: u8,
    col: u8,
}

impl AgentPosition {
    /// The northwest corner, where every session starts.
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!((row as usize) < GRID_HEIGHT);
        assert!((col as usize) < GRID_WIDTH);
        Self { row, col }
    }

    #[must_use]
    pub fn row(self) -> usize {
        usize::from(self.row)
    }

    #[must_use]
    pub fn col(self) -> usize {
        usize::from(self.col)
    }

    /// Returns the neighboring position in the given direction, or `None`
    /// if that step would leave the grid.
    #[must_use]
    pub const fn moved(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::North => {
                if self.row == 0 {
                    None
                } else {
                    Some(Self::new(self.row - 1, self.col))
                }
            }
            Direction::East => {
                if self.col as usize >= GRID_WIDTH - 1 {
                    None
                } else {
                    Some(Self::new(self.row, self.col + 1))
                }
            }
            Direction::South => {
                if self.row as usize >= GRID_HEIGHT - 1 {
                    None
                } else {
                    Some(Self::new(self.row + 1, self.col))
                }
            }
            Direction::West => {
                if self.col == 0 {
                    None
                } else {
                    Some(Self::new(self.row, self.col - 1))
                }
            }
        }
    }
}

/// The bounded 10x10 cell matrix.
///
/// Interior cells hold only [`Percept::Empty`] or [`Percept::Can`];
/// [`Percept::Wall`] is what off-grid coordinates read as, and reading
/// happens through [`Environment`](super::Environment) which handles the
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Percept; GRID_WIDTH]; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[Percept::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    /// Repopulates every cell: a can with probability `density`,
    /// empty otherwise.
    pub fn populate<R>(&mut self, density: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for row in &mut self.cells {
            for cell in row {
                *cell = if rng.random_bool(density) {
                    Percept::Can
                } else {
                    Percept::Empty
                };
            }
        }
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells = [[Percept::Empty; GRID_WIDTH]; GRID_HEIGHT];
    }

    /// Reads the cell at an in-bounds position.
    #[must_use]
    pub fn percept(&self, position: AgentPosition) -> Percept {
        self.cells[position.row()][position.col()]
    }

    /// Puts a can on the given cell. Used for scenario setup.
    pub fn place_can(&mut self, position: AgentPosition) {
        self.cells[position.row()][position.col()] = Percept::Can;
    }

    pub(crate) fn remove_can(&mut self, position: AgentPosition) {
        self.cells[position.row()][position.col()] = Percept::Empty;
    }

    /// Returns the number of cans currently on the grid.
    #[must_use]
    pub fn can_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Percept::Can)
            .count()
    }
}
