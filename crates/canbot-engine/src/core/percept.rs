use serde::{Deserialize, Serialize};

/// The state of a single grid cell as perceived by the agent.
///
/// The discriminants double as the base-3 digits of the context encoding,
/// so they must stay at 0, 1, 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum Percept {
    /// An empty, walkable cell.
    Empty = 0,
    /// A cell holding a can.
    Can = 1,
    /// Anything outside the grid reads as a wall.
    Wall = 2,
}

impl Percept {
    /// Number of percept states (3).
    pub const LEN: usize = 3;

    /// Returns the base-3 digit used by the context encoding.
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }
}
