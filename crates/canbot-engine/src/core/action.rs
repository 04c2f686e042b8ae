use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// One of the four compass directions the agent can move in.
///
/// `(0, 0)` is the northwest corner: north decreases the row,
/// south increases it, east increases the column, west decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.random_range(0..=3) {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }
}

/// Enum representing one entry of a strategy's action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    /// Move one cell north.
    MoveNorth = 0,
    /// Move one cell east.
    MoveEast = 1,
    /// Move one cell south.
    MoveSouth = 2,
    /// Move one cell west.
    MoveWest = 3,
    /// Pick up a can from the current cell.
    PickUp = 4,
    /// Move one cell in a uniformly random direction.
    MoveRandom = 5,
}

impl Distribution<Action> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        match rng.random_range(0..=5) {
            0 => Action::MoveNorth,
            1 => Action::MoveEast,
            2 => Action::MoveSouth,
            3 => Action::MoveWest,
            4 => Action::PickUp,
            _ => Action::MoveRandom,
        }
    }
}

impl Action {
    /// Number of action kinds (6).
    pub const LEN: usize = 6;

    /// Returns the direction of a directional move, or `None` for
    /// [`Action::PickUp`] and [`Action::MoveRandom`].
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveNorth => Some(Direction::North),
            Action::MoveEast => Some(Direction::East),
            Action::MoveSouth => Some(Direction::South),
            Action::MoveWest => Some(Direction::West),
            Action::PickUp | Action::MoveRandom => None,
        }
    }

    /// Returns the single character representation of this action.
    ///
    /// # Examples
    ///
    /// ```
    /// use canbot_engine::Action;
    ///
    /// assert_eq!(Action::MoveNorth.as_char(), 'N');
    /// assert_eq!(Action::PickUp.as_char(), 'P');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Action::MoveNorth => 'N',
            Action::MoveEast => 'E',
            Action::MoveSouth => 'S',
            Action::MoveWest => 'W',
            Action::PickUp => 'P',
            Action::MoveRandom => 'R',
        }
    }

    /// Parses an action from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use canbot_engine::Action;
    ///
    /// assert_eq!(Action::from_char('E'), Some(Action::MoveEast));
    /// assert_eq!(Action::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Action::MoveNorth),
            'E' => Some(Action::MoveEast),
            'S' => Some(Action::MoveSouth),
            'W' => Some(Action::MoveWest),
            'P' => Some(Action::PickUp),
            'R' => Some(Action::MoveRandom),
            _ => None,
        }
    }
}
