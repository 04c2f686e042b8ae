use crate::core::percept::Percept;

/// The five local percepts available to the agent at one time step.
///
/// The agent sees its own cell plus the four neighboring cells. It has
/// no other knowledge of the world: not its size, not its shape, not
/// the location of any other can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// The cell the agent stands on.
    pub current: Percept,
    /// The cell one step north (a wall when the agent is on the top row).
    pub north: Percept,
    /// The cell one step east.
    pub east: Percept,
    /// The cell one step south.
    pub south: Percept,
    /// The cell one step west.
    pub west: Percept,
}

/// A bijective base-3 encoding of an [`Observation`].
///
/// Each percept contributes one base-3 digit, current cell first:
///
/// ```text
/// code = current * 81 + north * 27 + east * 9 + south * 3 + west
/// ```
///
/// Five digits over three symbols give 243 distinct codes, so a valid
/// code is always in `[0, 242]`. The type can only be constructed by
/// encoding an observation or through the checked [`Self::from_index`],
/// which keeps out-of-range codes unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContextCode(u8);

impl ContextCode {
    /// Number of distinct context codes (3^5 = 243).
    pub const COUNT: usize = Percept::LEN.pow(5);

    /// Encodes an observation into its context code.
    #[must_use]
    pub const fn encode(observation: Observation) -> Self {
        let Observation {
            current,
            north,
            east,
            south,
            west,
        } = observation;
        Self(
            current.digit() * 81
                + north.digit() * 27
                + east.digit() * 9
                + south.digit() * 3
                + west.digit(),
        )
    }

    /// Creates a context code from a raw table index.
    ///
    /// Returns `None` if `index` is not in `[0, 242]`. This is the only
    /// way to build a code from untrusted data.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&value| usize::from(value) < Self::COUNT)
            .map(Self)
    }

    /// Returns the table index of this code.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Iterates all 243 context codes in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=242).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PERCEPTS: [Percept; Percept::LEN] = [Percept::Empty, Percept::Can, Percept::Wall];

    fn all_observations() -> impl Iterator<Item = Observation> {
        ALL_PERCEPTS.into_iter().flat_map(|current| {
            ALL_PERCEPTS.into_iter().flat_map(move |north| {
                ALL_PERCEPTS.into_iter().flat_map(move |east| {
                    ALL_PERCEPTS.into_iter().flat_map(move |south| {
                        ALL_PERCEPTS.into_iter().map(move |west| Observation {
                            current,
                            north,
                            east,
                            south,
                            west,
                        })
                    })
                })
            })
        })
    }

    #[test]
    fn test_encode_is_a_bijection() {
        let mut seen = [false; ContextCode::COUNT];
        for observation in all_observations() {
            let code = ContextCode::encode(observation);
            assert!(code.index() < ContextCode::COUNT);
            assert!(!seen[code.index()], "duplicate code {}", code.index());
            seen[code.index()] = true;
        }
        assert!(seen.iter().all(|&covered| covered));
    }

    #[test]
    fn test_encode_known_codes() {
        // All empty encodes to zero.
        let empty = Observation {
            current: Percept::Empty,
            north: Percept::Empty,
            east: Percept::Empty,
            south: Percept::Empty,
            west: Percept::Empty,
        };
        assert_eq!(ContextCode::encode(empty).index(), 0);

        // A can directly east contributes the east digit only: 1 * 9.
        let can_east = Observation {
            east: Percept::Can,
            ..empty
        };
        assert_eq!(ContextCode::encode(can_east).index(), 9);

        // A can on the current cell contributes 1 * 81.
        let can_here = Observation {
            current: Percept::Can,
            ..empty
        };
        assert_eq!(ContextCode::encode(can_here).index(), 81);

        // All walls is the largest code.
        let all_walls = Observation {
            current: Percept::Wall,
            north: Percept::Wall,
            east: Percept::Wall,
            south: Percept::Wall,
            west: Percept::Wall,
        };
        assert_eq!(ContextCode::encode(all_walls).index(), 242);
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(ContextCode::from_index(0).map(ContextCode::index), Some(0));
        assert_eq!(
            ContextCode::from_index(242).map(ContextCode::index),
            Some(242)
        );
        assert_eq!(ContextCode::from_index(243), None);
        assert_eq!(ContextCode::from_index(usize::MAX), None);
    }

    #[test]
    fn test_all_covers_every_code_once() {
        let indices: Vec<_> = ContextCode::all().map(ContextCode::index).collect();
        assert_eq!(indices.len(), ContextCode::COUNT);
        assert!(indices.windows(2).all(|w| w[0] + 1 == w[1]));
    }
}
