use canbot_engine::{Action, ContextCode};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::genes;

/// A complete action table: one [`Action`] per [`ContextCode`].
///
/// The table is a total function by construction: fixed length, every
/// index defined. Its wire form is a 243-character string of action
/// characters in code order (see [`Action::as_char`]), which is the
/// documented stable serialization of a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTable([Action; ContextCode::COUNT]);

impl ActionTable {
    /// Number of table entries (243).
    pub const LEN: usize = ContextCode::COUNT;

    /// Builds a table by applying a function to every context code.
    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(ContextCode) -> Action,
    {
        let mut actions = [Action::PickUp; Self::LEN];
        for code in ContextCode::all() {
            actions[code.index()] = f(code);
        }
        Self(actions)
    }

    /// Returns the action for a context code. O(1) lookup, total for
    /// every valid code.
    #[must_use]
    pub fn get(&self, code: ContextCode) -> Action {
        self.0[code.index()]
    }

    pub fn set(&mut self, code: ContextCode, action: Action) {
        self.0[code.index()] = action;
    }

    #[must_use]
    pub fn actions(&self) -> &[Action; Self::LEN] {
        &self.0
    }

    /// Returns the 243-character gene string, one action character per
    /// context code in code order.
    #[must_use]
    pub fn gene_string(&self) -> String {
        self.0.iter().map(|action| action.as_char()).collect()
    }
}

impl Serialize for ActionTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.gene_string())
    }
}

impl<'de> Deserialize<'de> for ActionTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let char_count = s.chars().count();
        if char_count != Self::LEN {
            return Err(serde::de::Error::custom(format!(
                "invalid action table: expected {} characters, got {char_count}",
                Self::LEN
            )));
        }

        let mut actions = [Action::PickUp; Self::LEN];
        for (index, c) in s.chars().enumerate() {
            actions[index] = Action::from_char(c).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid action character at index {index}: {c}"))
            })?;
        }
        Ok(Self(actions))
    }
}

/// A strategy genotype: an action table plus fitness metadata.
///
/// The score stays at its unset sentinel until the first evaluation
/// pass. `rank` is transient: the archive assigns it when ranking and
/// clears it between generations.
#[derive(Debug, Clone)]
pub struct Policy {
    table: ActionTable,
    score: f32,
    birth_generation: usize,
    mutation_count: usize,
    rank: Option<usize>,
}

impl Policy {
    /// Creates a policy with every table entry drawn uniformly from the
    /// action set. Used for the initial generation.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_table(genes::random_table(rng), 0)
    }

    /// Wraps an existing table, with score unset and no mutations yet.
    #[must_use]
    pub fn from_table(table: ActionTable, birth_generation: usize) -> Self {
        Self {
            table,
            score: f32::MIN,
            birth_generation,
            mutation_count: 0,
            rank: None,
        }
    }

    /// Breeds a new policy by single-point crossover of two parents.
    ///
    /// Entries before the crossover locus come from `father`, entries at
    /// and after it from `mother`, so swapping the parents yields the
    /// complementary child. The offspring's score starts unset.
    #[must_use]
    pub fn offspring(father: &Policy, mother: &Policy, birth_generation: usize) -> Self {
        Self::from_table(
            genes::single_point_cross(&father.table, &mother.table),
            birth_generation,
        )
    }

    #[must_use]
    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    /// Looks up the action for a context code.
    #[must_use]
    pub fn act(&self, code: ContextCode) -> Action {
        self.table.get(code)
    }

    /// Applies per-gene mutation to the table. The mutation counter
    /// increments once per call regardless of how many entries changed.
    pub fn mutate<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        genes::mutate(&mut self.table, rng);
        self.mutation_count += 1;
    }

    /// Records the mean session score of the latest evaluation pass.
    pub fn update_score(&mut self, mean_session_score: f32) {
        self.score = mean_session_score;
    }

    /// The mean fitness from the latest evaluation, or `f32::MIN` while
    /// unevaluated.
    #[must_use]
    pub fn score(&self) -> f32 {
        self.score
    }

    #[must_use]
    pub fn birth_generation(&self) -> usize {
        self.birth_generation
    }

    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.mutation_count
    }

    /// The archive rank from the most recent ranking, if any.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }

    pub(crate) fn clear_rank(&mut self) {
        self.rank = None;
    }

    /// Fraction of table entries agreeing with `other`, in `[0, 1]`.
    #[must_use]
    pub fn similarity(&self, other: &Policy) -> f32 {
        genes::similarity(&self.table, &other.table)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    #[test]
    fn test_act_is_total() {
        let policy = Policy::random(&mut test_rng());
        for code in ContextCode::all() {
            // Every valid code has a defined action; the lookup itself
            // is the assertion.
            let _ = policy.act(code);
        }
    }

    #[test]
    fn test_new_policy_score_is_unset() {
        let policy = Policy::random(&mut test_rng());
        assert_eq!(policy.score(), f32::MIN);
        assert_eq!(policy.mutation_count(), 0);
        assert_eq!(policy.rank(), None);
    }

    #[test]
    fn test_mutate_increments_counter_once_per_call() {
        let mut rng = test_rng();
        let mut policy = Policy::random(&mut rng);

        policy.mutate(&mut rng);
        policy.mutate(&mut rng);

        assert_eq!(policy.mutation_count(), 2);
    }

    #[test]
    fn test_similarity_is_reflexive_and_symmetric() {
        let mut rng = test_rng();
        let a = Policy::random(&mut rng);
        let b = Policy::random(&mut rng);

        assert_eq!(a.similarity(&a), 1.0);
        assert_eq!(b.similarity(&b), 1.0);
        assert_eq!(a.similarity(&b), b.similarity(&a));
    }

    #[test]
    fn test_offspring_genes_come_from_the_parents() {
        let mut rng = test_rng();
        let father = Policy::random(&mut rng);
        let mother = Policy::random(&mut rng);

        let child = Policy::offspring(&father, &mother, 7);

        assert_eq!(child.birth_generation(), 7);
        assert_eq!(child.score(), f32::MIN);
        for code in ContextCode::all() {
            let gene = child.act(code);
            assert!(gene == father.act(code) || gene == mother.act(code));
        }
    }

    #[test]
    fn test_action_table_serde_roundtrip() {
        let table = Policy::random(&mut test_rng()).table().clone();
        let serialized = serde_json::to_string(&table).unwrap();
        let deserialized: ActionTable = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, table);
    }

    #[test]
    fn test_action_table_known_string() {
        let table = ActionTable::from_fn(|_| Action::PickUp);
        let serialized = serde_json::to_string(&table).unwrap();
        let expected = format!("\"{}\"", "P".repeat(ActionTable::LEN));
        assert_eq!(serialized, expected);
    }

    #[test]
    fn test_action_table_deserialize_error_cases() {
        // Wrong length
        let short = format!("\"{}\"", "P".repeat(ActionTable::LEN - 1));
        assert!(serde_json::from_str::<ActionTable>(&short).is_err());
        let long = format!("\"{}\"", "P".repeat(ActionTable::LEN + 1));
        assert!(serde_json::from_str::<ActionTable>(&long).is_err());

        // Invalid character
        let mut genes = "N".repeat(ActionTable::LEN - 1);
        genes.push('X');
        let bad_char = format!("\"{genes}\"");
        assert!(serde_json::from_str::<ActionTable>(&bad_char).is_err());
    }

    #[test]
    fn test_gene_string_matches_table_order() {
        let mut table = ActionTable::from_fn(|_| Action::MoveNorth);
        let code = ContextCode::from_index(9).unwrap();
        table.set(code, Action::MoveEast);

        let genes = table.gene_string();
        assert_eq!(genes.len(), ActionTable::LEN);
        assert_eq!(genes.chars().nth(9), Some('E'));
        assert_eq!(genes.chars().filter(|&c| c == 'E').count(), 1);
    }
}
