use crate::policy::{ActionTable, Policy};

/// A de-duplicated, rankable store of policies across generations.
///
/// Entries are unique under exact table equality, not a similarity
/// threshold. Ranking sorts by score descending with a stable sort;
/// archived scores are frozen, so ties keep their insertion order and
/// repeated rankings are deterministic. Ranking also retires entries
/// beyond the configured survivor bound, which keeps the archive an
/// all-time elite rather than an unbounded log.
#[derive(Debug, Clone)]
pub struct PolicyArchive {
    survivor_bound: usize,
    entries: Vec<Policy>,
}

impl PolicyArchive {
    /// Creates an archive that retires entries ranked at or beyond
    /// `survivor_bound`.
    #[must_use]
    pub fn new(survivor_bound: usize) -> Self {
        assert!(survivor_bound > 0);
        Self {
            survivor_bound,
            entries: Vec::with_capacity(survivor_bound),
        }
    }

    /// Whether an entry with an identical action table already exists.
    #[must_use]
    pub fn contains(&self, table: &ActionTable) -> bool {
        self.entries.iter().any(|entry| entry.table() == table)
    }

    /// Inserts a policy unless its table is already stored. Returns
    /// whether the policy was stored.
    pub fn insert(&mut self, policy: Policy) -> bool {
        if self.contains(policy.table()) {
            return false;
        }
        self.entries.push(policy);
        true
    }

    /// Sorts entries by score descending, retires everything beyond the
    /// survivor bound, assigns ranks, and returns the ranked slice.
    /// Rank 0 is the fittest entry.
    pub fn ranked_view(&mut self) -> &[Policy] {
        self.entries.sort_by(|a, b| b.score().total_cmp(&a.score()));
        self.entries.truncate(self.survivor_bound);
        for (rank, policy) in self.entries.iter_mut().enumerate() {
            policy.set_rank(rank);
        }
        &self.entries
    }

    /// Returns the entry at the given zero-based rank of the most
    /// recent [`Self::ranked_view`].
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&Policy> {
        self.entries.get(rank)
    }

    /// Clears the transient rank annotations without discarding entries
    /// or re-sorting. Invoked between generations.
    pub fn reset_ranks(&mut self) {
        for policy in &mut self.entries {
            policy.clear_rank();
        }
    }

    /// Mean pairwise similarity across all stored entries, or `None`
    /// with fewer than two entries. A convergence diagnostic: values
    /// near 1 mean the archive has collapsed onto near-identical tables.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average_similarity(&self) -> Option<f32> {
        if self.entries.len() < 2 {
            return None;
        }
        let mut total = 0.0;
        let mut pairs = 0_usize;
        for (i, a) in self.entries.iter().enumerate() {
            for b in &self.entries[i + 1..] {
                total += a.similarity(b);
                pairs += 1;
            }
        }
        Some(total / pairs as f32)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
