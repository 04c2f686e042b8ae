use canbot_engine::WorldSeed;
use canbot_stats::descriptive::ScoreStats;
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{archive::PolicyArchive, policy::Policy, rollout::SessionRunner};

/// Parameters controlling one evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionParams {
    /// Live population size per generation.
    pub population: usize,
    /// Survivor pool size, also the archive's retirement bound.
    pub survivors: usize,
    /// Sessions averaged per fitness evaluation.
    pub sessions: usize,
    /// Steps per cleaning session.
    pub steps: usize,
    /// Candidates sampled per tournament.
    pub tournament_size: usize,
    /// Probability that a copied survivor is mutated.
    pub elite_mutation_rate: f64,
    /// Probability that a bred child is mutated.
    pub child_mutation_rate: f64,
    /// Probability that the next pair's tournaments are biased toward
    /// weaker ranks.
    pub weak_bias_rate: f64,
    /// How far a biased tournament shifts its sampled indices toward
    /// weaker ranks (clamped to the survivor pool).
    pub weak_bias_shift: usize,
    /// Re-draw the mother tournament until it differs from the father.
    ///
    /// Off by default: the father and mother tournaments run
    /// independently, so a policy can breed with itself. That pairing
    /// yields clones, which the archive's de-duplication absorbs.
    pub distinct_parents: bool,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population: 200,
            survivors: 20,
            sessions: 100,
            steps: 200,
            tournament_size: 3,
            elite_mutation_rate: 0.01,
            child_mutation_rate: 0.25,
            weak_bias_rate: 0.1,
            weak_bias_shift: 2,
            distinct_parents: false,
        }
    }
}

/// Drives the generational loop: evaluation, archiving, selection, and
/// reproduction.
///
/// The engine exclusively owns the live population, the cross-generation
/// archive, and the single random generator behind the whole run. One
/// call to [`Self::run_generation`] takes the population through a full
/// cycle and replaces it wholesale with the next generation.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: EvolutionParams,
    rng: Pcg32,
    population: Vec<Policy>,
    archive: PolicyArchive,
    generation: usize,
}

impl EvolutionEngine {
    /// Creates an engine with a randomly initialized population.
    ///
    /// # Panics
    ///
    /// Panics when the parameters are structurally invalid: an empty
    /// population, no survivors, a survivor pool larger than the
    /// population, no sessions, or an empty tournament.
    #[must_use]
    pub fn new(params: EvolutionParams, seed: WorldSeed) -> Self {
        assert!(params.population > 0);
        assert!(params.survivors > 0);
        assert!(params.survivors <= params.population);
        assert!(params.sessions > 0);
        assert!(params.tournament_size > 0);

        let mut rng = seed.rng();
        let population = (0..params.population)
            .map(|_| Policy::random(&mut rng))
            .collect();
        let archive = PolicyArchive::new(params.survivors);
        Self {
            params,
            rng,
            population,
            archive,
            generation: 0,
        }
    }

    /// Runs one full generation cycle:
    ///
    /// 1. **Evaluating**: every live policy plays its sessions and
    ///    records its mean score
    /// 2. **Archiving**: every evaluated policy is offered to the
    ///    archive (duplicates are silently skipped)
    /// 3. **Selecting**: the archive's ranked top entries become the
    ///    survivor pool
    /// 4. **Reproducing**: survivors are copied forward and the rest of
    ///    the population is bred from tournament-selected pairs
    pub fn run_generation(&mut self) {
        self.evaluate();
        for policy in &self.population {
            self.archive.insert(policy.clone());
        }
        let survivors: Vec<Policy> = self
            .archive
            .ranked_view()
            .iter()
            .take(self.params.survivors)
            .cloned()
            .collect();
        self.reproduce(&survivors);
    }

    fn evaluate(&mut self) {
        let runner = SessionRunner::new(self.params.sessions, self.params.steps);
        for policy in &mut self.population {
            let mean = runner.mean_score(policy.table(), &mut self.rng);
            policy.update_score(mean);
        }
    }

    fn reproduce(&mut self, survivors: &[Policy]) {
        let mut next = Vec::with_capacity(self.params.population);

        // Survivor copies, rank-ordered, occasionally mutated.
        for survivor in survivors {
            let mut policy = survivor.clone();
            if self.rng.random_bool(self.params.elite_mutation_rate) {
                policy.mutate(&mut self.rng);
            }
            next.push(policy);
        }

        // Breed the remainder in pairs. An odd remainder takes only the
        // first child of the final pair.
        let mut shift = 0;
        while next.len() < self.params.population {
            let father = self.tournament(survivors, shift);
            let mother = self.pick_mother(survivors, father, shift);

            let mut first =
                Policy::offspring(&survivors[father], &survivors[mother], self.generation);
            if self.rng.random_bool(self.params.child_mutation_rate) {
                first.mutate(&mut self.rng);
            }
            next.push(first);

            if next.len() < self.params.population {
                let mut second =
                    Policy::offspring(&survivors[mother], &survivors[father], self.generation);
                if self.rng.random_bool(self.params.child_mutation_rate) {
                    second.mutate(&mut self.rng);
                }
                next.push(second);
            }

            // Occasionally bias the next pair toward weaker performers.
            shift = if self.rng.random_bool(self.params.weak_bias_rate) {
                self.params.weak_bias_shift
            } else {
                0
            };
        }

        self.population = next;
    }

    /// Tournament selection over the survivor pool: sample
    /// `tournament_size` indices uniformly and keep the one with the
    /// strictly highest score. A non-zero `shift` pushes every sampled
    /// index toward weaker ranks, clamped to the pool.
    fn tournament(&mut self, pool: &[Policy], shift: usize) -> usize {
        let last = pool.len() - 1;
        let mut best = (self.rng.random_range(0..pool.len()) + shift).min(last);
        for _ in 1..self.params.tournament_size {
            let index = (self.rng.random_range(0..pool.len()) + shift).min(last);
            if pool[index].score() > pool[best].score() {
                best = index;
            }
        }
        best
    }

    fn pick_mother(&mut self, pool: &[Policy], father: usize, shift: usize) -> usize {
        let mut mother = self.tournament(pool, shift);
        if self.params.distinct_parents && pool.len() > 1 {
            // A large shift can clamp every sampled index onto a single
            // slot, so retries run on the unshifted sample space where
            // every index stays reachable.
            while mother == father {
                mother = self.tournament(pool, 0);
            }
        }
        mother
    }

    /// Clears the archive's transient ranks and advances the generation
    /// counter. Call between generations.
    pub fn advance(&mut self) {
        self.archive.reset_ranks();
        self.generation += 1;
    }

    /// Out-of-sample estimate for the archive champion: fresh rollouts
    /// identical in procedure to evaluation, whose results feed back
    /// into nothing. Returns `None` while the archive is empty.
    pub fn benchmark(&mut self) -> Option<f32> {
        let table = self.archive.ranked_view().first()?.table().clone();
        let runner = SessionRunner::new(self.params.sessions, self.params.steps);
        Some(runner.mean_score(&table, &mut self.rng))
    }

    /// Descriptive statistics of the live population's fitness.
    #[must_use]
    pub fn score_stats(&self) -> Option<ScoreStats> {
        ScoreStats::new(self.population.iter().map(Policy::score))
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn population(&self) -> &[Policy] {
        &self.population
    }

    #[must_use]
    pub fn archive(&self) -> &PolicyArchive {
        &self.archive
    }

    pub fn archive_mut(&mut self) -> &mut PolicyArchive {
        &mut self.archive
    }
}
