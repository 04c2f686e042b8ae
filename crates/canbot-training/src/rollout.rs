use canbot_engine::{ContextCode, Environment};
use rand::Rng;

use crate::policy::ActionTable;

/// Runs cleaning sessions to turn an action table into a fitness score.
///
/// Each session is an ephemeral [`Environment`]: reset with a fresh
/// random can placement, then a fixed number of
/// observe → encode → act → step iterations. Fitness is the mean over
/// several independent sessions, which damps the variance of the random
/// can placement.
#[derive(Debug, Clone, Copy)]
pub struct SessionRunner {
    sessions: usize,
    steps: usize,
}

impl SessionRunner {
    /// # Arguments
    ///
    /// * `sessions` - sessions averaged per fitness evaluation (must be
    ///   non-zero)
    /// * `steps` - steps per session; zero steps is allowed and yields a
    ///   zero score
    #[must_use]
    pub fn new(sessions: usize, steps: usize) -> Self {
        assert!(sessions > 0);
        Self { sessions, steps }
    }

    /// Plays one session and returns its score.
    pub fn run_session<R>(&self, table: &ActionTable, rng: &mut R) -> i32
    where
        R: Rng + ?Sized,
    {
        let mut env = Environment::new();
        env.reset(rng);
        for _ in 0..self.steps {
            let code = ContextCode::encode(env.observe());
            env.step(table.get(code), rng);
        }
        env.score()
    }

    /// Plays the configured number of sessions and returns the mean
    /// score.
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_score<R>(&self, table: &ActionTable, rng: &mut R) -> f32
    where
        R: Rng + ?Sized,
    {
        let mut total = 0_i64;
        for _ in 0..self.sessions {
            total += i64::from(self.run_session(table, rng));
        }
        total as f32 / self.sessions as f32
    }
}
