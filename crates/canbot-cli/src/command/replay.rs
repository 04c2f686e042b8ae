use std::path::PathBuf;

use canbot_engine::WorldSeed;
use canbot_training::rollout::SessionRunner;
use rand::Rng as _;

use crate::model::strategy_model::StrategyModel;

const DEFAULT_SESSIONS: usize = 100;
const DEFAULT_STEPS: usize = 200;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Champion model file to replay
    #[arg(short = 'm', long, default_value = "champion.json")]
    model: PathBuf,
    /// Number of steps in a cleaning session
    #[arg(short = 's', long, default_value_t = DEFAULT_STEPS)]
    steps: usize,
    /// Number of sessions to replay
    #[arg(long, default_value_t = DEFAULT_SESSIONS)]
    sessions: usize,
    /// Seed for the replay as 32 hex characters (random when omitted)
    #[arg(long)]
    seed: Option<WorldSeed>,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.sessions > 0, "at least one session is required");

    let model = StrategyModel::open(&arg.model)?;
    eprintln!(
        "Replaying champion from {} (trained {}, score {:.1})",
        arg.model.display(),
        model.trained_at,
        model.final_score
    );

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {seed}");

    let runner = SessionRunner::new(arg.sessions, arg.steps);
    let mut rng = seed.rng();
    let mut total = 0_i64;
    for session in 0..arg.sessions {
        let score = runner.run_session(&model.actions, &mut rng);
        println!("Session {session}: {score}");
        total += i64::from(score);
    }

    #[expect(clippy::cast_precision_loss)]
    let average = total as f32 / arg.sessions as f32;
    println!("Average score over {} sessions: {average:.1}", arg.sessions);

    Ok(())
}
