use std::path::PathBuf;

use canbot_engine::WorldSeed;
use canbot_training::{
    evolution::{EvolutionEngine, EvolutionParams},
    policy::Policy,
};
use chrono::Utc;
use rand::Rng as _;

use crate::{
    model::strategy_model::{STRATEGY_SCHEMA_VERSION, StrategyModel},
    util,
};

/// Live population size per generation.
const NR_AGENTS: usize = 200;
/// Sessions averaged per fitness evaluation.
const SESSIONS: usize = 100;
/// Survivor pool size, also the archive's retirement bound.
const SURVIVORS: usize = 20;

const DEFAULT_GENERATIONS: usize = 500;
const DEFAULT_STEPS: usize = 200;

/// Archive contents are reported every this many generations.
const REPORT_INTERVAL: usize = 10;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    /// Number of generations to evolve
    #[arg(short = 'g', long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Number of steps in a cleaning session
    #[arg(short = 's', long, default_value_t = DEFAULT_STEPS)]
    steps: usize,
    /// Seed for the run as 32 hex characters (random when omitted)
    #[arg(long)]
    seed: Option<WorldSeed>,
    /// Output file path for the champion model
    #[arg(long, default_value = "champion.json")]
    output: PathBuf,
}

pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.generations > 0,
        "at least one generation is required to produce a champion"
    );

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {seed}");

    let params = EvolutionParams {
        population: NR_AGENTS,
        survivors: SURVIVORS,
        sessions: SESSIONS,
        steps: arg.steps,
        ..EvolutionParams::default()
    };
    let mut engine = EvolutionEngine::new(params, seed);

    for generation in 0..arg.generations {
        engine.run_generation();

        if generation % REPORT_INTERVAL == 0 {
            report_decade(&mut engine, generation);
        }

        if generation + 1 < arg.generations {
            engine.advance();
        }
    }

    eprintln!();
    eprintln!("FINAL RANKINGS after {} generations", arg.generations);
    print_rankings(engine.archive_mut().ranked_view());

    let champion = engine
        .archive_mut()
        .ranked_view()
        .first()
        .cloned()
        .expect("a positive generation count leaves the archive non-empty");

    eprintln!();
    eprintln!(
        "WINNERS RANK SCORE: {:.1} BIRTHGEN: {} MUTATIONS: {}",
        champion.score(),
        champion.birth_generation(),
        champion.mutation_count()
    );
    eprintln!("Genes: {}", champion.table().gene_string());

    let testrun_average = engine
        .benchmark()
        .expect("the archive holds the champion just read");
    eprintln!("Testrun average score: {testrun_average:.1}");

    let model = StrategyModel {
        schema_version: STRATEGY_SCHEMA_VERSION,
        trained_at: Utc::now(),
        generations: arg.generations,
        steps: arg.steps,
        final_score: champion.score(),
        birth_generation: champion.birth_generation(),
        mutation_count: champion.mutation_count(),
        actions: champion.table().clone(),
    };
    util::save_json(&model, &arg.output)?;

    eprintln!();
    eprintln!("Champion saved successfully");
    eprintln!("  Path: {}", arg.output.display());
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final score: {:.1}", model.final_score);

    Ok(())
}

fn report_decade(engine: &mut EvolutionEngine, generation: usize) {
    eprintln!(
        "GENERATIONS {generation}-{}",
        generation + REPORT_INTERVAL - 1
    );
    print_rankings(engine.archive_mut().ranked_view());

    if let Some(similarity) = engine.archive().average_similarity() {
        eprintln!("  Generation average similarity: {similarity:.3}");
    }

    if let Some(stats) = engine.score_stats() {
        eprintln!("  Population score stats:");
        eprintln!("    Min:  {:.1}", stats.min);
        eprintln!("    Max:  {:.1}", stats.max);
        eprintln!("    Mean: {:.1}", stats.mean);
        eprintln!("    Std:  {:.1}", stats.std_dev);
    }
    eprintln!("**********************************************");
}

fn print_rankings(ranked: &[Policy]) {
    for policy in ranked {
        eprintln!(
            "  {:2}: score {:7.1}  birthgen {:4}  mutations {:3}",
            policy.rank().unwrap_or_default(),
            policy.score(),
            policy.birth_generation(),
            policy.mutation_count()
        );
    }
}
