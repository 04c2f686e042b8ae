use clap::{Parser, Subcommand};

use self::{evolve::EvolveArg, replay::ReplayArg};

mod evolve;
mod replay;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    evolve: EvolveArg,
    /// What mode to run the program in (evolution when omitted)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Replay a saved champion strategy over fresh sessions
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Some(Mode::Replay(arg)) => replay::run(&arg),
        None => evolve::run(&args.evolve),
    }
}
