//! Genetic algorithm for evolving can-collecting strategies.
//!
//! This crate evolves finite-state control policies for the grid-world
//! agent in `canbot-engine`. A policy is a complete lookup table from
//! context code to action; the genetic algorithm searches the space of
//! such tables by simulated rollouts.
//!
//! # How Evolution Works
//!
//! 1. **Population** - Start from randomly initialized policies
//! 2. **Evaluation** - Each policy plays multiple cleaning sessions;
//!    fitness is the mean session score
//! 3. **Archiving** - Every evaluated policy enters a de-duplicated,
//!    rankable archive accumulated across generations
//! 4. **Selection** - The archive's top entries become the survivor pool
//! 5. **Reproduction** - Survivors are copied forward, the remainder of
//!    the population is bred from tournament-selected parent pairs via
//!    single-point crossover and mutation
//! 6. **Repeat** - Continue for a configured number of generations
//!
//! # Key Components
//!
//! - [`policy::Policy`] - a genotype: action table plus fitness metadata
//! - [`genes`] - the table-level operators (initialization, mutation,
//!   crossover, similarity)
//! - [`archive::PolicyArchive`] - the de-duplicated cross-generation store
//! - [`rollout::SessionRunner`] - turns a table into a fitness score
//! - [`evolution::EvolutionEngine`] - drives the generational loop
//!
//! The whole run is driven by a single seeded generator (see
//! [`canbot_engine::WorldSeed`]), so a run is reproducible from its seed.

pub mod archive;
pub mod evolution;
pub mod genes;
pub mod policy;
pub mod rollout;
