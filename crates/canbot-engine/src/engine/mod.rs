//! Grid world simulation.
//!
//! This module provides the simulated world the agent acts in:
//!
//! - [`Grid`] - the bounded 10x10 cell matrix with random can placement
//! - [`AgentPosition`] - a grid coordinate that is valid by construction
//! - [`Environment`] - one cleaning session: grid, agent, accumulated score
//! - [`WorldSeed`] - seed for deterministic simulation runs
//!
//! # Session Flow
//!
//! 1. [`Environment::reset`] repopulates the grid and puts the agent at the
//!    northwest corner
//! 2. Each step, [`Environment::observe`] reads the five local percepts
//! 3. The observation is encoded and looked up in a strategy's action table
//! 4. [`Environment::step`] applies the chosen action and updates the score
//! 5. After a fixed step count, [`Environment::score`] is the session result

pub use self::{environment::*, grid::*, seed::*};

mod environment;
mod grid;
mod seed;
