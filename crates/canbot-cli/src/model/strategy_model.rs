use std::path::Path;

use canbot_training::policy::ActionTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

/// Current schema version of the champion model file.
pub const STRATEGY_SCHEMA_VERSION: u32 = 1;

/// The persisted champion strategy.
///
/// The `actions` field is the documented stable serialization of the
/// 243-entry action table: one action character per context code in
/// code order. Everything else is provenance metadata for the replay
/// tool and for humans reading the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyModel {
    pub schema_version: u32,
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    pub steps: usize,
    pub final_score: f32,
    pub birth_generation: usize,
    pub mutation_count: usize,
    pub actions: ActionTable,
}

impl StrategyModel {
    /// Loads and validates a champion model file.
    ///
    /// Table length and action characters are validated by the
    /// [`ActionTable`] deserializer; this adds the schema version check.
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let model: Self = util::read_json_file("strategy model", path)?;
        anyhow::ensure!(
            model.schema_version == STRATEGY_SCHEMA_VERSION,
            "unsupported strategy model schema version {} (expected {})",
            model.schema_version,
            STRATEGY_SCHEMA_VERSION
        );
        Ok(model)
    }
}
