use crate::error::{GfResult, GroupForgeError};
use clap::{Args, ValueEnum};
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use strum_macros::Display;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// How many groups to build.
    #[arg(long, short = 'g', default_value_t = 24)]
    pub groups: usize,

    /// Trials dispatched per parallel batch. Tens is the sweet spot:
    /// large enough to amortize scheduling, small enough that the
    /// deadline check between batches stays responsive.
    #[arg(long, default_value_t = 50)]
    pub batch_size: usize,

    /// How long to keep sampling random partitions, in minutes.
    #[arg(long, default_value_t = 1.0)]
    pub runtime: f64,

    /// Stop the sampling phase after this many trials instead of (or as
    /// well as) the runtime.
    #[arg(long)]
    pub max_trials: Option<u64>,

    /// Swap-refinement pass budget.
    #[arg(long, default_value_t = 10_000)]
    pub swap_passes: usize,
}

impl SearchParams {
    pub fn max_time(&self) -> Duration {
        Duration::from_secs_f64(self.runtime * 60.0)
    }
}

/// Maps roster file columns onto the fields the engine needs. Defaults
/// match the sign-up sheet this tool grew up around; override them to
/// fit whatever the form exports.
#[derive(Args, Debug, Clone)]
pub struct ColumnMap {
    #[arg(long, default_value = "Name")]
    pub name_col: String,

    #[arg(long, default_value = "email")]
    pub email_col: String,

    /// Attribute columns, in scoring order.
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "Study programme,To which Gender do you identify the most?,Home Country"
    )]
    pub attr_cols: Vec<String>,
}

/// What to do when the roster contains duplicate rows or identities.
#[derive(ValueEnum, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum DuplicateAction {
    /// Stop so the roster can be fixed first (the safe default).
    Abort,
    /// Log the duplicates and keep going.
    Warn,
}

/// Loads per-attribute weights from a JSON object keyed by attribute
/// column name, e.g. `{"Home Country": 2}`. Attributes the file does
/// not mention keep weight 1; keys that match no attribute are warned
/// about rather than silently dropped.
pub fn load_weights(path: &str, attr_names: &[String]) -> GfResult<Vec<i64>> {
    let text = fs::read_to_string(path)?;
    let map: HashMap<String, i64> = serde_json::from_str(&text)?;

    for key in map.keys() {
        if !attr_names.iter().any(|n| n == key) {
            warn!("weights file names unknown attribute '{}'", key);
        }
    }
    if let Some((key, w)) = map.iter().find(|(_, w)| **w < 0) {
        return Err(GroupForgeError::InvalidConfiguration(format!(
            "weight for '{}' is negative ({})",
            key, w
        )));
    }

    Ok(attr_names
        .iter()
        .map(|n| map.get(n).copied().unwrap_or(1))
        .collect())
}
