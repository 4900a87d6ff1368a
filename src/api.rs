use crate::combinatorics;
use crate::error::{GfResult, GroupForgeError};
use crate::model::Partition;
use crate::optimizer::generator;
use crate::optimizer::runner::{SearchDriver, SearchOptions};
use crate::optimizer::{ProgressCallback, SwapOptimizer};
use crate::roster::Roster;
use crate::scorer::Scorer;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything the engine needs to know for one run. Budgets: with both
/// `max_time` and `max_trials` unset the sampling phase runs a single
/// batch, otherwise it stops at whichever budget trips first.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub n_groups: usize,
    pub batch_size: usize,
    pub max_time: Option<Duration>,
    pub max_trials: Option<u64>,
    pub swap_passes: usize,
    pub seed: Option<u64>,
    /// One non-negative weight per attribute; `None` means uniform 1.
    pub weights: Option<Vec<i64>>,
}

impl EngineConfig {
    pub fn new(n_groups: usize) -> Self {
        Self {
            n_groups,
            batch_size: 50,
            max_time: None,
            max_trials: None,
            swap_passes: 10_000,
            seed: None,
            weights: None,
        }
    }
}

/// Result of a full engine run.
#[derive(Debug)]
pub struct EngineReport {
    /// The final partition as member indices into the roster.
    pub partition: Partition,
    /// The same partition exported as ordered groups of original ids.
    pub groups: Vec<Vec<String>>,
    /// Mean of the per-group scores (0 is perfect diversity).
    pub best_score: f64,
    pub group_scores: Vec<i64>,
    pub trials_executed: u64,
    /// Trials divided by the total number of distinct partitions.
    pub coverage_fraction: f64,
    pub refine_passes: usize,
    pub converged: bool,
}

/// Runs the whole engine: randomized parallel sampling, then swap
/// refinement of the best sample. Configuration is validated up front;
/// past that point no error path can surface a partial partition.
pub fn run<CB: ProgressCallback>(
    roster: &Roster,
    config: &EngineConfig,
    progress: &CB,
) -> GfResult<EngineReport> {
    if config.swap_passes == 0 {
        return Err(GroupForgeError::InvalidConfiguration(
            "swap pass budget must be at least 1".to_string(),
        ));
    }
    generator::validate_shape(roster.len(), config.n_groups)?;

    let scorer = Arc::new(Scorer::new(roster, config.weights.clone())?);

    let driver = SearchDriver::new(
        scorer.clone(),
        SearchOptions {
            n_groups: config.n_groups,
            batch_size: config.batch_size,
            max_time: config.max_time,
            max_trials: config.max_trials,
            seed: config.seed,
        },
    );
    let outcome = driver.run()?;

    // The best sampled partition is handed over by value; from here on
    // the optimizer owns and mutates it.
    let mut partition = outcome.partition;
    let mut optimizer = SwapOptimizer::new(
        scorer.clone(),
        config.swap_passes,
        config.seed.map(|s| s.wrapping_add(9999)),
    );
    let summary = optimizer.refine(&mut partition, progress);

    info!(
        sampled_score = outcome.best_score,
        refined_score = summary.score,
        passes = summary.passes,
        swaps = summary.accepted_swaps,
        converged = summary.converged,
        "refinement finished"
    );

    let (best_score, group_scores) = scorer.score_partition(&partition);
    let coverage_fraction =
        combinatorics::coverage_fraction(outcome.trials, roster.len(), config.n_groups);
    let groups = partition
        .groups
        .iter()
        .map(|g| g.iter().map(|&m| roster.member(m).id.clone()).collect())
        .collect();

    Ok(EngineReport {
        partition,
        groups,
        best_score,
        group_scores,
        trials_executed: outcome.trials,
        coverage_fraction,
        refine_passes: summary.passes,
        converged: summary.converged,
    })
}
