use crate::error::{GfResult, GroupForgeError};
use crate::model::Partition;
use crate::optimizer::generator;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub n_groups: usize,
    /// Trials dispatched per rayon batch. Tens, not thousands: the
    /// deadline is only checked between batches, so the batch size is
    /// the cancellation granularity.
    pub batch_size: usize,
    pub max_time: Option<Duration>,
    pub max_trials: Option<u64>,
    pub seed: Option<u64>,
}

impl SearchOptions {
    pub fn new(n_groups: usize) -> Self {
        Self {
            n_groups,
            batch_size: 50,
            max_time: None,
            max_trials: None,
            seed: None,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    Deadline,
    TrialBudget,
    SingleBatch,
}

/// Best partition found by the randomized phase, plus the bookkeeping
/// the caller reports on.
pub struct SearchOutcome {
    pub best_score: f64,
    pub partition: Partition,
    pub group_scores: Vec<i64>,
    pub trials: u64,
    pub stop_reason: StopReason,
}

/// One worker's result: a random partition and its scores.
struct Trial {
    score: f64,
    group_scores: Vec<i64>,
    partition: Partition,
}

/// Randomized-restart search driver.
///
/// Dispatches batches of independent trials to rayon workers. Workers
/// share only the read-only scorer; each trial owns its partition and
/// its own RNG, seeded from a master RNG drawn on the driver thread.
/// All comparison and best-slot updates happen single-threaded between
/// batches, so no locking is needed anywhere.
pub struct SearchDriver {
    scorer: Arc<Scorer>,
    options: SearchOptions,
}

impl SearchDriver {
    pub fn new(scorer: Arc<Scorer>, options: SearchOptions) -> Self {
        Self { scorer, options }
    }

    fn run_trial(&self, seed: u64) -> GfResult<Trial> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let partition = generator::generate(
            &mut rng,
            self.scorer.member_count(),
            self.options.n_groups,
        )?;
        let (score, group_scores) = self.scorer.score_partition(&partition);
        Ok(Trial {
            score,
            group_scores,
            partition,
        })
    }

    /// Runs trials until the wall-clock or trial budget is exhausted
    /// and returns the best partition seen. With neither budget set a
    /// single batch is run. A failed trial is discarded with a warning;
    /// it never takes the rest of its batch or the best-so-far with it.
    pub fn run(&self) -> GfResult<SearchOutcome> {
        generator::validate_shape(self.scorer.member_count(), self.options.n_groups)?;
        if self.options.batch_size == 0 {
            return Err(GroupForgeError::InvalidConfiguration(
                "batch size must be at least 1".to_string(),
            ));
        }

        let mut master = match self.options.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let start = Instant::now();
        let single_batch = self.options.max_time.is_none() && self.options.max_trials.is_none();
        let mut best: Option<Trial> = None;
        let mut trials: u64 = 0;
        let mut failures: u64 = 0;

        let stop_reason = loop {
            // The budget counts dispatched trials, successes and
            // failures alike, so a string of failures still terminates.
            let attempts = trials + failures;
            let batch = match self.options.max_trials {
                Some(cap) => {
                    (cap.saturating_sub(attempts)).min(self.options.batch_size as u64) as usize
                }
                None => self.options.batch_size,
            };

            // Draw the per-trial seeds on this thread so workers never
            // touch shared mutable state.
            let seeds: Vec<u64> = (0..batch).map(|_| master.u64(..)).collect();
            let results: Vec<GfResult<Trial>> = seeds
                .into_par_iter()
                .map(|seed| self.run_trial(seed))
                .collect();

            // A batch always runs to completion; comparison against the
            // best slot is strictly sequential. Ties keep the earlier
            // partition.
            for result in results {
                match result {
                    Ok(trial) => {
                        trials += 1;
                        if best.as_ref().map_or(true, |b| trial.score > b.score) {
                            debug!(score = trial.score, trials, "new best partition");
                            best = Some(trial);
                        }
                    }
                    Err(e) => {
                        failures += 1;
                        warn!("trial failed and was discarded: {}", e);
                    }
                }
            }

            if single_batch {
                break StopReason::SingleBatch;
            }
            if let Some(cap) = self.options.max_trials {
                if trials + failures >= cap {
                    break StopReason::TrialBudget;
                }
            }
            if let Some(limit) = self.options.max_time {
                if start.elapsed() >= limit {
                    break StopReason::Deadline;
                }
            }
        };

        let best = best.ok_or_else(|| {
            GroupForgeError::Validation(format!(
                "all {} trials of the search failed",
                failures
            ))
        })?;

        info!(
            trials,
            failures,
            best_score = best.score,
            %stop_reason,
            "randomized search finished"
        );

        Ok(SearchOutcome {
            best_score: best.score,
            partition: best.partition,
            group_scores: best.group_scores,
            trials,
            stop_reason,
        })
    }
}
