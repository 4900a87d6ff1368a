pub mod generator;
pub mod runner;

use crate::model::{MemberIdx, Partition};
use crate::scorer::Scorer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Receives updates while the swap optimizer grinds through its pass
/// budget. Returning `false` aborts the refinement early; the partition
/// is left in its current (still valid, never worse) state.
pub trait ProgressCallback: Send + Sync {
    fn on_pass(&self, pass: usize, total: usize, best_score: f64, remaining: Duration) -> bool;
}

/// Sink for callers that don't care about progress.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_pass(&self, _pass: usize, _total: usize, _score: f64, _remaining: Duration) -> bool {
        true
    }
}

/// How often `refine` reports to its callback, in passes.
const PROGRESS_INTERVAL: usize = 250;

/// Outcome of one `refine` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineSummary {
    pub passes: usize,
    pub accepted_swaps: usize,
    pub score: f64,
    /// True when a full pass accepted zero swaps: a local optimum, the
    /// expected stopping certificate rather than a failure.
    pub converged: bool,
}

/// Tries to improve `g1` + `g2` by exchanging one member between them.
///
/// Scans members in index order and keeps the FIRST swap that strictly
/// raises the summed score of the two groups, returning immediately.
/// Any non-improving provisional swap is reverted on the spot, so a
/// `false` return leaves both groups exactly as they were. Capacities
/// never change: every exchange is 1-for-1.
///
/// First-improvement (instead of best-improvement) is deliberate; later
/// passes pick up whatever this one left on the table.
pub fn try_swap(scorer: &Scorer, g1: &mut Vec<MemberIdx>, g2: &mut Vec<MemberIdx>) -> bool {
    let old_sum = scorer.score_group(g1) + scorer.score_group(g2);
    for a in 0..g1.len() {
        for b in 0..g2.len() {
            std::mem::swap(&mut g1[a], &mut g2[b]);
            let new_sum = scorer.score_group(g1) + scorer.score_group(g2);
            if new_sum > old_sum {
                return true;
            }
            std::mem::swap(&mut g1[a], &mut g2[b]);
        }
    }
    false
}

/// Pairwise-swap hill climber.
///
/// Repeats full passes over every unordered pair of groups, swapping
/// members whenever the pair's summed score strictly improves, until a
/// whole pass accepts nothing or the pass budget runs out. Pair sums
/// are integers bounded above by 0 and every accepted swap strictly
/// increases one, so the climb cannot cycle and a zero-swap pass is a
/// valid stopping certificate.
pub struct SwapOptimizer {
    scorer: Arc<Scorer>,
    pass_budget: usize,
    rng: fastrand::Rng,
}

impl SwapOptimizer {
    pub fn new(scorer: Arc<Scorer>, pass_budget: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self {
            scorer,
            pass_budget,
            rng,
        }
    }

    /// Refines the partition in place. The aggregate score never
    /// decreases; at a local optimum repeated calls are no-ops.
    pub fn refine<CB: ProgressCallback>(
        &mut self,
        partition: &mut Partition,
        callback: &CB,
    ) -> RefineSummary {
        let (mut best_score, _) = self.scorer.score_partition(partition);
        let start = Instant::now();
        let mut accepted_swaps = 0;
        let mut passes = 0;
        let mut converged = false;

        for pass in 1..=self.pass_budget {
            passes = pass;

            // Shuffling the group order only changes which pair gets
            // first pick of a swap, never the acceptance rule; without
            // it the leading groups always act as donors.
            self.rng.shuffle(&mut partition.groups);

            let mut accepted_this_pass = 0;
            let n = partition.groups.len();
            for i in 0..n {
                let (head, tail) = partition.groups.split_at_mut(i + 1);
                let g1 = &mut head[i];
                for g2 in tail.iter_mut() {
                    if try_swap(&self.scorer, g1, g2) {
                        accepted_this_pass += 1;
                    }
                }
            }
            accepted_swaps += accepted_this_pass;

            let (score, _) = self.scorer.score_partition(partition);
            if score > best_score {
                best_score = score;
            }

            if accepted_this_pass == 0 {
                converged = true;
                debug!("no accepted swap in pass {}, local optimum", pass);
                break;
            }

            if pass % PROGRESS_INTERVAL == 0 {
                let per_pass = start.elapsed().div_f64(pass as f64);
                let remaining = per_pass.mul_f64((self.pass_budget - pass) as f64);
                if !callback.on_pass(pass, self.pass_budget, best_score, remaining) {
                    break;
                }
            }
        }

        RefineSummary {
            passes,
            accepted_swaps,
            score: best_score,
            converged,
        }
    }
}
