mod common;

use common::{half_and_half, roster_from};
use groupforge::error::GroupForgeError;
use groupforge::model::Partition;
use groupforge::optimizer::{generator, try_swap, NoProgress, SwapOptimizer};
use groupforge::scorer::Scorer;
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn generated_partitions_cover_everyone_once() {
    let mut rng = fastrand::Rng::with_seed(7);
    for n_members in [1usize, 2, 7, 24, 100] {
        for n_groups in [1usize, 2, 3] {
            if n_groups > n_members {
                continue;
            }
            let partition = generator::generate(&mut rng, n_members, n_groups).unwrap();
            assert_eq!(partition.group_count(), n_groups);
            assert!(partition.covers_exactly(n_members));
        }
    }
}

#[test]
fn generated_group_sizes_differ_by_at_most_one() {
    let mut rng = fastrand::Rng::with_seed(11);
    let partition = generator::generate(&mut rng, 25, 4).unwrap();
    let sizes = partition.sizes();
    let min = sizes.iter().min().unwrap();
    let max = sizes.iter().max().unwrap();
    assert!(max - min <= 1);
}

#[test]
fn generator_rejects_impossible_shapes() {
    let mut rng = fastrand::Rng::with_seed(3);

    let too_many = generator::generate(&mut rng, 3, 4);
    assert!(matches!(
        too_many,
        Err(GroupForgeError::InvalidConfiguration(_))
    ));

    let zero = generator::generate(&mut rng, 3, 0);
    assert!(matches!(zero, Err(GroupForgeError::InvalidConfiguration(_))));
}

#[test]
fn rejected_swap_scan_restores_both_groups() {
    // Both groups already perfectly mixed: no swap can improve, so the
    // scan must hand back exactly the memberships it started with.
    let roster = half_and_half();
    let scorer = Scorer::new(&roster, None).unwrap();

    // 0,1,2,3 are A; 4,5,6,7 are B.
    let mut g1 = vec![0u32, 1, 4, 5];
    let mut g2 = vec![2u32, 3, 6, 7];
    let before1: HashSet<u32> = g1.iter().copied().collect();
    let before2: HashSet<u32> = g2.iter().copied().collect();

    let accepted = try_swap(&scorer, &mut g1, &mut g2);

    assert!(!accepted);
    assert_eq!(g1.iter().copied().collect::<HashSet<u32>>(), before1);
    assert_eq!(g2.iter().copied().collect::<HashSet<u32>>(), before2);
}

#[test]
fn accepted_swap_keeps_group_sizes() {
    // All A's in one group, all B's in the other: any swap improves.
    let roster = half_and_half();
    let scorer = Scorer::new(&roster, None).unwrap();

    let mut g1 = vec![0u32, 1, 2, 3];
    let mut g2 = vec![4u32, 5, 6, 7];
    let old_sum = scorer.score_group(&g1) + scorer.score_group(&g2);

    let accepted = try_swap(&scorer, &mut g1, &mut g2);

    assert!(accepted);
    assert_eq!(g1.len(), 4);
    assert_eq!(g2.len(), 4);
    assert!(scorer.score_group(&g1) + scorer.score_group(&g2) > old_sum);

    let mut all: Vec<u32> = g1.iter().chain(g2.iter()).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..8).collect::<Vec<u32>>());
}

#[test]
fn refine_never_decreases_the_score() {
    let roster = half_and_half();
    let scorer = Arc::new(Scorer::new(&roster, None).unwrap());

    // Worst possible start: the two clumps.
    let mut partition = Partition::new(vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
    let (before, _) = scorer.score_partition(&partition);

    let mut optimizer = SwapOptimizer::new(scorer.clone(), 10_000, Some(42));
    let summary = optimizer.refine(&mut partition, &NoProgress);

    let (after, _) = scorer.score_partition(&partition);
    assert!(after >= before);
    assert!(summary.converged);
    assert!(partition.covers_exactly(8));

    // 2 A's + 2 B's per group is reachable by pairwise swaps and is
    // the optimum: one same-value pair per letter, per group.
    assert_eq!(after, -2.0);
    for group in &partition.groups {
        assert_eq!(scorer.score_group(group), -2);
    }
}

#[test]
fn refine_is_idempotent_at_the_fixed_point() {
    let roster = roster_from(&[
        &["CS", "F"],
        &["CS", "M"],
        &["EE", "F"],
        &["EE", "M"],
        &["ME", "F"],
        &["ME", "M"],
    ]);
    let scorer = Arc::new(Scorer::new(&roster, None).unwrap());
    let mut partition = Partition::new(vec![vec![0, 1, 2], vec![3, 4, 5]]);

    let mut optimizer = SwapOptimizer::new(scorer.clone(), 10_000, Some(1));
    let first = optimizer.refine(&mut partition, &NoProgress);
    assert!(first.converged);

    let snapshot_score = scorer.score_partition(&partition).0;
    let second = optimizer.refine(&mut partition, &NoProgress);

    assert!(second.converged);
    assert_eq!(second.accepted_swaps, 0);
    assert_eq!(second.passes, 1);
    assert_eq!(scorer.score_partition(&partition).0, snapshot_score);
}

#[test]
fn single_group_refine_is_a_noop() {
    // No second group exists, so the pair loop has nothing to visit.
    let roster = roster_from(&[&["A"], &["A"], &["A"]]);
    let scorer = Arc::new(Scorer::new(&roster, None).unwrap());
    let mut partition = Partition::new(vec![vec![0, 1, 2]]);

    let mut optimizer = SwapOptimizer::new(scorer.clone(), 10_000, None);
    let summary = optimizer.refine(&mut partition, &NoProgress);

    assert!(summary.converged);
    assert_eq!(summary.passes, 1);
    assert_eq!(summary.accepted_swaps, 0);
    assert_eq!(partition.groups, vec![vec![0, 1, 2]]);
    assert_eq!(summary.score, -3.0);
}

#[test]
fn refine_respects_the_pass_budget() {
    let roster = half_and_half();
    let scorer = Arc::new(Scorer::new(&roster, None).unwrap());
    let mut partition = Partition::new(vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);

    let mut optimizer = SwapOptimizer::new(scorer, 1, Some(5));
    let summary = optimizer.refine(&mut partition, &NoProgress);

    assert_eq!(summary.passes, 1);
    assert!(partition.covers_exactly(8));
}
