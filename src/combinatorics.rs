use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Stirling number of the second kind: the number of ways to partition
/// `n` labeled items into `k` non-empty unlabeled groups.
///
/// Computed with the recurrence S(i, j) = j * S(i-1, j) + S(i-1, j-1),
/// base case S(0, 0) = 1, keeping only one row at a time. BigUint all
/// the way through; these numbers explode long before n reaches a
/// realistic population size.
pub fn stirling2(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    if n == 0 {
        return BigUint::from(1u8);
    }

    // row[j] = S(i, j) for the current i.
    let mut row = vec![BigUint::zero(); k + 1];
    row[0] = BigUint::from(1u8);

    for i in 1..=n {
        // Walk j downward so row[j - 1] still holds the previous i.
        let top = k.min(i);
        for j in (1..=top).rev() {
            row[j] = &row[j] * j as u64 + &row[j - 1];
        }
        if i == 1 {
            // S(1, 0) = 0; the base-case seed only applies to i = 0.
            row[0] = BigUint::zero();
        }
    }
    row[k].clone()
}

/// Fraction of all distinct partitions a search of `trials` random
/// draws could have touched, clamped into [0, 1].
///
/// Purely informational: with realistic populations the Stirling number
/// dwarfs any feasible trial count and the fraction is effectively 0.
pub fn coverage_fraction(trials: u64, n_members: usize, n_groups: usize) -> f64 {
    let total = stirling2(n_members, n_groups);
    if total.is_zero() {
        return 0.0;
    }
    let total = total.to_f64().unwrap_or(f64::INFINITY);
    if !total.is_finite() {
        return 0.0;
    }
    (trials as f64 / total).clamp(0.0, 1.0)
}
