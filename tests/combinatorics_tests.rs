use groupforge::combinatorics::{coverage_fraction, stirling2};
use num_bigint::BigUint;
use rstest::rstest;

#[rstest]
#[case(0, 0, 1u64)]
#[case(1, 1, 1u64)]
#[case(4, 2, 7u64)]
#[case(5, 3, 25u64)]
#[case(6, 3, 90u64)]
#[case(10, 1, 1u64)]
#[case(10, 10, 1u64)]
#[case(3, 5, 0u64)]
#[case(0, 1, 0u64)]
fn stirling_known_values(#[case] n: usize, #[case] k: usize, #[case] expected: u64) {
    assert_eq!(stirling2(n, k), BigUint::from(expected));
}

#[test]
fn stirling_recurrence_holds() {
    // S(n, k) = k * S(n-1, k) + S(n-1, k-1) spot-checked off the base
    // cases the closed values above pin down.
    for n in 2..=12usize {
        for k in 1..=n {
            let lhs = stirling2(n, k);
            let rhs = stirling2(n - 1, k) * k as u64 + stirling2(n - 1, k - 1);
            assert_eq!(lhs, rhs, "recurrence failed at S({}, {})", n, k);
        }
    }
}

#[test]
fn stirling_survives_large_populations() {
    // 300 people into 24 groups: astronomically large, must not panic
    // or overflow.
    let s = stirling2(300, 24);
    assert!(s > BigUint::from(u128::MAX));
}

#[test]
fn coverage_is_a_fraction() {
    assert_eq!(coverage_fraction(0, 8, 2), 0.0);

    // S(8, 2) = 127, so 127 trials cover everything.
    let full = coverage_fraction(127, 8, 2);
    assert!((full - 1.0).abs() < 1e-9);

    // More trials than partitions still clamps to 1.
    assert_eq!(coverage_fraction(10_000, 8, 2), 1.0);
}

#[test]
fn coverage_grows_with_trials() {
    let mut last = 0.0;
    for trials in [0u64, 1, 10, 50, 100] {
        let c = coverage_fraction(trials, 10, 3);
        assert!((0.0..=1.0).contains(&c));
        assert!(c >= last);
        last = c;
    }
}

#[test]
fn coverage_of_huge_spaces_rounds_to_zero() {
    let c = coverage_fraction(1_000_000, 300, 24);
    assert!((0.0..=1.0).contains(&c));
    assert!(c < 1e-6);
}
