use crate::error::{GfResult, GroupForgeError};
use crate::model::{MemberIdx, Partition};

/// Checks that a population of `n_members` can be split into
/// `n_groups`. Surfaced once at engine entry and again by `generate`,
/// which is the contract boundary for callers driving it directly.
pub fn validate_shape(n_members: usize, n_groups: usize) -> GfResult<()> {
    if n_groups == 0 {
        return Err(GroupForgeError::InvalidConfiguration(
            "group count must be at least 1".to_string(),
        ));
    }
    if n_groups > n_members {
        return Err(GroupForgeError::InvalidConfiguration(format!(
            "group count ({}) is larger than the population ({})",
            n_groups, n_members
        )));
    }
    Ok(())
}

/// Produces one uniformly random partition: shuffle all member indices,
/// then deal them out round-robin. Round-robin keeps group sizes within
/// 1 of each other and assigns every member exactly once.
///
/// The RNG is caller-owned and reused across calls; re-seeding per call
/// would correlate draws and cost entropy for nothing.
pub fn generate(
    rng: &mut fastrand::Rng,
    n_members: usize,
    n_groups: usize,
) -> GfResult<Partition> {
    validate_shape(n_members, n_groups)?;

    let mut order: Vec<MemberIdx> = (0..n_members as MemberIdx).collect();
    rng.shuffle(&mut order);

    let mut groups: Vec<Vec<MemberIdx>> = vec![Vec::new(); n_groups];
    for (position, member) in order.into_iter().enumerate() {
        groups[position % n_groups].push(member);
    }
    Ok(Partition::new(groups))
}
