//! Core value types shared by the scorer, the search driver and the
//! swap optimizer.

/// Index of a member within the roster. All engine internals move these
/// around instead of cloning member records.
pub type MemberIdx = u32;

/// An assignment of every roster member to exactly one of N groups.
///
/// Groups hold member indices; the roster they point into is shared
/// read-only. The swap optimizer mutates a partition in place, moving
/// indices between groups without ever dropping or duplicating one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub groups: Vec<Vec<MemberIdx>>,
}

impl Partition {
    pub fn new(groups: Vec<Vec<MemberIdx>>) -> Self {
        Self { groups }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.len()).collect()
    }

    /// True iff every member index in `0..n_members` appears in exactly
    /// one group exactly once.
    pub fn covers_exactly(&self, n_members: usize) -> bool {
        let mut seen = vec![false; n_members];
        for group in &self.groups {
            for &m in group {
                match seen.get_mut(m as usize) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return false,
                }
            }
        }
        seen.iter().all(|&s| s)
    }
}
