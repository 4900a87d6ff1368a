use crate::error::{GfResult, GroupForgeError};
use crate::model::{MemberIdx, Partition};
use crate::roster::Roster;

/// Diversity scorer over groups of roster members.
///
/// Attribute values are interned to small codes at roster load time, so
/// scoring never touches strings: the scorer keeps one flattened
/// member-by-attribute code matrix and compares codes.
///
/// A group's score is 0 minus the weighted count of attribute matches
/// over all unordered member pairs. 0 means perfectly diverse; every
/// shared value pushes the score further below 0.
pub struct Scorer {
    codes: Vec<u16>,
    weights: Vec<i64>,
    attr_count: usize,
    member_count: usize,
}

impl Scorer {
    /// Builds the scorer from a roster. `weights` must carry one
    /// non-negative entry per attribute; `None` means uniform weight 1.
    pub fn new(roster: &Roster, weights: Option<Vec<i64>>) -> GfResult<Self> {
        let attr_count = roster.attr_count();
        let weights = weights.unwrap_or_else(|| vec![1; attr_count]);

        if weights.len() != attr_count {
            return Err(GroupForgeError::InvalidConfiguration(format!(
                "{} attribute weights provided for {} attributes",
                weights.len(),
                attr_count
            )));
        }
        if let Some(w) = weights.iter().find(|&&w| w < 0) {
            return Err(GroupForgeError::InvalidConfiguration(format!(
                "attribute weights must be non-negative, got {}",
                w
            )));
        }

        let mut codes = Vec::with_capacity(roster.len() * attr_count);
        for member in roster.members() {
            codes.extend_from_slice(&member.attrs);
        }

        Ok(Self {
            codes,
            weights,
            attr_count,
            member_count: roster.len(),
        })
    }

    pub fn attr_count(&self) -> usize {
        self.attr_count
    }

    pub fn member_count(&self) -> usize {
        self.member_count
    }

    #[inline(always)]
    fn attrs(&self, member: MemberIdx) -> &[u16] {
        let start = member as usize * self.attr_count;
        &self.codes[start..start + self.attr_count]
    }

    /// Scores one group. O(|group|^2 * K); groups of size 0 or 1 score 0.
    pub fn score_group(&self, members: &[MemberIdx]) -> i64 {
        let mut score = 0i64;
        for (i, &a) in members.iter().enumerate() {
            let row_a = self.attrs(a);
            for &b in &members[i + 1..] {
                let row_b = self.attrs(b);
                for k in 0..self.attr_count {
                    if row_a[k] == row_b[k] {
                        score -= self.weights[k];
                    }
                }
            }
        }
        score
    }

    /// Scores a whole partition: the aggregate is the mean of the group
    /// scores, which is what the search driver compares between trials.
    pub fn score_partition(&self, partition: &Partition) -> (f64, Vec<i64>) {
        let group_scores: Vec<i64> = partition
            .groups
            .iter()
            .map(|g| self.score_group(g))
            .collect();
        let aggregate = if group_scores.is_empty() {
            0.0
        } else {
            group_scores.iter().sum::<i64>() as f64 / group_scores.len() as f64
        };
        (aggregate, group_scores)
    }
}
