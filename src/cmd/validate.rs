use crate::reports;
use clap::Args;
use groupforge::config::{load_weights, ColumnMap};
use groupforge::error::{GfResult, GroupForgeError};
use groupforge::model::{MemberIdx, Partition};
use groupforge::roster;
use groupforge::scorer::Scorer;
use std::fs::File;
use tracing::info;

/// Re-scores an assignment file (e.g. the overview written by `forge`,
/// or a hand-edited copy of it) without touching the groups.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub columns: ColumnMap,

    /// Column holding the group label.
    #[arg(long, default_value = "Group")]
    pub group_col: String,

    /// JSON file with per-attribute weights.
    #[arg(long)]
    pub weights: Option<String>,
}

pub fn run(args: &ValidateArgs, input: &str) -> GfResult<()> {
    info!("loading assignment: {}", input);
    let loaded = roster::load_csv(File::open(input)?, &args.columns)?;

    let group_idx = loaded
        .headers
        .iter()
        .position(|h| h == &args.group_col)
        .ok_or_else(|| {
            GroupForgeError::Validation(format!(
                "column '{}' not found; available columns: {}",
                args.group_col,
                loaded.headers.join(", ")
            ))
        })?;

    // Rebuild the partition from the labels, keeping groups in order of
    // first appearance.
    let mut labels: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<MemberIdx>> = Vec::new();
    for (member, record) in loaded.records.iter().enumerate() {
        let label = &record[group_idx];
        let slot = match labels.iter().position(|l| l == label) {
            Some(slot) => slot,
            None => {
                labels.push(label.clone());
                groups.push(Vec::new());
                labels.len() - 1
            }
        };
        groups[slot].push(member as MemberIdx);
    }
    let partition = Partition::new(groups);

    let weights = match &args.weights {
        Some(path) => Some(load_weights(path, loaded.roster.attr_names())?),
        None => None,
    };
    let scorer = Scorer::new(&loaded.roster, weights)?;
    let (aggregate, group_scores) = scorer.score_partition(&partition);

    let rows: Vec<(String, usize, i64)> = partition
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| (labels[i].clone(), g.len(), group_scores[i]))
        .collect();
    reports::print_group_table(&rows, aggregate);
    info!(
        "diversity score: {:.2} over {} groups (the closer to 0 the better)",
        aggregate,
        partition.group_count()
    );
    Ok(())
}
