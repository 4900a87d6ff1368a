use crate::reports;
use clap::Args;
use groupforge::api::{self, EngineConfig};
use groupforge::config::{load_weights, ColumnMap, DuplicateAction, SearchParams};
use groupforge::error::GfResult;
use groupforge::optimizer::ProgressCallback;
use groupforge::roster::{self, LoadedRoster};
use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ForgeArgs {
    #[command(flatten)]
    pub search: SearchParams,

    #[command(flatten)]
    pub columns: ColumnMap,

    /// Directory the group files are written into (created if needed).
    #[arg(long, short = 'o', default_value = "groups")]
    pub out_dir: String,

    /// Group label prefix, e.g. "M" yields M01, M02, ...
    #[arg(long, default_value = "M")]
    pub prefix: String,

    #[arg(long, value_enum, default_value_t = DuplicateAction::Abort)]
    pub on_duplicate: DuplicateAction,

    /// JSON file with per-attribute weights (attribute column name ->
    /// integer weight).
    #[arg(long)]
    pub weights: Option<String>,
}

struct EtaLogger;

impl ProgressCallback for EtaLogger {
    fn on_pass(&self, pass: usize, total: usize, best_score: f64, remaining: Duration) -> bool {
        let secs = remaining.as_secs();
        info!(
            "pass {:5}/{} | best: {:.2} | est. wait {:02}:{:04.1}",
            pass,
            total,
            best_score,
            secs / 60,
            remaining.as_secs_f64() % 60.0
        );
        true
    }
}

pub fn run(args: &ForgeArgs, input: &str, seed: Option<u64>) -> GfResult<()> {
    info!("loading roster: {}", input);
    let loaded = roster::load_csv(File::open(input)?, &args.columns)?;
    let LoadedRoster {
        roster,
        headers,
        records,
    } = &loaded;

    // Flag likely sign-up mistakes before burning search time on them.
    super::enforce_duplicates(
        "all columns (exact duplicates)",
        &roster::duplicate_rows(records),
        records,
        args.on_duplicate,
    )?;
    for col in [&args.columns.name_col, &args.columns.email_col] {
        if let Some(idx) = headers.iter().position(|h| h == col) {
            super::enforce_duplicates(
                col,
                &roster::duplicate_values(records, idx),
                records,
                args.on_duplicate,
            )?;
        }
    }

    info!(
        members = roster.len(),
        groups = args.search.groups,
        "population loaded"
    );
    reports::print_attribute_stats(&roster.stats(args.search.groups));

    let weights = match &args.weights {
        Some(path) => {
            info!("loading attribute weights from: {}", path);
            Some(load_weights(path, roster.attr_names())?)
        }
        None => None,
    };

    let config = EngineConfig {
        n_groups: args.search.groups,
        batch_size: args.search.batch_size,
        max_time: Some(args.search.max_time()),
        max_trials: args.search.max_trials,
        swap_passes: args.search.swap_passes,
        seed,
        weights,
    };

    info!(
        "starting the search (running {:.1} min)...",
        args.search.runtime
    );
    let report = api::run(roster, &config, &EtaLogger)?;

    info!(
        "tried {} random partitions (~{:.10}% of all possible)",
        report.trials_executed,
        report.coverage_fraction * 100.0
    );
    info!(
        "best diversity score: {:.2} (the closer to 0 the better)",
        report.best_score
    );

    write_groups(args, &loaded, &report)?;

    let rows: Vec<(String, usize, i64)> = report
        .partition
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| (group_label(&args.prefix, i), g.len(), report.group_scores[i]))
        .collect();
    reports::print_group_table(&rows, report.best_score);
    Ok(())
}

fn group_label(prefix: &str, index: usize) -> String {
    format!("{}{:02}", prefix, index + 1)
}

/// Writes the overview file plus one file per group, re-joining each
/// member with its full roster record. Member indices equal record
/// indices; the loader builds them in file order.
fn write_groups(args: &ForgeArgs, loaded: &LoadedRoster, report: &api::EngineReport) -> GfResult<()> {
    let out_dir = Path::new(&args.out_dir);
    fs::create_dir_all(out_dir)?;

    let overview_path = out_dir.join(format!("{}_all_groups.csv", args.prefix));
    let mut overview = csv::Writer::from_path(&overview_path)?;
    let mut header_row = vec!["Group".to_string()];
    header_row.extend(loaded.headers.iter().cloned());
    overview.write_record(&header_row)?;

    for (i, group) in report.partition.groups.iter().enumerate() {
        let label = group_label(&args.prefix, i);

        let group_path = out_dir.join(format!("{}.csv", label));
        let mut group_file = csv::Writer::from_path(&group_path)?;
        group_file.write_record(&loaded.headers)?;

        for &member in group {
            let record = &loaded.records[member as usize];
            group_file.write_record(record)?;

            let mut row = vec![label.clone()];
            row.extend(record.iter().cloned());
            overview.write_record(&row)?;
        }
        group_file.flush()?;
    }
    overview.flush()?;

    info!("results written to '{}'", overview_path.display());
    Ok(())
}
