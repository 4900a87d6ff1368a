use clap::Args;
use groupforge::config::DuplicateAction;
use groupforge::error::{GfResult, GroupForgeError};
use groupforge::roster;
use std::fs::File;
use tracing::info;

/// Hands out random group labels to people who signed up after the
/// groups were forged (mail sign-ups, deadline stragglers).
#[derive(Args, Debug, Clone)]
pub struct AssignArgs {
    /// Highest group number to draw from.
    #[arg(long, default_value_t = 30)]
    pub max_group: u32,

    /// Group label prefix.
    #[arg(long, default_value = "M")]
    pub prefix: String,

    /// Name of the column the label is written into.
    #[arg(long, default_value = "Buddy Group")]
    pub column: String,

    /// Identity column checked for duplicates.
    #[arg(long, default_value = "Student number")]
    pub id_col: String,

    #[arg(long, value_enum, default_value_t = DuplicateAction::Abort)]
    pub on_duplicate: DuplicateAction,

    /// Output file; defaults to restStudents_<prefix>.csv.
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: &AssignArgs, input: &str, seed: Option<u64>) -> GfResult<()> {
    if args.max_group == 0 {
        return Err(GroupForgeError::InvalidConfiguration(
            "max group number must be at least 1".to_string(),
        ));
    }

    info!("loading roster: {}", input);
    let mut reader = csv::Reader::from_reader(File::open(input)?);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    super::enforce_duplicates(
        "all columns (exact duplicates)",
        &roster::duplicate_rows(&records),
        &records,
        args.on_duplicate,
    )?;
    if let Some(idx) = headers.iter().position(|h| h == &args.id_col) {
        super::enforce_duplicates(
            &args.id_col,
            &roster::duplicate_values(&records, idx),
            &records,
            args.on_duplicate,
        )?;
    }

    // One RNG for the whole run; re-seeding per row would be wasteful
    // and correlate the draws.
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| format!("restStudents_{}.csv", args.prefix));
    let mut writer = csv::Writer::from_path(&out_path)?;

    let mut header_row = headers.clone();
    header_row.push(args.column.clone());
    writer.write_record(&header_row)?;

    for record in &records {
        let label = format!("{}{}", args.prefix, rng.u32(1..=args.max_group));
        let mut row = record.clone();
        row.push(label);
        writer.write_record(&row)?;
    }
    writer.flush()?;

    info!("assigned {} members, results in '{}'", records.len(), out_path);
    Ok(())
}
