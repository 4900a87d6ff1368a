pub mod assign;
pub mod forge;
pub mod validate;

use groupforge::config::DuplicateAction;
use groupforge::error::{GfResult, GroupForgeError};
use tracing::warn;

/// Logs every flagged row and, under `Abort`, refuses to continue so
/// the roster can be cleaned up first.
pub(crate) fn enforce_duplicates(
    what: &str,
    flagged: &[usize],
    records: &[Vec<String>],
    action: DuplicateAction,
) -> GfResult<()> {
    if flagged.is_empty() {
        return Ok(());
    }
    warn!("found duplicates based upon: {}", what);
    for &row in flagged {
        warn!("  row {}: {}", row + 2, records[row].join(", "));
    }
    match action {
        DuplicateAction::Abort => Err(GroupForgeError::Validation(format!(
            "{} duplicate(s) found ({}); re-run with --on-duplicate warn to keep going",
            flagged.len(),
            what
        ))),
        DuplicateAction::Warn => Ok(()),
    }
}
