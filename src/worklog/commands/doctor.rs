use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::health;
use crate::store::EntryStore;

pub fn run<S: EntryStore>(store: &S) -> Result<CmdResult> {
    let report = health::validate(store)?;
    let mut result = CmdResult::default();

    if report.total_lines == 0 {
        result.add_message(CmdMessage::info("The log is empty."));
    } else if report.is_healthy() {
        result.add_message(CmdMessage::success(format!(
            "All {} lines are valid.",
            report.total_lines
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} lines could not be read:",
            report.corrupted_count, report.total_lines
        )));
        for warning in &report.warnings {
            result.add_message(CmdMessage::info(format!("  - {}", warning)));
        }
        result.add_message(CmdMessage::info(
            "Unreadable lines are dropped by the next delete, purge or edit; a backup keeps them.",
        ));
    }

    Ok(result.with_health(report))
}
