//! Human-readable output.

use std::fmt::Write as _;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::{Category, CategoryStats, ItemRecord, MergeSummary, Snapshot, WallClock};
use crate::migrate::MigrationReport;
use crate::store::LoadOutcome;
use crate::sync::SyncOutcome;

pub fn render_timestamp(at: Option<WallClock>) -> String {
    let Some(at) = at else {
        return "-".to_string();
    };
    let nanos = i128::from(at.as_millis()) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| at.as_millis().to_string())
}

pub fn render_report(report: &MigrationReport) -> String {
    if report.is_clean() {
        return format!("already current ({} records)", report.carried);
    }
    let mut out = format!(
        "migrated: {} carried, {} legacy items -> {} placements, {} unmapped, {} duplicates, {} skipped",
        report.carried,
        report.legacy_items,
        report.placements,
        report.unmapped,
        report.duplicates,
        report.skipped,
    );
    if !report.folded_aliases.is_empty() {
        let _ = write!(out, "\nfolded aliases: {}", report.folded_aliases.join(", "));
    }
    if !report.dropped_keys.is_empty() {
        let _ = write!(out, "\ndropped keys: {}", report.dropped_keys.join(", "));
    }
    for warning in &report.warnings {
        let _ = write!(out, "\nwarning: {warning}");
    }
    out
}

pub fn render_summary(summary: &MergeSummary) -> String {
    format!(
        "merged: {} local only, {} added from remote, {} kept local, {} replaced by remote, {} tombstones collected",
        summary.local_only,
        summary.added_from_remote,
        summary.kept_local,
        summary.replaced_by_remote,
        summary.tombstones_collected,
    )
}

pub fn render_sync(outcome: &SyncOutcome) -> String {
    let pushed = if outcome.pushed {
        "pushed"
    } else {
        "remote already current"
    };
    format!("{}\n{pushed}", render_summary(&outcome.summary))
}

pub fn render_load(outcome: &LoadOutcome) -> Option<String> {
    match outcome {
        LoadOutcome::Missing => None,
        LoadOutcome::Recovered { reason } => {
            Some(format!("local snapshot was unreadable and was reset: {reason}"))
        }
        LoadOutcome::Loaded { report } if !report.is_clean() => Some(render_report(report)),
        LoadOutcome::Loaded { .. } => None,
    }
}

fn render_item(out: &mut String, item: &ItemRecord) {
    let state = if item.is_tombstone() {
        "removed".to_string()
    } else {
        item.status.to_string()
    };
    let _ = writeln!(
        out,
        "  {:<28} {:<11} {}",
        item.id,
        state,
        render_timestamp(item.updated_at)
    );
}

pub fn render_show(snapshot: &Snapshot, only: Option<Category>, include_removed: bool) -> String {
    let mut out = String::new();
    for category in Category::all() {
        if only.is_some_and(|c| c != *category) {
            continue;
        }
        let items: Vec<&ItemRecord> = snapshot
            .items(*category)
            .iter()
            .filter(|item| include_removed || !item.is_tombstone())
            .collect();
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{category} ({})", items.len());
        for item in items {
            render_item(&mut out, item);
        }
    }
    if out.is_empty() {
        out.push_str("no selections\n");
    }
    out
}

pub fn render_stats(stats: &[CategoryStats]) -> String {
    let mut out = String::new();
    for row in stats {
        let _ = write!(
            out,
            "{:<18} visited {:>4}  bucket list {:>4}",
            row.category.as_str(),
            row.visited,
            row.bucket_list
        );
        if let (Some(total), Some(pct)) = (row.total, row.percent_visited) {
            let _ = write!(out, "  of {total:>4} ({pct:.1}%)");
        }
        out.push('\n');
    }
    out
}
