use std::path::PathBuf;

use clap::Args;

use super::super::{Ctx, parse_now, print_snapshot, read_raw_snapshot};
use crate::Result;
use crate::core::{Retention, WallClock, collect_tombstones_with};
use crate::migrate::migrate;

#[derive(Args, Debug)]
pub struct GcArgs {
    /// Snapshot JSON file (`-` for stdin).
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Reference time (epoch ms or RFC 3339).
    #[arg(long, value_parser = parse_now)]
    pub now: Option<WallClock>,

    /// Override the configured retention window.
    #[arg(long, value_name = "DAYS")]
    pub retention_days: Option<u64>,
}

pub(crate) fn handle(ctx: &Ctx, args: GcArgs) -> Result<()> {
    let snapshot = migrate(&read_raw_snapshot(&args.input)?);
    let retention = args
        .retention_days
        .map(Retention::days)
        .unwrap_or_else(|| ctx.config.retention());
    let now = args.now.unwrap_or_else(WallClock::now);
    let collected = collect_tombstones_with(&snapshot, retention, now);
    if !ctx.json {
        eprintln!(
            "collected {} expired tombstones",
            snapshot.record_count() - collected.record_count()
        );
    }
    print_snapshot(&collected)
}
