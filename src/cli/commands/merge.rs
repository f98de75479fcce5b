use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::super::render;
use super::super::{Ctx, parse_now, print_json, print_snapshot, read_raw_snapshot};
use crate::Result;
use crate::core::{MergeSummary, Snapshot, WallClock, merge_with_summary};
use crate::migrate::migrate;

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// This device's snapshot.
    pub local: PathBuf,

    /// The other side's snapshot.
    pub remote: PathBuf,

    /// Reference time for tombstone expiry (epoch ms or RFC 3339).
    #[arg(long, value_parser = parse_now)]
    pub now: Option<WallClock>,
}

#[derive(Serialize)]
struct MergeOutput<'a> {
    snapshot: &'a Snapshot,
    summary: &'a MergeSummary,
}

pub(crate) fn handle(ctx: &Ctx, args: MergeArgs) -> Result<()> {
    // Either side may come from an older app version.
    let local = migrate(&read_raw_snapshot(&args.local)?);
    let remote = migrate(&read_raw_snapshot(&args.remote)?);
    let now = args.now.unwrap_or_else(WallClock::now);
    let (snapshot, summary) =
        merge_with_summary(&local, &remote, ctx.config.retention(), now);
    if ctx.json {
        return print_json(&MergeOutput {
            snapshot: &snapshot,
            summary: &summary,
        });
    }
    eprintln!("{}", render::render_summary(&summary));
    print_snapshot(&snapshot)
}
