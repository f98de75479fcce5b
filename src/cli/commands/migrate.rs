use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::super::render;
use super::super::{Ctx, print_json, print_snapshot, read_raw_snapshot};
use crate::Result;
use crate::core::Snapshot;
use crate::migrate::{MigrationReport, migrate_with_report};

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Snapshot JSON file (`-` for stdin).
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

#[derive(Serialize)]
struct MigrateOutput<'a> {
    snapshot: &'a Snapshot,
    report: &'a MigrationReport,
}

pub(crate) fn handle(ctx: &Ctx, args: MigrateArgs) -> Result<()> {
    let raw = read_raw_snapshot(&args.input)?;
    let (snapshot, report) = migrate_with_report(&raw);
    if ctx.json {
        return print_json(&MigrateOutput {
            snapshot: &snapshot,
            report: &report,
        });
    }
    eprintln!("{}", render::render_report(&report));
    print_snapshot(&snapshot)
}
