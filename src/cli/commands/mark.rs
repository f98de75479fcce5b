use clap::Args;
use serde::Serialize;

use super::super::{Ctx, StatusArg, parse_category, parse_status_arg, print_json, print_line};
use crate::Result;
use crate::core::{Category, Status};

#[derive(Args, Debug)]
pub struct ToggleArgs {
    #[arg(value_parser = parse_category)]
    pub category: Category,

    pub id: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(value_parser = parse_category)]
    pub category: Category,

    pub id: String,

    /// visited, bucketList, or none.
    #[arg(value_parser = parse_status_arg)]
    pub(crate) status: StatusArg,
}

#[derive(Serialize)]
struct MarkOutput<'a> {
    category: Category,
    id: &'a str,
    status: Status,
}

pub(crate) fn handle_toggle(ctx: &Ctx, args: ToggleArgs) -> Result<()> {
    let (mut session, _) = ctx.open_session()?;
    let status = session.toggle(args.category, &args.id)?;
    print_mark(ctx, args.category, args.id.trim(), status)
}

pub(crate) fn handle_set(ctx: &Ctx, args: SetArgs) -> Result<()> {
    let (mut session, _) = ctx.open_session()?;
    let status = session.set_status(args.category, &args.id, args.status.0)?;
    print_mark(ctx, args.category, args.id.trim(), status)
}

fn print_mark(ctx: &Ctx, category: Category, id: &str, status: Status) -> Result<()> {
    if ctx.json {
        return print_json(&MarkOutput {
            category,
            id,
            status,
        });
    }
    print_line(&format!("{category}/{id}: {status}"))
}
