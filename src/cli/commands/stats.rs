use super::super::render;
use super::super::{Ctx, print_json, print_line};
use crate::Result;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let (session, reference) = ctx.open_session()?;
    let rows = session.stats(&reference.totals);
    if ctx.json {
        return print_json(&rows);
    }
    print_line(render::render_stats(&rows).trim_end())
}
