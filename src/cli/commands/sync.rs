use super::super::render;
use super::super::{Ctx, print_json, print_line};
use crate::Result;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let (mut session, _) = ctx.open_session()?;
    let outcome = session.sync()?;
    if ctx.json {
        return print_json(&serde_json::json!({
            "status": session.status().as_str(),
            "pushed": outcome.pushed,
            "summary": outcome.summary,
        }));
    }
    print_line(&render::render_sync(&outcome))
}
