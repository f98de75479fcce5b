use clap::Args;

use super::super::{Ctx, print_line};
use crate::{Error, Result};

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Confirm deleting local and remote selections.
    #[arg(long)]
    pub yes: bool,
}

pub(crate) fn handle(ctx: &Ctx, args: ResetArgs) -> Result<()> {
    if !args.yes {
        return Err(Error::Usage(
            "reset deletes local and remote selections; pass --yes to confirm".into(),
        ));
    }
    let (mut session, _) = ctx.open_session()?;
    session.reset()?;
    print_line(&format!("reset selections for {}", session.user()))
}
