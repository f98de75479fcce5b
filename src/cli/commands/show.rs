use clap::Args;

use super::super::render;
use super::super::{Ctx, parse_category, print_json, print_line};
use crate::Result;
use crate::core::{Category, Snapshot};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Limit output to one category.
    #[arg(value_parser = parse_category)]
    pub category: Option<Category>,

    /// Include removed (tombstoned) places.
    #[arg(long)]
    pub all: bool,
}

pub(crate) fn handle(ctx: &Ctx, args: ShowArgs) -> Result<()> {
    let (session, _) = ctx.open_session()?;
    if let Some(note) = render::render_load(session.load_outcome()) {
        eprintln!("{note}");
    }
    if ctx.json {
        let snapshot = match args.category {
            Some(category) => {
                let mut only = Snapshot::new();
                only.set_items(category, session.snapshot().items(category).to_vec());
                only
            }
            None => session.snapshot().clone(),
        };
        return print_json(&snapshot);
    }
    print_line(
        render::render_show(session.snapshot(), args.category, args.all).trim_end(),
    )
}
