//! `a52conf show` command

use anyhow::Result;

use a52conf::emit;
use a52conf::ops::{format_report, ShowFilter};

use super::{report, resolve_inputs};
use crate::cli::ShowArgs;

pub fn execute(args: ShowArgs, color: bool) -> Result<()> {
    let registry = resolve_inputs(&args.source)?
        .resolve()
        .map_err(|e| report(e, color))?;

    if args.json {
        print!("{}", emit::json::render(&registry)?);
        return Ok(());
    }

    let filter = ShowFilter {
        pattern: args.pattern,
        present_only: args.present,
    };
    print!("{}", format_report(&registry, &filter));

    Ok(())
}
