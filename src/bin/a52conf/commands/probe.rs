//! `a52conf probe` command

use anyhow::Result;

use super::{report, resolve_inputs};
use crate::cli::ProbeArgs;

pub fn execute(args: ProbeArgs, color: bool) -> Result<()> {
    let inputs = resolve_inputs(&args.source)?;

    let snapshot = if args.raw {
        inputs.source.probe().probe()
    } else {
        inputs.snapshot(&inputs.config())
    }
    .map_err(|e| report(e, color))?;

    print!("{}", snapshot.to_toml()?);
    Ok(())
}
