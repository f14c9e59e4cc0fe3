//! `a52conf check` command

use anyhow::{bail, Result};

use a52conf::ops::{check, CheckOptions};
use a52conf::util::diagnostic;

use super::{report, resolve_inputs};
use crate::cli::CheckArgs;

pub fn execute(args: CheckArgs, color: bool) -> Result<()> {
    let opts = CheckOptions {
        inputs: resolve_inputs(&args.source)?,
        header: args.header,
    };

    let result = check(&opts).map_err(|e| report(e, color))?;

    match result.to_diagnostic() {
        None => {
            println!("{} is up to date", result.path().display());
            Ok(())
        }
        Some(diag) => {
            diagnostic::emit(&diag, color);
            bail!("check failed for {}", result.path().display())
        }
    }
}
