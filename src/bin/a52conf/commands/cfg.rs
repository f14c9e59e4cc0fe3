//! `a52conf cfg` command
//!
//! Prints `cargo:` directives; a build script can forward them verbatim.

use anyhow::Result;

use a52conf::emit;

use super::{report, resolve_inputs};
use crate::cli::CfgArgs;

pub fn execute(args: CfgArgs, color: bool) -> Result<()> {
    let registry = resolve_inputs(&args.source)?
        .resolve()
        .map_err(|e| report(e, color))?;
    print!("{}", emit::cargo::render(&registry));
    Ok(())
}
