//! `a52conf configure` command

use anyhow::Result;

use a52conf::ops::{configure, ConfigureOptions};
use a52conf::util::diagnostic;

use super::{report, resolve_inputs};
use crate::cli::ConfigureArgs;

pub fn execute(args: ConfigureArgs, color: bool) -> Result<()> {
    let mut opts = ConfigureOptions::new(resolve_inputs(&args.source)?);
    opts.output_dir = args.out_dir;
    if args.no_json {
        opts.json = Some(false);
    }

    let result = configure(&opts).map_err(|e| report(e, color))?;

    if result.header_changed {
        println!("Wrote {}", result.header_path.display());
    } else {
        println!("{} is up to date", result.header_path.display());
    }
    if let Some(path) = result.json_path {
        println!("Wrote {}", path.display());
    }

    if result.registry.audio_backends().is_empty() {
        diagnostic::emit(&diagnostic::no_audio_backend(), color);
    }

    Ok(())
}
