//! Command implementations

pub mod cfg;
pub mod check;
pub mod completions;
pub mod configure;
pub mod probe;
pub mod show;

use anyhow::{Context, Result};

use a52conf::core::{RegistryError, TargetTriple};
use a52conf::ops::{ProbeSource, ResolveInputs};
use a52conf::util::diagnostic::{self, SnapshotError};

use crate::cli::SourceArgs;

/// Build the resolve inputs from the shared source flags.
pub fn resolve_inputs(args: &SourceArgs) -> Result<ResolveInputs> {
    let source = match (&args.snapshot, &args.target) {
        (Some(path), _) => ProbeSource::Snapshot(path.clone()),
        (None, Some(triple)) => {
            let target = TargetTriple::parse(triple)
                .with_context(|| format!("invalid target triple `{}`", triple))?;
            ProbeSource::Target(target)
        }
        (None, None) => ProbeSource::Host,
    };

    Ok(ResolveInputs {
        project_root: args.project.clone(),
        source,
        use_global_config: !args.no_global_config,
    })
}

/// Print the long-form diagnostic for registry and snapshot errors before
/// bailing.
pub fn report(err: anyhow::Error, color: bool) -> anyhow::Error {
    if let Some(registry_err) = err.downcast_ref::<RegistryError>() {
        diagnostic::emit(&registry_err.to_diagnostic(), color);
        return anyhow::anyhow!("configuration rejected");
    }
    if let Some(snapshot_err) = err.downcast_ref::<SnapshotError>() {
        diagnostic::emit(&snapshot_err.to_diagnostic(), color);
        return anyhow::anyhow!("invalid snapshot");
    }
    err
}
