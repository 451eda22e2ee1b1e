//! `ormforge build` — regenerate the model and repository skeletons.

use tracing::instrument;

use ormforge_core::application::BuildTargets;

use crate::{
    cli::BuildArgs,
    commands::{print_report, resolve_workspace, scaffold_service, with_spinner},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(workspace = %args.workspace.workspace.display()))]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let workspace = resolve_workspace(&args.workspace.workspace)?;
    let service = scaffold_service(&config)?;
    let targets = targets(&args);

    let report = with_spinner(&output, "Generating code...", || {
        service.build(&workspace, targets)
    })?;

    print_report(&output, &report)?;
    if report.model.is_none() && report.files.created.is_empty() && !output.is_quiet() {
        output.info("Nothing to generate, all repositories exist")?;
    }
    Ok(())
}

/// No flag, or `--all`, means both.
fn targets(args: &BuildArgs) -> BuildTargets {
    if args.all || (!args.model && !args.repositories) {
        return BuildTargets::ALL;
    }
    BuildTargets {
        model: args.model,
        repositories: args.repositories,
    }
}
