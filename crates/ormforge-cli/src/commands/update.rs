//! `ormforge update` — refresh a workspace from its configuration document.

use tracing::instrument;

use crate::{
    cli::UpdateArgs,
    commands::{print_report, resolve_workspace, scaffold_service, with_spinner},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(workspace = %args.workspace.workspace.display(), only_model = args.only_model))]
pub fn execute(args: UpdateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let workspace = resolve_workspace(&args.workspace.workspace)?;
    let service = scaffold_service(&config)?;

    let message = if args.only_model {
        "Regenerating model..."
    } else {
        "Updating workspace..."
    };
    let report = with_spinner(&output, message, || {
        service.update(&workspace, args.only_model)
    })?;

    print_report(&output, &report)?;
    output.success("Workspace up to date")?;
    Ok(())
}
