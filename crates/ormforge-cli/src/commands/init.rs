//! `ormforge init` — create or complete a workspace.

use tracing::{info, instrument};

use ormforge_core::domain::Overrides;

use crate::{
    cli::InitArgs,
    commands::{print_report, resolve_workspace, scaffold_service, with_spinner},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Complete the schema, persist it, provision, install and generate.
#[instrument(skip_all, fields(workspace = %args.workspace.workspace.display()))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let workspace = resolve_workspace(&args.workspace.workspace)?;
    let overrides = overrides(&args);
    let service = scaffold_service(&config)?;

    output.header(&format!("Initialising {}", workspace.display()))?;
    info!(workspace = %workspace.display(), "init started");

    let report = with_spinner(&output, "Scaffolding workspace...", || {
        service.create(&workspace, &overrides)
    })?;

    print_report(&output, &report)?;
    output.success("Workspace ready")?;
    Ok(())
}

fn overrides(args: &InitArgs) -> Overrides {
    let mut overrides = Overrides::default();
    if let Some(source) = &args.source {
        overrides = overrides.source(source.clone());
    }
    if let Some(dialect) = &args.dialect {
        overrides = overrides.dialect(dialect.clone());
    }
    if let Some(connection) = &args.connection {
        overrides = overrides.connection(connection.clone());
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn init_args(argv: &[&str]) -> InitArgs {
        match Cli::parse_from(argv).command {
            Commands::Init(args) => args,
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn flags_become_overrides() {
        let args = init_args(&["ormforge", "init", "-s", "reports", "-d", "mysql", "--connection", "$CNN"]);
        assert_eq!(
            overrides(&args),
            Overrides::default()
                .source("reports")
                .dialect("mysql")
                .connection("$CNN")
        );
    }

    #[test]
    fn no_flags_no_overrides() {
        let args = init_args(&["ormforge", "init"]);
        assert_eq!(overrides(&args), Overrides::default());
    }
}
