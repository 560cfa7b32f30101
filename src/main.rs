use anyhow::Result;
use clap::Parser;
use dwfbind::cli::{Cli, Commands};
use dwfbind::commands;
use dwfbind::config::load_config;
use dwfbind::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config();
    init_tracing(cli.verbose, config.logging.filter.as_deref());

    match cli.command {
        Commands::Generate {
            header,
            library_version,
            output,
        } => commands::generate_artifact(&header, library_version.as_deref(), &output),
        Commands::Census { artifact, format } => {
            commands::run_census(artifact.as_deref(), format.into(), &config)
        }
        Commands::Summary { artifact, format } => {
            commands::run_summary(artifact.as_deref(), format.into(), &config)
        }
        Commands::CheckDocs { list, artifact } => {
            commands::check_docs(&list, artifact.as_deref(), &config)
        }
        Commands::Version { library } => commands::print_version(library, &config),
        Commands::Init { force } => commands::init_config(force),
    }
}
