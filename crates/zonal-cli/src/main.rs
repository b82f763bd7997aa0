use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;
use zonal_cli::{Cli, Commands};

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }

    let result = match &cli.command {
        Commands::Load { .. } => commands::load::handle(&cli.command),
        Commands::Profiles { .. } => commands::profiles::handle(&cli.command),
        Commands::Generators { .. } => commands::generators::handle(&cli.command),
        Commands::Transmission { .. } | Commands::Edges { .. } => {
            commands::transmission::handle(&cli.command)
        }
        Commands::Run { config } => commands::run::handle(config),
    };

    if let Err(err) = result {
        error!("{err:?}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
