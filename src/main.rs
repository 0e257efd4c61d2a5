use clap::Parser;
use xrde2e::cli::{handle_completions, handle_config_init, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Mock(args) => xrde2e::cli::mock::run_mock(args).await,
        Commands::Dashboard(args) => xrde2e::cli::dashboard::run_dashboard(args).await,
        Commands::Current(args) => xrde2e::cli::snapshot::run_current(args).await,
        Commands::History(args) => xrde2e::cli::snapshot::run_history(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    match result {
        Ok(()) => {
            // The dashboard may leave a blocking stdin read behind that the
            // runtime would wait for on drop.
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
