//! e-Mola CLI binary entry point.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use emola_cli::{
    cli::{Cli, Commands},
    commands,
    config::{default_config_path, CliConfig},
    error::{CliError, CliResult},
    output::OutputFormat,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on --verbose flag or RUST_LOG env var
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if cli.verbose || has_rust_log {
        let filter = if cli.verbose {
            EnvFilter::from_default_env().add_directive("emola=debug".parse().unwrap())
        } else {
            EnvFilter::from_default_env()
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    if let Err(e) = run(cli).await {
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Print a user-friendly error message with recovery hint.
fn print_error(e: &CliError) {
    eprintln!(
        "{} [{}]: {}",
        "Error".red().bold(),
        e.exit_code().to_string().yellow(),
        e
    );

    if let Some(hint) = e.hint() {
        eprintln!("{}: {}", "Hint".cyan(), hint);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = CliConfig::resolve(&config_path)?;

    let format: OutputFormat = cli.format.into();

    let output = match cli.command {
        Commands::Push { payment, detail } => {
            commands::push(config, format, &payment, detail).await?
        }

        Commands::Envelope {
            payment,
            show_secrets,
        } => commands::envelope(config, format, &payment, show_secrets)?,

        Commands::Config => commands::show_config(config, format, &config_path)?,
    };

    println!("{}", output);

    Ok(())
}
