// ABOUTME: Main entry point for the Easy8 CLI application
// ABOUTME: Parses arguments, loads configuration and runs one command with Ctrl-C cancellation

use anyhow::Result;
use clap::Parser;
use easy8_cli::cli::Cli;
use easy8_cli::cli_output::{CliOutput, exit_code};
use easy8_cli::commands::{build_client, execute, run_cancellable};
use easy8_cli::config::Config;
use easy8_cli::constants::exit_codes;
use easy8_cli::output;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;
    let use_color = output::use_color(cli.no_color, cli.force_color);

    let rendered = run_cancellable(
        execute(cli.command, &config, &client, use_color),
        tokio::signal::ctrl_c(),
    )
    .await?;

    println!("{}", rendered.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            CliOutput::new().error(&err);
            exit_code(&err)
        }
    };

    std::process::exit(code);
}
