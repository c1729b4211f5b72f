//! gobrago CLI tool.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::FalseyValueParser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gobrago")]
#[command(about = "Turn Gobra configuration files into a verifier invocation", long_about = None)]
struct Cli {
    /// Path to the Gobra installation config
    install_config: PathBuf,

    /// Path to the verification job config
    job_config: PathBuf,

    /// Run the verifier after printing the command
    #[arg(long)]
    run: bool,

    /// Reject config files containing unknown fields
    ///
    /// From the environment, `0`, `false`, `no`, `off`, `n`, `f` or empty
    /// disable it and any other value enables it.
    #[arg(long, env = "GOBRAGO_STRICT", value_parser = FalseyValueParser::new())]
    strict: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the command
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let invocation = commands::generate(&cli.install_config, &cli.job_config, cli.strict)?;
    println!("{}", invocation);

    if cli.run {
        commands::run::run_local(&invocation).await?;
    }

    Ok(())
}
