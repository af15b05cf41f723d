use clap::Parser;
use privileged_cli::Cli;
use privileged_cli::run_main;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    let cli = Cli::parse();
    std::process::exit(run_main(&cli));
}
