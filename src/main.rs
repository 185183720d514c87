use anyhow::Result;
use clap::Parser;
use reporter::cli;
use tracing::error;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args) {
        // dispatch can fail before logging is set up (config load); a stderr
        // fallback keeps the error from being dropped. No-op when a
        // subscriber is already installed.
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .try_init();
        error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
