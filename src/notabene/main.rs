use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
use cli::setup::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli::commands::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so `--json` output on stdout stays parseable.
/// `RUST_LOG` wins over `--verbose` when set.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "notabene=debug"
    } else {
        "notabene=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
