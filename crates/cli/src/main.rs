use std::process::ExitCode;

use clap::Parser;

use outliner_cli::{Args, config::Config};

fn main() -> ExitCode {
    let config = Config::from_env();
    outliner_observability::init_with(config.log_format);
    if let Some(warning) = &config.warning {
        tracing::warn!("{warning}");
    }

    let args = Args::parse();
    let mut stdout = std::io::stdout().lock();
    match outliner_cli::run(&args, &mut stdout) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            tracing::error!(error = ?err, "check failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
