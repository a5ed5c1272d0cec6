use std::path::PathBuf;
use std::process::ExitCode;

use folio::FolioConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .init();

    let config = match FolioConfig::discover(std::env::args().nth(1).map(PathBuf::from)) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match folio::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "folio exited with an error");
            ExitCode::FAILURE
        }
    }
}
