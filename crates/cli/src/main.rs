use std::process::ExitCode;

use marketsync_cli::config::{SyncConfig, log_format_from_env};

fn main() -> ExitCode {
    marketsync_observability::init(log_format_from_env().unwrap_or_default());

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {err}");
            return ExitCode::from(2);
        }
    };

    match marketsync_cli::run(&config) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("sync run aborted: {err:#}");
            ExitCode::FAILURE
        }
    }
}
