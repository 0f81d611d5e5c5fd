use docmost_cli::{
    cli::execute_command,
    commands::{create_cli_commands, params::PARAMETER_VERBOSE},
    error::report_error,
    exit_codes::DocmostExitCode,
};
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();

    // Intialize the logging subsystem; --verbose overrides RUST_LOG
    let filter = if matches.get_flag(PARAMETER_VERBOSE) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute_command(&matches).await {
        Ok(()) => std::process::exit(DocmostExitCode::Success.code()),
        Err(e) => {
            report_error(&e);
            std::process::exit(e.exit_code().code());
        }
    }
}
