//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use greenborder_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match greenborder_cli::run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("greenborder: {err}");
            std::process::exit(1);
        }
    }
}
