//! Entry point for the `alumni-match` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use alumni_match_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before the process exits"
)]
fn main() -> ExitCode {
    match alumni_match_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("alumni-match: {err}");
            ExitCode::FAILURE
        }
    }
}
