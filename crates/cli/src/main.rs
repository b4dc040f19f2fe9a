use std::process::ExitCode;

fn main() -> ExitCode {
    caseboard_cli::run()
}
