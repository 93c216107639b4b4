#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    bijux_coverage_cli::main_entry()
}
