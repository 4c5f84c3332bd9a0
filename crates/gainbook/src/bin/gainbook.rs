//! gainbook - Compute realized capital gains from lot files.

fn main() -> std::process::ExitCode {
    gainbook::cmd::gains_cmd::main()
}
