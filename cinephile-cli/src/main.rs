//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = cinephile_cli::run() {
        eprintln!("cinephile: {err}");
        std::process::exit(1);
    }
}
