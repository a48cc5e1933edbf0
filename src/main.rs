//! productdb entry point
//!
//! All logic is delegated to the CLI module; errors go to stderr with a
//! non-zero exit code.

use productdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
