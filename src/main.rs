//! Binary entry point for `swift-template`.

use std::process;

fn main() {
    if let Err(e) = swift_template::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
