//! Scandi compiler CLI entry point

fn main() {
    scandi::cli::run();
}
