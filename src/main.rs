// CLASSIFICATION: COMMUNITY
// Filename: main.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Prints the VFAT readdir ioctl constants for this host.

fn main() {
    env_logger::init();
    if let Err(err) = vfat_ioctl::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
