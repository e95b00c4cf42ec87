//! awscli-bundle - offline installer for the bundled AWS CLI
//!
//! Builds an isolated Python environment from the bundled virtualenv archive,
//! installs the bundled packages into it without network access, and
//! optionally symlinks the `aws` executable onto the caller's PATH.

use clap::Parser;

mod archive;
mod bundle;
mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod logging;
mod platform;
mod process;
mod temp;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::install::run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
