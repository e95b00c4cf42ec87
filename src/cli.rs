//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// Install the AWS CLI from a pre-downloaded bundle
///
/// Creates an isolated Python environment and installs the bundled packages
/// into it without network access.
#[derive(Parser, Debug)]
#[command(
    name = "awscli-bundle",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install the AWS CLI from an offline bundle",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  awscli-bundle\n    \
                  awscli-bundle -i /usr/local/aws -b /usr/local/bin/aws\n    \
                  awscli-bundle --python /usr/bin/python3"
)]
pub struct Cli {
    /// The location to install the AWS CLI (default: ~/.local/lib/aws)
    #[arg(
        long,
        short = 'i',
        value_name = "PATH",
        env = "AWSCLI_BUNDLE_INSTALL_DIR"
    )]
    pub install_dir: Option<PathBuf>,

    /// Create a symlink at this location that points to the aws executable,
    /// e.g. -b /usr/local/bin/aws. Without it, add INSTALL_DIR/bin to your PATH.
    #[arg(long, short = 'b', value_name = "PATH")]
    pub bin_location: Option<PathBuf>,

    /// Directory holding the bundled archives (default: ./packages next to this executable)
    #[arg(long, value_name = "PATH", env = "AWSCLI_BUNDLE_PACKAGES_DIR")]
    pub packages_dir: Option<PathBuf>,

    /// Python interpreter used to create the environment (default: python3 or python on PATH)
    #[arg(long, value_name = "PATH", env = "AWSCLI_BUNDLE_PYTHON")]
    pub python: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
