//! User-facing output
//!
//! Plain progress lines go to stdout so they survive redirection into a
//! log file; the spinner draws on stderr and hides itself when stderr is
//! not a terminal.

use std::path::Path;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a blocking external command runs
pub struct CommandProgress {
    pb: Option<ProgressBar>,
}

impl CommandProgress {
    /// Start a spinner for `command`, or a no-op when `enabled` is false
    pub fn start(enabled: bool, command: &str) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {elapsed} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message(truncate_command(command));
        pb.enable_steady_tick(Duration::from_millis(120));

        Self { pb: Some(pb) }
    }

    /// Clear the spinner
    pub fn finish(self) {
        if let Some(pb) = self.pb {
            pb.finish_and_clear();
        }
    }
}

fn truncate_command(command: &str) -> String {
    const MAX: usize = 60;
    let chars: Vec<char> = command.chars().collect();
    if chars.len() > MAX {
        let tail: String = chars[chars.len() - (MAX - 3)..].iter().collect();
        format!("...{tail}")
    } else {
        command.to_string()
    }
}

/// Echo a command before it runs
pub fn print_running(command: &str) {
    let dim = Style::new().dim();
    println!("{} {}", dim.apply_to("Running cmd:"), command);
}

/// Notice printed before an existing file at the symlink path is replaced
pub fn print_symlink_replaced(link: &Path) {
    let yellow = Style::new().yellow();
    println!(
        "{} {}",
        yellow.apply_to("Symlink already exists:"),
        link.display()
    );
    println!("Removing symlink.");
}

/// Final message naming the runnable executable
pub fn print_success(runnable: &Path) {
    let green = Style::new().green().bold();
    println!(
        "{} {} --version",
        green.apply_to("You can now run:"),
        runnable.display()
    );
}
