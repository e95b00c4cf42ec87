//! Structured external command execution
//!
//! Every tool the installer shells out to goes through [`CommandRunner`], so
//! arguments are passed as a list (no shell quoting) and a non-zero exit
//! always surfaces as [`BundleError::BadExitCode`] with the combined output.

use std::ffi::OsString;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;

use url::Url;

use crate::error::{BundleError, Result};
use crate::ui::CommandProgress;

/// A program invocation: executable, argument list and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command from `dir` instead of the process working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Arguments as lossy strings
    #[cfg(test)]
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    /// Run `command`, blocking until it exits. Any non-zero exit is an error.
    fn run(&self, command: &ExternalCommand) -> Result<()>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner {
    /// Show a spinner while the child runs
    pub show_progress: bool,
}

impl SystemRunner {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<()> {
        let cmd_line = command.to_string();
        crate::ui::print_running(&cmd_line);
        tracing::debug!(cmd = %cmd_line, cwd = ?command.cwd, "spawning");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }

        let progress = CommandProgress::start(self.show_progress, &cmd_line);
        let outcome = cmd.spawn().and_then(|mut child| {
            let output = capture_interleaved(&mut child);
            child.wait().map(|status| (status, output))
        });
        progress.finish();

        let (status, output) = outcome.map_err(|e| BundleError::CommandSpawnFailed {
            command: cmd_line.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(cmd = %cmd_line, %status, %output, "finished");

        if !status.success() {
            return Err(BundleError::BadExitCode {
                command: cmd_line,
                code: exit_code_label(status.code()),
                output,
            });
        }

        Ok(())
    }
}

/// Drain stdout and stderr concurrently into one transcript, line by line in
/// arrival order
fn capture_interleaved(child: &mut Child) -> String {
    let streams: Vec<Box<dyn Read + Send>> = [
        child.stdout.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
        child.stderr.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
    ]
    .into_iter()
    .flatten()
    .collect();

    let (tx, rx) = mpsc::channel::<String>();
    let readers: Vec<_> = streams
        .into_iter()
        .map(|stream| {
            let tx = tx.clone();
            thread::spawn(move || {
                for line in BufReader::new(stream).split(b'\n').map_while(std::io::Result::ok) {
                    let line = String::from_utf8_lossy(&line).trim_end_matches('\r').to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();
    drop(tx);

    let lines: Vec<String> = rx.iter().collect();
    for reader in readers {
        let _ = reader.join();
    }
    lines.join("\n")
}

fn exit_code_label(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Turn an absolute local directory into a percent-encoded `file://` URL
/// for `--find-links`
pub fn file_url(dir: &Path) -> Result<String> {
    Url::from_file_path(dir)
        .map(String::from)
        .map_err(|()| BundleError::IoError {
            message: format!("cannot build a file URL for {}", dir.display()),
        })
}
