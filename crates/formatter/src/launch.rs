//! Process launching
//!
//! How the formatter process is started depends on the platform: macOS gets
//! the configured `node_path` appended to `PATH`, Windows goes through
//! `cmd /C`, everything else runs the runtime directly. The choice is a
//! lookup in [`LAUNCH_STRATEGIES`], made once per invocation.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Platform families with distinct launch behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    Windows,
    Other,
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    pub fn strategy(self) -> LaunchStrategy {
        LAUNCH_STRATEGIES
            .iter()
            .find(|(platform, _)| *platform == self)
            .map(|(_, strategy)| *strategy)
            .unwrap_or_default()
    }
}

/// How to start the formatter on a given platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchStrategy {
    /// Append `node_path` to the inherited `PATH`
    pub augment_path: bool,
    /// Run the command line through the system shell
    pub shell_indirection: bool,
}

pub const LAUNCH_STRATEGIES: [(Platform, LaunchStrategy); 3] = [
    (
        Platform::MacOs,
        LaunchStrategy {
            augment_path: true,
            shell_indirection: false,
        },
    ),
    (
        Platform::Windows,
        LaunchStrategy {
            augment_path: false,
            shell_indirection: true,
        },
    ),
    (
        Platform::Other,
        LaunchStrategy {
            augment_path: false,
            shell_indirection: false,
        },
    ),
];

/// A fully resolved process launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program followed by its arguments
    pub argv: Vec<String>,
    /// Replacement `PATH` for the child, `None` to inherit
    pub path: Option<OsString>,
    /// Wrap `argv` in `cmd /C`
    pub shell: bool,
}

impl Invocation {
    /// Resolve `argv` against a launch strategy
    pub fn new(argv: Vec<String>, strategy: LaunchStrategy, node_path: Option<&str>) -> io::Result<Self> {
        let path = match node_path {
            Some(extra) if strategy.augment_path => Some(augmented_path(extra)?),
            _ => None,
        };
        Ok(Self {
            argv,
            path,
            shell: strategy.shell_indirection,
        })
    }

    /// The runtime executable, first entry of `argv`
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }
}

/// Inherited `PATH` followed by the entries of `extra`
fn augmented_path(extra: &str) -> io::Result<OsString> {
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    let entries: Vec<_> = std::env::split_paths(&inherited)
        .chain(std::env::split_paths(extra))
        .filter(|entry| !entry.as_os_str().is_empty())
        .collect();
    std::env::join_paths(entries).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
}

impl ProcessOutput {
    pub fn stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            status: Some(0),
            ..Self::default()
        }
    }

    pub fn stderr(stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            stderr: stderr.into(),
            status: Some(1),
            ..Self::default()
        }
    }
}

/// Why a launch produced no [`ProcessOutput`]
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The process could not be started
    #[error("failed to start process: {0}")]
    Spawn(#[source] io::Error),

    /// The process started but collecting its output failed
    #[error("failed to collect process output: {0}")]
    Wait(#[source] io::Error),
}

pub type LaunchResult = std::result::Result<ProcessOutput, LaunchError>;

/// Starts a process, feeds it stdin and waits for it to finish
pub trait ProcessLauncher {
    fn launch(&self, invocation: &Invocation, stdin: &[u8]) -> LaunchResult;
}

impl<F> ProcessLauncher for F
where
    F: Fn(&Invocation, &[u8]) -> LaunchResult,
{
    fn launch(&self, invocation: &Invocation, stdin: &[u8]) -> LaunchResult {
        self(invocation, stdin)
    }
}

/// Launches real OS processes through `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    fn command(invocation: &Invocation) -> io::Result<Command> {
        let (program, args) = invocation
            .argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;

        let mut command = if invocation.shell {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(program);
            command
        } else {
            Command::new(program)
        };
        command.args(args);

        if let Some(path) = &invocation.path {
            command.env("PATH", path);
        }
        Ok(command)
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, invocation: &Invocation, stdin: &[u8]) -> LaunchResult {
        let mut child = Self::command(invocation)
            .and_then(|mut command| {
                command
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
            })
            .map_err(LaunchError::Spawn)?;

        // Feed stdin from its own thread so a child that writes a lot before
        // reading everything cannot fill the stdout pipe and stall both sides.
        let writer = child.stdin.take().map(|mut pipe| {
            let input = stdin.to_vec();
            std::thread::spawn(move || match pipe.write_all(&input) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });

        let output = child.wait_with_output().map_err(LaunchError::Wait)?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Err(e)) => tracing::debug!("failed to write formatter stdin: {}", e),
                Err(_) => tracing::debug!("formatter stdin writer panicked"),
                Ok(Ok(())) => {}
            }
        }

        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            status: output.status.code(),
        })
    }
}
