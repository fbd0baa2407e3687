//! The external formatter process

use crate::launch::{Invocation, LaunchError, Platform, ProcessLauncher, SystemLauncher};
use crate::{FormatConfig, FormatError, Result};
use std::path::{Path, PathBuf};

/// Runtime used to execute the plugin script
pub const DEFAULT_RUNTIME: &str = "node";

/// File name of the plugin script that drives Prettier
pub const SCRIPT_FILE: &str = "jsprettier.js";

/// Formatted text, or the reason there is none
pub type FormatResult = Result<String>;

/// Where the formatter runtime and its script live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterPaths {
    pub runtime: String,
    pub script: PathBuf,
}

impl FormatterPaths {
    /// Default runtime with the script shipped inside `plugin_dir`
    pub fn in_plugin_dir(plugin_dir: impl AsRef<Path>) -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            script: plugin_dir.as_ref().join(SCRIPT_FILE),
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }
}

/// Runs the formatter script over a piece of text.
///
/// The process gets `[runtime, script, config-json, working-dir]` as its
/// command line and the text on stdin. Non-empty stdout is the formatted
/// text; otherwise stderr is the diagnostic. The exit code is not consulted.
pub struct ExternalFormatter<L = SystemLauncher> {
    launcher: L,
    paths: FormatterPaths,
    platform: Platform,
}

impl ExternalFormatter<SystemLauncher> {
    pub fn new(paths: FormatterPaths) -> Self {
        Self::with_launcher(paths, SystemLauncher)
    }
}

impl<L: ProcessLauncher> ExternalFormatter<L> {
    pub fn with_launcher(paths: FormatterPaths, launcher: L) -> Self {
        Self {
            launcher,
            paths,
            platform: Platform::current(),
        }
    }

    /// Launch as if running on `platform`
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Format `text` for the file at `file_name`
    ///
    /// `node_path` is appended to the search path on platforms whose launch
    /// strategy asks for it.
    pub fn format(
        &self,
        text: &str,
        config: &FormatConfig,
        file_name: &Path,
        node_path: Option<&str>,
    ) -> FormatResult {
        // A bare file name lives in the current directory
        let working_dir = match file_name.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let argv = vec![
            self.paths.runtime.clone(),
            self.paths.script.to_string_lossy().into_owned(),
            config.to_json()?,
            working_dir.to_string_lossy().into_owned(),
        ];

        let invocation = Invocation::new(argv, self.platform.strategy(), node_path)
            .map_err(|e| FormatError::tool_not_found(&self.paths.runtime, e))?;

        tracing::debug!(
            runtime = %self.paths.runtime,
            cwd = %working_dir.display(),
            bytes = text.len(),
            shell = invocation.shell,
            "launching formatter"
        );

        let output = self
            .launcher
            .launch(&invocation, text.as_bytes())
            .map_err(|e| match e {
                LaunchError::Spawn(source) => FormatError::tool_not_found(&self.paths.runtime, source),
                LaunchError::Wait(source) => FormatError::diagnostic(format!(
                    "{} started but its output could not be read: {}",
                    self.paths.runtime, source
                )),
            })?;

        tracing::debug!(
            status = ?output.status,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "formatter finished"
        );

        if output.stdout.is_empty() {
            return Err(FormatError::diagnostic(String::from_utf8_lossy(&output.stderr)));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::diagnostic(format!("formatter wrote invalid UTF-8: {}", e)))
    }
}
