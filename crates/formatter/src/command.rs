//! The format command

use crate::external::ExternalFormatter;
use crate::launch::{ProcessLauncher, SystemLauncher};
use crate::notify::{StatusNotifier, FORMATTED_MESSAGE};
use crate::report::{dialog_text, ErrorReporter};
use crate::{FormatConfig, FormatError, Result};
use edit_engine::{Buffer, Range};
use std::path::Path;
use store::{PluginSettings, PLUGIN_NAME};

/// What happened to one range during a command run
#[derive(Debug)]
pub struct RangeOutcome {
    /// Where the range sat in the buffer when it was formatted
    pub range: Range,
    /// Range now holding the formatted text, or why formatting failed
    pub result: Result<Range>,
}

impl RangeOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Formats a buffer, or each of its selected ranges, through the external
/// formatter and writes the results back in place.
pub struct FormatCommand<L = SystemLauncher, R = crate::CollectingReporter> {
    formatter: ExternalFormatter<L>,
    reporter: R,
    notifier: StatusNotifier,
}

impl<L: ProcessLauncher, R: ErrorReporter> FormatCommand<L, R> {
    pub fn new(formatter: ExternalFormatter<L>, reporter: R, notifier: StatusNotifier) -> Self {
        Self {
            formatter,
            reporter,
            notifier,
        }
    }

    pub fn formatter(&self) -> &ExternalFormatter<L> {
        &self.formatter
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Run the command against `buffer`
    ///
    /// `file_settings` are the persisted plugin settings; per-view overrides
    /// are read from the buffer's own settings and win key by key. Fails
    /// outright only when the buffer was never saved. Per-range failures are
    /// reported and recorded in the returned outcomes.
    pub fn execute<B>(&self, buffer: &mut B, file_settings: &PluginSettings) -> Result<Vec<RangeOutcome>>
    where
        B: Buffer + ?Sized,
    {
        let Some(file_name) = buffer.file_name().map(Path::to_path_buf) else {
            let err = FormatError::NoPersistedIdentity;
            self.reporter.error_message(&dialog_text(&err.to_string()));
            return Err(err);
        };

        let view_overrides = buffer
            .settings()
            .plugin_overrides(PLUGIN_NAME)
            .map(PluginSettings::from_object);
        let settings = store::resolve(view_overrides.as_ref(), file_settings);
        let config = FormatConfig::new(&settings.config, buffer.settings().tab_size());

        let targets: Vec<Range> = if buffer.selection().has_non_empty() {
            buffer.selection().ranges().to_vec()
        } else {
            vec![buffer.full_range()]
        };

        tracing::debug!(
            file = %file_name.display(),
            ranges = targets.len(),
            tab_width = ?config.tab_width(),
            "formatting buffer"
        );

        // Earlier replacements move later ranges by the change in length
        let mut shift: isize = 0;
        let mut outcomes = Vec::with_capacity(targets.len());

        for target in targets {
            if target.is_empty() {
                continue;
            }
            let range = target.shifted(shift);
            let result = self.format_range(buffer, range, &config, &file_name, settings.node_path.as_deref());

            match &result {
                Ok(replaced) => {
                    shift += replaced.len() as isize - range.len() as isize;
                    self.notifier.notify(FORMATTED_MESSAGE);
                }
                Err(err) => {
                    tracing::debug!(%range, "formatting failed: {}", err);
                    self.reporter.error_message(&dialog_text(&err.to_string()));
                }
            }
            outcomes.push(RangeOutcome { range, result });
        }

        Ok(outcomes)
    }

    fn format_range<B>(
        &self,
        buffer: &mut B,
        range: Range,
        config: &FormatConfig,
        file_name: &Path,
        node_path: Option<&str>,
    ) -> Result<Range>
    where
        B: Buffer + ?Sized,
    {
        let source = buffer.substr(range)?;
        let formatted = self.formatter.format(&source, config, file_name, node_path)?;
        Ok(buffer.replace(range, &formatted)?)
    }
}
