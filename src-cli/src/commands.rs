//! Runs the format command against a file on disk

use crate::cli::Cli;
use anyhow::Context;
use edit_engine::{Selection, TextBuffer};
use formatter::{
    CollectingReporter, ExternalFormatter, FormatCommand, FormatterPaths, ProcessLauncher, StatusNotifier,
};
use store::SettingsManager;

/// Format `cli.file` and either save it or print it
///
/// Returns `false` when any range failed to format.
pub fn format_file(cli: &Cli, notifier: StatusNotifier) -> anyhow::Result<bool> {
    let mut paths = FormatterPaths::in_plugin_dir(&cli.plugin_dir).with_runtime(&cli.node);
    if let Some(script) = &cli.script {
        paths.script = script.clone();
    }
    format_file_with(cli, ExternalFormatter::new(paths), notifier)
}

pub fn format_file_with<L: ProcessLauncher>(
    cli: &Cli,
    formatter: ExternalFormatter<L>,
    notifier: StatusNotifier,
) -> anyhow::Result<bool> {
    let settings_dir = cli.settings_dir.as_ref().unwrap_or(&cli.plugin_dir);
    let mut settings = SettingsManager::new(settings_dir);
    let file_settings = settings
        .load()
        .with_context(|| format!("loading settings from {}", settings_dir.display()))?
        .clone();

    let mut buffer = TextBuffer::open(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    if let Some(tab_size) = cli.tab_size {
        buffer.settings_mut().set("tab_size", tab_size);
    }
    buffer.set_selection(Selection::from_ranges(cli.selections.iter().copied()));

    let command = FormatCommand::new(formatter, CollectingReporter::new(), notifier);
    let outcomes = command.execute(&mut buffer, &file_settings)?;

    for message in command.reporter().messages() {
        eprintln!("{}", message);
    }

    let failed = outcomes.iter().filter(|outcome| !outcome.is_success()).count();
    tracing::info!(ranges = outcomes.len(), failed, "format command finished");

    if cli.check {
        print!("{}", buffer.text());
    } else if buffer.is_dirty() {
        buffer
            .save()
            .with_context(|| format!("writing {}", cli.file.display()))?;
    }

    Ok(failed == 0)
}
