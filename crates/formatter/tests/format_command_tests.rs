//! Integration tests for the format command
//!
//! Most tests run against a spy launcher that records every invocation and
//! answers with a scripted formatter. The Unix-only tests at the bottom run
//! real shell scripts as the formatter runtime.

use edit_engine::{Buffer, Range, TextBuffer, ViewSettings};
use formatter::{
    status_channel, CollectingReporter, ExternalFormatter, FormatCommand, FormatError, FormatterPaths,
    Invocation, LaunchResult, Platform, ProcessLauncher, ProcessOutput, StatusLine, FORMATTED_MESSAGE,
};
use std::cell::RefCell;
use store::PluginSettings;

/// One recorded launch
#[derive(Debug, Clone)]
struct Call {
    argv: Vec<String>,
    stdin: String,
}

/// Records launches and answers them with a scripted formatter
struct SpyLauncher {
    calls: RefCell<Vec<Call>>,
    respond: Box<dyn Fn(&str) -> ProcessOutput>,
}

impl SpyLauncher {
    fn new(respond: impl Fn(&str) -> ProcessOutput + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    fn echo() -> Self {
        Self::new(|source| ProcessOutput::stdout(source))
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ProcessLauncher for SpyLauncher {
    fn launch(&self, invocation: &Invocation, stdin: &[u8]) -> LaunchResult {
        let stdin = String::from_utf8_lossy(stdin).into_owned();
        self.calls.borrow_mut().push(Call {
            argv: invocation.argv.clone(),
            stdin: stdin.clone(),
        });
        Ok((self.respond)(&stdin))
    }
}

struct Harness {
    command: FormatCommand<SpyLauncher, CollectingReporter>,
    status_line: StatusLine,
}

impl Harness {
    fn new(launcher: SpyLauncher) -> Self {
        let formatter = ExternalFormatter::with_launcher(FormatterPaths::in_plugin_dir("/plugins/JsPrettier"), launcher)
            .with_platform(Platform::Other);
        let (notifier, status_line) = status_channel();
        Self {
            command: FormatCommand::new(formatter, CollectingReporter::new(), notifier),
            status_line,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.command.formatter().launcher().calls()
    }

    fn messages(&self) -> Vec<String> {
        self.command.reporter().messages()
    }
}

fn spacing_formatter(source: &str) -> ProcessOutput {
    ProcessOutput::stdout(format!("{}\n", source.replace('=', " = ")))
}

#[test]
fn unsaved_buffer_is_refused_without_launching() {
    let mut harness = Harness::new(SpyLauncher::echo());
    let mut buffer = TextBuffer::new("const x=1").with_selection([Range::new(0, 5)]);

    let err = harness
        .command
        .execute(&mut buffer, &PluginSettings::default())
        .unwrap_err();

    assert!(matches!(err, FormatError::NoPersistedIdentity));
    assert!(harness.calls().is_empty());
    assert_eq!(buffer.text(), "const x=1");

    let messages = harness.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("JsPrettier Error\n\n"));
    assert!(messages[0].contains("must be Saved"));
    assert!(harness.status_line.drain().is_empty());
}

#[test]
fn echo_formatter_round_trips() {
    let harness = Harness::new(SpyLauncher::echo());
    let source = "function  f ( ) {\n  return 1\n}\n";
    let mut buffer = TextBuffer::with_path("/project/src/f.js", source);

    let outcomes = harness.command.execute(&mut buffer, &PluginSettings::default()).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_success());
    assert_eq!(buffer.text(), source);
}

#[test]
fn spacing_formatter_rewrites_range() {
    let mut harness = Harness::new(SpyLauncher::new(spacing_formatter));
    let mut buffer = TextBuffer::with_path("/project/x.js", "const x=1");

    harness.command.execute(&mut buffer, &PluginSettings::default()).unwrap();

    assert_eq!(buffer.text(), "const x = 1\n");
    assert_eq!(
        harness.status_line.drain().into_iter().map(|m| m.0).collect::<Vec<_>>(),
        vec![FORMATTED_MESSAGE.to_string()]
    );
}

#[test]
fn formatter_diagnostic_leaves_text_alone() {
    let mut harness = Harness::new(SpyLauncher::new(|_| ProcessOutput::stderr("SyntaxError: unexpected token")));
    let mut buffer = TextBuffer::with_path("/project/x.js", "const = ;");

    let outcomes = harness.command.execute(&mut buffer, &PluginSettings::default()).unwrap();

    assert_eq!(buffer.text(), "const = ;");
    assert!(matches!(
        &outcomes[0].result,
        Err(FormatError::FormatterDiagnostic(msg)) if msg == "SyntaxError: unexpected token"
    ));
    let messages = harness.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("SyntaxError: unexpected token"));
    assert!(harness.status_line.drain().is_empty());
}

#[test]
fn no_selection_formats_whole_buffer_once() {
    let harness = Harness::new(SpyLauncher::echo());
    let mut buffer = TextBuffer::with_path("/project/x.js", "a=1\nb=2\n");

    harness.command.execute(&mut buffer, &PluginSettings::default()).unwrap();

    let calls = harness.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].stdin, "a=1\nb=2\n");
}

#[test]
fn each_selected_range_is_formatted_independently() {
    // The first range fails, the second succeeds
    let harness = Harness::new(SpyLauncher::new(|source| {
        if source.starts_with("bad") {
            ProcessOutput::stderr("SyntaxError: unexpected token")
        } else {
            spacing_formatter(source)
        }
    }));
    let mut buffer = TextBuffer::with_path("/project/x.js", "bad(\nlet y=2\nlet z=3")
        .with_selection([Range::new(0, 4), Range::new(5, 12), Range::caret(14)]);

    let outcomes = harness.command.execute(&mut buffer, &PluginSettings::default()).unwrap();

    let calls = harness.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].stdin, "bad(");
    assert_eq!(calls[1].stdin, "let y=2");

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].is_success());
    assert!(outcomes[1].is_success());
    assert_eq!(buffer.text(), "bad(\nlet y = 2\n\nlet z=3");
    assert_eq!(harness.messages().len(), 1);
}

#[test]
fn live_indentation_overrides_stored_tab_width() {
    let harness = Harness::new(SpyLauncher::echo());
    let mut buffer = TextBuffer::with_path("/project/src/x.js", "x")
        .with_settings(ViewSettings::new().with("tab_size", 4));
    let stored = PluginSettings::default().with_option("tabWidth", 8);

    harness.command.execute(&mut buffer, &stored).unwrap();

    let calls = harness.calls();
    assert_eq!(calls[0].argv[0], "node");
    assert!(calls[0].argv[2].contains(r#""tabWidth":4"#));
    assert_eq!(calls[0].argv[3], "/project/src");
}

#[test]
fn buffer_selection_follows_replacements() {
    let harness = Harness::new(SpyLauncher::new(spacing_formatter));
    let mut buffer = TextBuffer::with_path("/project/x.js", "a=1;b=2")
        .with_selection([Range::new(0, 4), Range::new(4, 7)]);

    harness.command.execute(&mut buffer, &PluginSettings::default()).unwrap();

    assert_eq!(buffer.text(), "a = 1;\nb = 2\n");
    assert_eq!(buffer.selection().ranges(), &[Range::new(0, 7), Range::new(7, 13)]);
}

#[cfg(unix)]
mod real_process {
    use super::*;
    use formatter::SystemLauncher;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command whose runtime is `sh` and whose script is `body`
    fn shell_command(dir: &Path, body: &str) -> FormatCommand<SystemLauncher, CollectingReporter> {
        let script = dir.join("jsprettier.js");
        std::fs::write(&script, body).unwrap();
        let formatter = ExternalFormatter::new(FormatterPaths::in_plugin_dir(dir).with_runtime("sh"))
            .with_platform(Platform::Other);
        let (notifier, _) = status_channel();
        FormatCommand::new(formatter, CollectingReporter::new(), notifier)
    }

    #[test]
    fn shell_formatter_rewrites_text() {
        let temp_dir = TempDir::new().unwrap();
        let command = shell_command(temp_dir.path(), "printf '%s\\n' \"$(sed 's/=/ = /')\"\n");
        let mut buffer = TextBuffer::with_path(temp_dir.path().join("x.js"), "const x=1");

        command.execute(&mut buffer, &PluginSettings::default()).unwrap();

        assert_eq!(buffer.text(), "const x = 1\n");
        assert!(command.reporter().is_empty());
    }

    #[test]
    fn shell_formatter_receives_config_and_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let command = shell_command(temp_dir.path(), "cat > /dev/null\nprintf '%s|%s' \"$1\" \"$2\"\n");
        let file = temp_dir.path().join("x.js");
        let mut buffer = TextBuffer::with_path(&file, "x")
            .with_settings(ViewSettings::new().with("tab_size", 4));

        command.execute(&mut buffer, &PluginSettings::default()).unwrap();

        let expected = format!(r#"{{"tabWidth":4}}|{}"#, temp_dir.path().display());
        assert_eq!(buffer.text(), expected);
    }

    #[test]
    fn shell_formatter_error_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let command = shell_command(
            temp_dir.path(),
            "cat > /dev/null\nprintf 'SyntaxError: unexpected token' >&2\nexit 2\n",
        );
        let mut buffer = TextBuffer::with_path(temp_dir.path().join("x.js"), "const = ;");

        command.execute(&mut buffer, &PluginSettings::default()).unwrap();

        assert_eq!(buffer.text(), "const = ;");
        assert_eq!(
            command.reporter().messages(),
            vec!["JsPrettier Error\n\nSyntaxError: unexpected token".to_string()]
        );
    }

    #[test]
    fn missing_runtime_is_tool_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let formatter = ExternalFormatter::new(
            FormatterPaths::in_plugin_dir(temp_dir.path()).with_runtime("no-such-node-runtime-41c2"),
        );
        let (notifier, _) = status_channel();
        let command = FormatCommand::new(formatter, CollectingReporter::new(), notifier);
        let mut buffer = TextBuffer::with_path(temp_dir.path().join("x.js"), "x");

        let outcomes = command.execute(&mut buffer, &PluginSettings::default()).unwrap();

        assert!(matches!(outcomes[0].result, Err(FormatError::ToolNotFound { .. })));
        assert_eq!(buffer.text(), "x");
        assert!(command.reporter().messages()[0].contains("no-such-node-runtime-41c2 program path not found!"));
    }
}
