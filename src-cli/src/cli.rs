//! Command-line arguments

use clap::Parser;
use edit_engine::Range;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Format JavaScript files with Prettier", long_about = None)]
pub struct Cli {
    /// File to format; it is rewritten in place unless --check is given
    pub file: PathBuf,

    /// Directory holding jsprettier.js
    #[arg(long, env = "JSPRETTIER_PLUGIN_DIR", default_value = ".")]
    pub plugin_dir: PathBuf,

    /// Directory holding JsPrettier.sublime-settings (defaults to the plugin directory)
    #[arg(long)]
    pub settings_dir: Option<PathBuf>,

    /// Indentation width of the view, overriding any configured tabWidth
    #[arg(long)]
    pub tab_size: Option<u32>,

    /// Character range to format, as START..END; repeat for several ranges
    #[arg(long = "select", value_parser = parse_range)]
    pub selections: Vec<Range>,

    /// Runtime used to execute the formatter script
    #[arg(long, default_value = formatter::DEFAULT_RUNTIME)]
    pub node: String,

    /// Formatter script, overriding the one in the plugin directory
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Print the formatted text instead of writing the file
    #[arg(long)]
    pub check: bool,
}

/// Parse `START..END` into a range
pub fn parse_range(value: &str) -> Result<Range, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got `{}`", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid offset `{}`: {}", part, e))
    };
    Ok(Range::new(parse(start)?, parse(end)?))
}
