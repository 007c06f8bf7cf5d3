//! Output formatting for route and load rendering.

use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use freightpath_lib::{ConsolidationSummary, RenderMode, RouteSummary};

use crate::terminal::{supports_unicode, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Markdown,
    /// Pretty-printed JSON on stdout.
    Json,
}

impl OutputFormat {
    /// Whether decorative output (logo, footer) should be printed.
    pub fn is_decorated(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }

    fn render_mode(self) -> RenderMode {
        match self {
            OutputFormat::Markdown => RenderMode::Markdown,
            _ => RenderMode::PlainText,
        }
    }
}

/// Print the CLI banner.
pub fn print_logo() {
    let palette = ColorPalette::detect();
    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────╮{reset}\n\
             {cyan}│{orange}  F R E I G H T P A T H       {cyan}│{reset}\n\
             {cyan}╰──────────────────────────────╯{reset}",
            cyan = palette.cyan,
            orange = palette.orange,
            reset = palette.reset
        );
    } else {
        println!(
            "{orange}+------------------------------+\n\
             |  FREIGHTPATH                 |\n\
             +------------------------------+{reset}",
            orange = palette.orange,
            reset = palette.reset
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: Duration) {
    let palette = ColorPalette::detect();
    println!(
        "\n{}",
        palette.dim(format!("Completed in {}", format_elapsed(elapsed)))
    );
}

/// Format a duration as milliseconds below one second, seconds otherwise.
pub fn format_elapsed(elapsed: Duration) -> String {
    let elapsed_ms = elapsed.as_millis();
    if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Print a single-route summary in the requested format.
pub fn emit_route(summary: &RouteSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => emit_json(summary),
        other => {
            print!("{}", highlight_heading(&summary.render(other.render_mode()), other));
            Ok(())
        }
    }
}

/// Print a consolidation summary in the requested format.
pub fn emit_consolidation(summary: &ConsolidationSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => emit_json(summary),
        other => {
            print!("{}", highlight_heading(&summary.render(other.render_mode()), other));
            Ok(())
        }
    }
}

/// Emphasize the first line of plain text output. Markdown is left as is.
fn highlight_heading(rendered: &str, format: OutputFormat) -> String {
    if format != OutputFormat::Text {
        return rendered.to_string();
    }
    let palette = ColorPalette::detect();
    match rendered.split_once('\n') {
        Some((heading, rest)) => format!("{}\n{}", palette.emphasize(heading), rest),
        None => palette.emphasize(rendered),
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_switches_units_at_one_second() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250ms");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn markdown_heading_is_not_colored() {
        let rendered = "## Route\n1. Depot\n";
        assert_eq!(highlight_heading(rendered, OutputFormat::Markdown), rendered);
    }

    #[test]
    fn json_is_undecorated() {
        assert!(!OutputFormat::Json.is_decorated());
        assert!(OutputFormat::Text.is_decorated());
        assert_eq!(OutputFormat::Markdown.render_mode(), RenderMode::Markdown);
    }
}
