//! Output management and formatting.
//!
//! Results go to stdout; warnings and diagnostics go to stderr so that
//! `goca config show > config.yaml` stays clean.

use std::io::{self, IsTerminal};

use console::Term;
use goca_core::{
    application::DryRunSummary,
    domain::{Diagnostic, Severity},
};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on flags and preferences.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    err_term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded preferences.
    ///
    /// `--output-format` wins over the `output.format` preference unless it
    /// is left at `auto`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_preference(&config.output.format),
            explicit => explicit,
        };
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Command result (document, value, JSON); printed even in quiet mode.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg.trim_end_matches('\n'))
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator on stderr: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.err_term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One diagnostic on stderr. Warnings respect quiet mode; errors do not.
    pub fn diagnostic(&self, d: &Diagnostic) -> io::Result<()> {
        if self.quiet && d.severity == Severity::Warning {
            return Ok(());
        }
        let line = format_diagnostic(d, self.no_color);
        self.err_term.write_line(&line)
    }

    /// Dry-run preview or post-write listing.
    pub fn summary(&self, summary: &DryRunSummary) -> io::Result<()> {
        if summary.dry_run {
            self.header("Dry run: nothing was written")?;
        }
        self.print(summary.to_string().trim_end())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

/// `⚠ database.port = 27017: derived from database.type`
fn format_diagnostic(d: &Diagnostic, no_color: bool) -> String {
    let (icon, label) = match d.severity {
        Severity::Error => ("\u{2717}", "error"),   // ✗
        Severity::Warning => ("\u{26a0}", "warning"), // ⚠
    };
    let text = format!("{label}: {} = {}: {}", d.field, d.value, d.message);
    if no_color {
        return format!("{icon} {text}");
    }
    match d.severity {
        Severity::Error => format!("{} {}", icon.red().bold(), text.red()),
        Severity::Warning => format!("{} {}", icon.yellow().bold(), text.yellow()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
