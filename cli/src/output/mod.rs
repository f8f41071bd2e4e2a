//! Terminal output for the manager: message lines, progress, and renderers.
//!
//! Everything the user reads goes through [`OutputContext`]. Results (tables,
//! status blocks, config dumps) are printed by the renderers regardless of
//! `--quiet`; chatter around them is not.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use styles::Styles;

/// Width of the key column in `kv` lines, wide enough for "Workspace:".
const KEY_WIDTH: usize = 14;

/// Where the manager writes and how it decorates what it writes.
pub struct OutputContext {
    /// Colors in effect for this run (all plain when color is off).
    pub styles: Styles,
    /// stdout is attached to a terminal.
    pub is_tty: bool,
    /// `--quiet`: only results and errors are printed.
    pub quiet: bool,
}

impl OutputContext {
    /// Build the context from `--no-color` and `--quiet`.
    ///
    /// Color also turns off when stdout is piped or `NO_COLOR` is set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let colored = is_tty && !no_color && std::env::var_os("NO_COLOR").is_none();
        Self {
            styles: if colored { Styles::colored() } else { Styles::default() },
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet stdout.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    fn marked(&self, mark: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", mark.style(style));
        }
    }

    /// `✓ msg`, for a lifecycle step that completed.
    pub fn success(&self, msg: &str) {
        self.marked("✓", self.styles.success, msg);
    }

    /// `! msg`, for something left behind or skipped.
    pub fn warn(&self, msg: &str) {
        self.marked("!", self.styles.warning, msg);
    }

    /// `ℹ msg`
    pub fn info(&self, msg: &str) {
        self.marked("ℹ", self.styles.info, msg);
    }

    /// Failure line on stderr. Printed even under `--quiet`.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "ERROR:".style(self.styles.error));
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Aligned `Key:  value` line, as used in the create summary.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            let key = format!("{key:<KEY_WIDTH$}");
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}
