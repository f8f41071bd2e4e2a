//! Color palette for terminal output.

use owo_colors::Style;

use crate::domain::InstanceState;

/// One `Style` per kind of output. `Default` is the uncolored palette.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Secondary text: keys, column padding, stopped instances.
    pub dim: Style,
    pub bold: Style,
    /// Instance headings and step arrows.
    pub header: Style,
}

impl Styles {
    /// The palette used on a color terminal.
    #[must_use]
    pub fn colored() -> Self {
        let mut styles = Self::default();
        styles.colorize();
        styles
    }

    /// Switch this palette to colors in place.
    pub fn colorize(&mut self) {
        *self = Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            bold: Style::new().bold(),
            header: Style::new().cyan().bold(),
        };
    }

    /// Running is green, failed red, stopped dimmed.
    #[must_use]
    pub fn state(&self, state: InstanceState) -> Style {
        match state {
            InstanceState::Running => self.success,
            InstanceState::Failed => self.error,
            InstanceState::Stopped => self.dim,
        }
    }
}
