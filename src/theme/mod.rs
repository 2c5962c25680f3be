//! Theme for human-mode output.

use console::Style;

/// Styles shared by every human-mode message.
pub struct Theme {
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,
    pub label: Style,
    pub value: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            muted: Style::new().dim(),
            label: Style::new().dim(),
            value: Style::new().bold(),
        }
    }
}

impl Theme {
    /// Theme with every style stripped, for `--no-color` and pipes.
    pub fn plain() -> Self {
        Self {
            accent: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            muted: Style::new(),
            label: Style::new(),
            value: Style::new(),
        }
    }
}
