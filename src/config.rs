//! Lab configuration: report format and colouring.

use clap::ValueEnum;
use is_terminal::IsTerminal;
use serde::Serialize;

use crate::report::{JsonRenderer, Render, TextRenderer};

/// How a report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// The human-readable analysis block.
    #[default]
    Text,
    /// One JSON document per call.
    Json,
}

/// Whether text reports carry ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Style only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LabConfig {
    pub format: ReportFormat,
    pub color: ColorChoice,
}

impl LabConfig {
    /// Text output, coloured when stdout is a terminal.
    pub fn detect() -> Self {
        Self::default()
    }

    /// Text output without styling, for in-memory sinks.
    pub fn plain() -> Self {
        Self::default().with_color(ColorChoice::Never)
    }

    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Whether text reports carry ANSI escape codes. `Always` emits them even
    /// when stdout is not a terminal.
    pub fn styled(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn renderer(&self) -> Box<dyn Render> {
        match self.format {
            ReportFormat::Text => Box::new(TextRenderer::new(self.styled())),
            ReportFormat::Json => Box::new(JsonRenderer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_config_is_never_styled() {
        let config = LabConfig::plain();
        assert_eq!(config.format, ReportFormat::Text);
        assert!(!config.styled());
    }

    #[test]
    fn explicit_color_wins() {
        assert!(LabConfig::default().with_color(ColorChoice::Always).styled());
    }
}
