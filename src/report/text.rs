//! The human-readable analysis block.

use std::io::Write;

use colored::Color;

use super::{signature, Render, Report, ReportBody};
use crate::runtime::descriptor::CallDescriptor;
use crate::runtime::result::ErrorChain;
use crate::Result;

const OPENING_BANNER: &str = "=== Execution Analysis ===";
const CLOSING_BANNER: &str = "=== End Analysis ===";
const EXECUTING: &str = "⏳ Executing...";
const SUCCEEDED: &str = "✅ Execution completed successfully!";
const FAILED: &str = "❌ Exception occurred during execution!";
const TRACE_HEADER: &str = "📍 Stack trace (first few lines):";
const TRACE_INDENT: &str = "   ";

/// Writes the fixed-literal text report, optionally with ANSI styling.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    styled: bool,
}

impl TextRenderer {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    /// Bold and coloured when styled. The escape codes are written directly,
    /// so `colored`'s global terminal and `NO_COLOR` checks do not apply.
    fn paint(&self, text: &str, color: Color) -> String {
        if self.styled {
            format!("\x1b[1;{}m{text}\x1b[0m", color.to_fg_str())
        } else {
            text.to_owned()
        }
    }

    fn write_success(&self, out: &mut dyn Write, report: &Report<'_>) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.paint(SUCCEEDED, Color::Green))?;
        writeln!(
            out,
            "⏱️  Execution time: {:.2} ms",
            report.timing.elapsed_ms()
        )?;
        match &report.body {
            ReportBody::Returned(value) => {
                writeln!(out, "📋 Result: {}({})", value.display, value.type_name)?
            }
            _ => writeln!(out, "📋 Result: void")?,
        }
        Ok(())
    }

    fn write_failure(&self, out: &mut dyn Write, chain: &ErrorChain) -> Result<()> {
        writeln!(out, "{}", self.paint(FAILED, Color::Red))?;
        writeln!(out, "🚨 Exception: {} ({})", chain.message, chain.type_name)?;
        if let Some(cause) = &chain.cause {
            writeln!(out, "🔗 Inner exception: {} - {}", cause.type_name, cause.message)?;
        }
        writeln!(out, "{TRACE_HEADER}")?;
        for line in chain.rendered_trace() {
            writeln!(out, "{TRACE_INDENT}{line}")?;
        }
        Ok(())
    }
}

impl Render for TextRenderer {
    fn begin(&mut self, out: &mut dyn Write, descriptor: &CallDescriptor) -> Result<()> {
        writeln!(out, "{}", self.paint(OPENING_BANNER, Color::Blue))?;
        writeln!(out, "{}", signature(descriptor))?;
        writeln!(out)?;
        writeln!(out, "{}", self.paint(EXECUTING, Color::Yellow))?;
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write, report: &Report<'_>) -> Result<()> {
        match report.body {
            ReportBody::Failed(chain) => self.write_failure(out, chain)?,
            ReportBody::Returned(_) | ReportBody::Void => self.write_success(out, report)?,
        }
        writeln!(out)?;
        writeln!(out, "{}", self.paint(CLOSING_BANNER, Color::Blue))?;
        writeln!(out)?;
        Ok(())
    }
}
