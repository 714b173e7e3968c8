//! Report rendering.
//!
//! A report is written in two steps around the call: [`Render::begin`]
//! writes everything known before execution (the header), and
//! [`Render::finish`] writes the outcome once the call has returned. The
//! lab flushes between the two so output printed by the call itself lands
//! between the header and the outcome.

use std::io::Write;

use itertools::Itertools;

use crate::inspector::{format_argument, FormattedValue};
use crate::runtime::descriptor::CallDescriptor;
use crate::runtime::result::{ErrorChain, Timing};
use crate::Result;

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

/// What the report says about the call's outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody<'a> {
    Returned(FormattedValue),
    Void,
    Failed(&'a ErrorChain),
}

/// Everything the renderer needs once the call has finished.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub descriptor: &'a CallDescriptor,
    pub timing: &'a Timing,
    pub body: ReportBody<'a>,
}

/// A report writer.
pub trait Render {
    /// Write the part of the report that precedes execution.
    fn begin(&mut self, out: &mut dyn Write, descriptor: &CallDescriptor) -> Result<()>;

    /// Write the outcome and close the report.
    fn finish(&mut self, out: &mut dyn Write, report: &Report<'_>) -> Result<()>;
}

/// `Target.method(Type name = value, ...)`
pub fn signature(descriptor: &CallDescriptor) -> String {
    let arguments = descriptor
        .arguments()
        .iter()
        .map(|arg| {
            format!(
                "{} {} = {}",
                arg.value.type_label(),
                arg.name,
                format_argument(&arg.value)
            )
        })
        .join(", ");
    format!("{}.{}({})", descriptor.target(), descriptor.method(), arguments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_pairs_names_with_values() {
        let descriptor = CallDescriptor::builder("Demo", "complex")
            .argument("number", &42)
            .argument("letter", &'A')
            .argument("flag", &true)
            .argument("null_value", &None::<String>)
            .build();
        assert_eq!(
            signature(&descriptor),
            "Demo.complex(i32 number = 42, char letter = 'A', bool flag = true, object null_value = null)"
        );
    }

    #[test]
    fn zero_argument_signature_has_empty_parens() {
        assert_eq!(signature(&CallDescriptor::unknown()), "Unknown.Unknown()");
    }
}
