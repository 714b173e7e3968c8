//! One JSON document per run, for machine consumers.

use std::io::Write;

use serde::Serialize;

use super::{signature, Render, Report, ReportBody};
use crate::inspector::{format_argument, FormattedValue};
use crate::runtime::descriptor::CallDescriptor;
use crate::runtime::result::ErrorChain;
use crate::Result;

/// Writes nothing before the call and a pretty-printed document after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    method: &'a str,
    signature: String,
    arguments: Vec<JsonArgument<'a>>,
    started_at: String,
    elapsed_ms: f64,
    outcome: JsonOutcome<'a>,
}

#[derive(Serialize)]
struct JsonArgument<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    value: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonOutcome<'a> {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<&'a FormattedValue>,
    },
    Failure {
        error: JsonError<'a>,
    },
}

#[derive(Serialize)]
struct JsonError<'a> {
    message: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Box<JsonError<'a>>>,
    trace: &'a [String],
}

impl<'a> JsonError<'a> {
    fn from_chain(chain: &'a ErrorChain) -> Self {
        Self {
            message: &chain.message,
            type_name: &chain.type_name,
            cause: chain
                .cause
                .as_deref()
                .map(|cause| Box::new(JsonError::from_chain(cause))),
            trace: chain.rendered_trace(),
        }
    }
}

impl Render for JsonRenderer {
    fn begin(&mut self, _out: &mut dyn Write, _descriptor: &CallDescriptor) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write, report: &Report<'_>) -> Result<()> {
        let descriptor = report.descriptor;
        let outcome = match &report.body {
            ReportBody::Returned(value) => JsonOutcome::Success {
                result: Some(value),
            },
            ReportBody::Void => JsonOutcome::Success { result: None },
            ReportBody::Failed(chain) => JsonOutcome::Failure {
                error: JsonError::from_chain(chain),
            },
        };
        let document = JsonReport {
            target: descriptor.target(),
            method: descriptor.method(),
            signature: signature(descriptor),
            arguments: descriptor
                .arguments()
                .iter()
                .map(|arg| JsonArgument {
                    name: &arg.name,
                    type_name: arg.value.type_label(),
                    value: format_argument(&arg.value),
                })
                .collect(),
            started_at: report.timing.started_at.to_rfc3339(),
            elapsed_ms: report.timing.elapsed_ms(),
            outcome,
        };
        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::format_value;
    use crate::runtime::result::Timing;
    use chrono::Local;
    use serde_json::Value;
    use std::time::Duration;

    fn render(body: ReportBody<'_>) -> Value {
        let descriptor = CallDescriptor::builder("Text", "concat")
            .argument("a", "Hello")
            .argument("b", &'!')
            .build();
        let timing = Timing {
            started_at: Local::now(),
            elapsed: Duration::from_micros(1500),
        };
        let report = Report {
            descriptor: &descriptor,
            timing: &timing,
            body,
        };
        let mut out = Vec::new();
        let mut renderer = JsonRenderer;
        renderer.begin(&mut out, &descriptor).unwrap();
        assert!(out.is_empty());
        renderer.finish(&mut out, &report).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn success_document() {
        let doc = render(ReportBody::Returned(format_value(&String::from("Hello!"))));
        assert_eq!(doc["target"], "Text");
        assert_eq!(doc["method"], "concat");
        assert_eq!(doc["signature"], "Text.concat(&str a = \"Hello\", char b = '!')");
        assert_eq!(doc["arguments"][0]["type"], "&str");
        assert_eq!(doc["arguments"][1]["value"], "'!'");
        assert_eq!(doc["elapsed_ms"], 1.5);
        assert_eq!(doc["outcome"]["status"], "success");
        assert_eq!(doc["outcome"]["result"]["display"], "Hello!");
        assert_eq!(doc["outcome"]["result"]["type"], "String");
    }

    #[test]
    fn void_document_has_no_result() {
        let doc = render(ReportBody::Void);
        assert_eq!(doc["outcome"]["status"], "success");
        assert!(doc["outcome"].get("result").is_none());
    }

    #[test]
    fn failure_document_caps_trace() {
        let chain = ErrorChain::new("outer", "Outer")
            .with_cause(ErrorChain::new("inner", "Inner"))
            .with_trace(["a", "b", "c", "d"]);
        let doc = render(ReportBody::Failed(&chain));
        let error = &doc["outcome"]["error"];
        assert_eq!(doc["outcome"]["status"], "failure");
        assert_eq!(error["message"], "outer");
        assert_eq!(error["cause"]["type"], "Inner");
        assert_eq!(error["trace"].as_array().map(Vec::len), Some(3));
    }
}
