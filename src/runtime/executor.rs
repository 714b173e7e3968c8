use std::io::{self, Stdout, Write};

use tracing::{error, info};

use crate::config::LabConfig;
use crate::report::{Render, Report, ReportBody};
use crate::runtime::descriptor::Invocation;
use crate::runtime::invoker::{execute, Arity};
use crate::runtime::result::{Outcome, Produced};
use crate::{LabError, Result};

/// Runs single calls and writes a report for each one to its sink.
///
/// Every run completes and writes a full report; failures of the wrapped
/// call are reported, never propagated. The sink is not synchronised, so
/// callers sharing one stream between threads must serialise runs
/// themselves.
pub struct Lab<W: Write = Stdout> {
    sink: W,
    config: LabConfig,
}

impl Lab<Stdout> {
    /// A lab that reports to stdout, colouring output when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::with_config(io::stdout(), LabConfig::detect())
    }
}

impl<W: Write> Lab<W> {
    /// A lab with plain text output.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, LabConfig::plain())
    }

    pub fn with_config(sink: W, config: LabConfig) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Run a value-producing call. Returns `None` when the call failed.
    pub fn run<T>(&mut self, invocation: Invocation<'_, T>) -> Option<T> {
        self.run_with(invocation, Arity::Value)
    }

    /// Run a call that produces no value.
    pub fn run_void(&mut self, invocation: Invocation<'_, ()>) {
        self.run_with(invocation, Arity::Void);
    }

    #[tracing::instrument(
        skip_all,
        fields(
            call_target = invocation.descriptor().target(),
            call_method = invocation.descriptor().method(),
        )
    )]
    fn run_with<T>(&mut self, invocation: Invocation<'_, T>, arity: Arity) -> Option<T> {
        info!("Running call: {}", invocation.descriptor());

        let (descriptor, call, format) = invocation.into_parts();
        let mut renderer = self.config.renderer();

        self.emit(|out| renderer.begin(out, &descriptor));

        let execution = execute(call, arity);

        {
            let body = match &execution.outcome {
                Outcome::Success(Produced::Value(value)) => ReportBody::Returned(format(value)),
                Outcome::Success(Produced::NoValue) => ReportBody::Void,
                Outcome::Failure(chain) => ReportBody::Failed(chain),
            };
            let report = Report {
                descriptor: &descriptor,
                timing: &execution.timing,
                body,
            };
            self.emit(|out| renderer.finish(out, &report));
        }

        execution.outcome.into_value()
    }

    /// Write part of a report and flush it. Sink failures are logged rather
    /// than aborting the run.
    fn emit(&mut self, write: impl FnOnce(&mut dyn Write) -> Result<()>) {
        let result = write(&mut self.sink).and_then(|()| self.sink.flush().map_err(LabError::from));
        if let Err(err) = result {
            error!("{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::descriptor::CallDescriptor;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failures_do_not_lose_the_value() {
        let mut lab = Lab::new(FailingSink);
        let value = lab.run(Invocation::new(CallDescriptor::unknown(), || Ok(9)));
        assert_eq!(value, Some(9));
    }

    #[test]
    fn header_is_written_before_the_call_runs() {
        let mut lab = Lab::new(Vec::new());
        let mut seen = 0;
        lab.run_void(Invocation::new(
            CallDescriptor::builder("Probe", "look").build(),
            || {
                seen += 1;
                Ok(())
            },
        ));
        assert_eq!(seen, 1);
        let report = String::from_utf8(lab.into_sink()).unwrap();
        let header = report.find("Probe.look()").unwrap();
        let executing = report.find("Executing...").unwrap();
        let result = report.find("Result: void").unwrap();
        assert!(header < executing && executing < result);
    }
}
