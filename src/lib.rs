//! Run a single function call and print a structured report of it.
//!
//! The report shows the call signature with every argument, then either the
//! elapsed time and the formatted result, or the captured failure with its
//! nested cause and the first lines of its trace.
//!
//! ```
//! use callscope::{call, Lab};
//!
//! fn greet(name: &str) -> String {
//!     format!("Hello {name}")
//! }
//!
//! let mut lab = Lab::new(Vec::new());
//! let greeting = lab.run(call!(greet(name = "World")));
//! assert_eq!(greeting.as_deref(), Some("Hello World"));
//! ```

#[macro_use]
mod macros;

pub mod cli;
pub mod config;
pub mod error;
pub mod inspector;
pub mod report;
pub mod runtime;
pub mod teasers;

pub use config::{ColorChoice, LabConfig, ReportFormat};
pub use error::{LabError, Result};
pub use inspector::{format_argument, format_value, Debugged, FormattedValue, Inspect, Shown};
pub use runtime::{CallDescriptor, ErrorChain, Invocation, Lab};

/// Run a value-producing call, reporting to stdout.
pub fn run<T>(invocation: Invocation<'_, T>) -> Option<T> {
    Lab::stdout().run(invocation)
}

/// Run a call that produces no value, reporting to stdout.
pub fn run_void(invocation: Invocation<'_, ()>) {
    Lab::stdout().run_void(invocation);
}
