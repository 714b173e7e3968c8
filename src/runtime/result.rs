//! Result types for a single wrapped call.
//!
//! This module defines what the invoker hands to the renderer: the tagged
//! [`Outcome`] of the call, the [`ErrorChain`] captured when it fails, and
//! the [`Timing`] measured around it.

use std::any::Any;
use std::error::Error;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::inspector::short_type_name;

/// Only this many trace lines are ever rendered.
pub const TRACE_LINE_LIMIT: usize = 3;

/// Type name reported for panics.
pub const PANIC_TYPE_NAME: &str = "panic";

/// A captured failure: message, type, at most one nested cause, and trace lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorChain {
    pub message: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorChain>>,
    pub trace: Vec<String>,
}

impl ErrorChain {
    pub fn new(message: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            type_name: type_name.into(),
            cause: None,
            trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: ErrorChain) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attach trace lines, trimmed; blank lines are dropped.
    #[must_use]
    pub fn with_trace<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.trace = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect();
        self
    }

    /// Capture an error value returned by a fallible call.
    ///
    /// The type name comes from `E` itself. Only the first `source()` is
    /// kept; deeper causes are not traversed.
    pub fn from_error<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        let declared = short_type_name(std::any::type_name::<E>());
        let boxed: Box<dyn Error + Send + Sync> = err.into();
        let type_name = if declared.starts_with("Box<dyn") {
            debug_type_name(boxed.as_ref())
        } else {
            declared
        };

        let chain = Self::new(boxed.to_string(), type_name);
        match boxed.source() {
            Some(source) => chain.with_cause(Self::new(source.to_string(), debug_type_name(source))),
            None => chain,
        }
    }

    /// Capture a panic payload together with the trace recorded by the panic hook.
    pub fn from_panic(payload: Box<dyn Any + Send>, trace: Vec<String>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_owned()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "Box<dyn Any>".to_owned()
        };
        Self::new(message, PANIC_TYPE_NAME).with_trace(trace)
    }

    /// The trace lines a report shows.
    pub fn rendered_trace(&self) -> &[String] {
        &self.trace[..self.trace.len().min(TRACE_LINE_LIMIT)]
    }
}

impl std::fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.type_name)
    }
}

/// Name an error known only as `dyn Error`.
///
/// Common std errors are recognised by downcasting. Anything else is named
/// by the leading identifier of its `Debug` form: the type name for derived
/// structs, but the variant name for derived enums (`Empty` rather than
/// `PartsError`), and `Error` when that form does not start with a type-like
/// identifier.
fn debug_type_name(err: &(dyn Error + 'static)) -> String {
    if let Some(name) = std_error_name(err) {
        return name.to_owned();
    }
    let debug = format!("{err:?}");
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        name
    } else {
        "Error".to_owned()
    }
}

fn std_error_name(err: &(dyn Error + 'static)) -> Option<&'static str> {
    macro_rules! known {
        ($($ty:ty => $name:literal),* $(,)?) => {
            $(if err.is::<$ty>() {
                return Some($name);
            })*
        };
    }

    known!(
        std::io::Error => "io::Error",
        std::fmt::Error => "fmt::Error",
        std::num::ParseIntError => "ParseIntError",
        std::num::ParseFloatError => "ParseFloatError",
        std::num::TryFromIntError => "TryFromIntError",
        std::str::ParseBoolError => "ParseBoolError",
        std::str::Utf8Error => "Utf8Error",
        std::string::FromUtf8Error => "FromUtf8Error",
        std::char::ParseCharError => "ParseCharError",
        std::net::AddrParseError => "AddrParseError",
    );
    None
}

/// What a successful call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Produced<T> {
    Value(T),
    /// The call has no result; distinct from a null value.
    NoValue,
}

/// The tagged result of attempting one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(Produced<T>),
    Failure(ErrorChain),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn error(&self) -> Option<&ErrorChain> {
        match self {
            Outcome::Failure(err) => Some(err),
            Outcome::Success(_) => None,
        }
    }

    /// The produced value; `None` for void calls and failures.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(Produced::Value(value)) => Some(value),
            Outcome::Success(Produced::NoValue) | Outcome::Failure(_) => None,
        }
    }
}

/// Wall-clock start and monotonic elapsed time of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}

impl Timing {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1_000_000.0
    }
}

/// Outcome and timing of one execution.
#[derive(Debug)]
pub struct Execution<T> {
    pub outcome: Outcome<T>,
    pub timing: Timing,
}
