//! Call descriptors: who is being called, with what.
//!
//! A [`CallDescriptor`] is captured at the call site, normally through
//! [`call!`](crate::call) or [`try_call!`](crate::try_call), and travels
//! with the deferred call as an [`Invocation`].
//!
//! # Key responsibilities
//! - Resolve target and method names from a call path or a receiver type.
//! - Snapshot each argument into an [`ArgumentValue`] without running the
//!   call itself.
//! - Degrade to `Unknown.Unknown()` instead of failing when the call shape
//!   is not recognised.

use std::borrow::Cow;
use std::fmt;

use crate::inspector::{format_value, short_type_name, Formatter, Inspect, Shape, OBJECT_TYPE_NAME};
use crate::runtime::invoker::guarded;
use crate::runtime::result::ErrorChain;

/// Name used for target and method when the call shape is not recognised.
pub const UNKNOWN: &str = "Unknown";

/// Parameter name used when the caller did not name the argument.
pub const PARAM_PLACEHOLDER: &str = "param";

/// Recorded in place of an argument whose evaluation panicked.
pub const UNEVALUATED_MARKER: &str = "?";

/// The deferred call: runs the function with its arguments already bound.
pub type Call<'a, T> = Box<dyn FnOnce() -> Result<T, ErrorChain> + 'a>;

/// How an argument is rendered in the signature line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentForm {
    Null,
    Text(String),
    Char(char),
    /// The value's generic text form; `None` renders as null.
    Plain(Option<String>),
}

/// Snapshot of one argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentValue {
    /// Runtime type name; `None` for null.
    pub type_name: Option<String>,
    pub form: ArgumentForm,
}

impl ArgumentValue {
    pub fn capture<V: Inspect + ?Sized>(value: &V) -> Self {
        let form = match value.shape() {
            Shape::Null => ArgumentForm::Null,
            Shape::Text(text) => ArgumentForm::Text(text.to_owned()),
            Shape::Char(c) => ArgumentForm::Char(c),
            Shape::Sequence { .. } | Shape::Collection(_) | Shape::Plain => {
                ArgumentForm::Plain(value.text())
            }
        };
        Self {
            type_name: value.type_name().map(Cow::into_owned),
            form,
        }
    }

    /// The `"?"` marker for an argument that could not be evaluated.
    pub fn unevaluated() -> Self {
        Self::capture(UNEVALUATED_MARKER)
    }

    /// Type name shown in the signature; `object` when the value is null.
    pub fn type_label(&self) -> &str {
        self.type_name.as_deref().unwrap_or(OBJECT_TYPE_NAME)
    }
}

/// A named argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub value: ArgumentValue,
}

/// Structured metadata describing one invocation.
///
/// Parameter names and argument values are stored pairwise, so both lists
/// always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    target: String,
    method: String,
    arguments: Vec<Argument>,
}

impl CallDescriptor {
    pub fn builder(target: impl Into<String>, method: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            descriptor: CallDescriptor {
                target: target.into(),
                method: method.into(),
                arguments: Vec::new(),
            },
        }
    }

    /// Descriptor for a call that is not a single direct call.
    pub fn unknown() -> Self {
        Self::builder(UNKNOWN, UNKNOWN).build()
    }

    /// Start a descriptor from a call path such as `Calculator::add`.
    ///
    /// The last segment is the method and the one before it the target. A
    /// bare function name is attributed to the innermost module of
    /// `module_path`.
    pub fn for_path(path: &str, module_path: &str) -> DescriptorBuilder {
        let segments: Vec<&str> = path
            .split("::")
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Self::builder(UNKNOWN, UNKNOWN),
            [method] => Self::builder(last_segment(module_path), *method),
            [.., target, method] => Self::builder(*target, *method),
        }
    }

    /// Start a descriptor for a method called on a receiver of the given type.
    pub fn for_receiver(receiver_type: &str, method: &str) -> DescriptorBuilder {
        let short = short_type_name(receiver_type);
        let target = short.trim_start_matches('&').trim_start_matches("mut ");
        Self::builder(target, method)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|arg| arg.name.as_str())
    }

    pub fn argument_values(&self) -> impl Iterator<Item = &ArgumentValue> {
        self.arguments.iter().map(|arg| &arg.value)
    }

    pub fn is_unknown(&self) -> bool {
        self.target == UNKNOWN && self.method == UNKNOWN && self.arguments.is_empty()
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.method)
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Incrementally builds a [`CallDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor: CallDescriptor,
}

impl DescriptorBuilder {
    /// Record an argument value. An empty name becomes the `param` placeholder.
    #[must_use]
    pub fn argument<V: Inspect + ?Sized>(self, name: &str, value: &V) -> Self {
        self.push(name, ArgumentValue::capture(value))
    }

    /// Record an argument produced by [`evaluate`]: its value, or the `"?"`
    /// marker when evaluation panicked.
    #[must_use]
    pub fn evaluated<V: Inspect>(self, name: &str, value: &Result<V, ErrorChain>) -> Self {
        let captured = match value {
            Ok(value) => ArgumentValue::capture(value),
            Err(_) => ArgumentValue::unevaluated(),
        };
        self.push(name, captured)
    }

    /// Record an argument already captured at the call site.
    #[must_use]
    pub fn captured(self, name: &str, value: ArgumentValue) -> Self {
        self.push(name, value)
    }

    fn push(mut self, name: &str, value: ArgumentValue) -> Self {
        let name = if name.is_empty() {
            PARAM_PLACEHOLDER
        } else {
            name
        };
        self.descriptor.arguments.push(Argument {
            name: name.to_owned(),
            value,
        });
        self
    }

    pub fn build(self) -> CallDescriptor {
        self.descriptor
    }
}

/// Evaluate one argument expression, capturing a panic instead of unwinding
/// through descriptor construction.
pub fn evaluate<T>(argument: impl FnOnce() -> T) -> Result<T, ErrorChain> {
    guarded(argument)
}

/// One deferred call, its descriptor, and how to format what it returns.
pub struct Invocation<'a, T> {
    descriptor: CallDescriptor,
    call: Call<'a, T>,
    format: Formatter<T>,
}

impl<'a, T: Inspect> Invocation<'a, T> {
    pub fn new(
        descriptor: CallDescriptor,
        call: impl FnOnce() -> Result<T, ErrorChain> + 'a,
    ) -> Self {
        Self::with_formatter(descriptor, call, format_value::<T>)
    }

    /// A call whose shape could not be described.
    pub fn opaque(call: impl FnOnce() -> Result<T, ErrorChain> + 'a) -> Self {
        Self::new(CallDescriptor::unknown(), call)
    }
}

impl<'a, T> Invocation<'a, T> {
    /// An invocation whose result is rendered by `format`, for result types
    /// that do not implement [`Inspect`].
    pub fn with_formatter(
        descriptor: CallDescriptor,
        call: impl FnOnce() -> Result<T, ErrorChain> + 'a,
        format: Formatter<T>,
    ) -> Self {
        Self {
            descriptor,
            call: Box::new(call),
            format,
        }
    }

    pub fn descriptor(&self) -> &CallDescriptor {
        &self.descriptor
    }

    pub fn into_parts(self) -> (CallDescriptor, Call<'a, T>, Formatter<T>) {
        (self.descriptor, self.call, self.format)
    }
}

impl<T> fmt::Debug for Invocation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}
