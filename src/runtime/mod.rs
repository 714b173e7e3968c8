//! Runtime sub-system: describing, invoking and reporting one call.
//!
//! Sub-modules:
//! - [`descriptor`] Call descriptors and deferred invocations.
//! - [`executor`]   Public facade; runs an invocation and writes its report.
//! - [`invoker`]    Panic-guarded, timed single invocation.
//! - [`result`]     Outcome, error chain and timing types.

pub mod descriptor;
pub mod executor;
pub mod invoker;
pub mod result;

pub use descriptor::{
    Argument, ArgumentForm, ArgumentValue, CallDescriptor, DescriptorBuilder, Invocation,
};
pub use executor::Lab;
pub use invoker::{execute, Arity};
pub use result::{ErrorChain, Execution, Outcome, Produced, Timing};
