//! Call-site capture macros.
//!
//! ```
//! use callscope::{call, Lab};
//!
//! struct Calculator;
//! impl Calculator {
//!     fn add(a: i32, b: i32) -> i32 {
//!         a + b
//!     }
//! }
//!
//! let mut lab = Lab::new(Vec::new());
//! assert_eq!(lab.run(call!(Calculator::add(a = 10, b = 20))), Some(30));
//! let report = String::from_utf8(lab.into_sink()).unwrap();
//! assert!(report.contains("Calculator.add(i32 a = 10, i32 b = 20)"));
//! ```

/// Capture a call as an [`Invocation`](crate::Invocation).
///
/// Accepted shapes:
/// - `call!(Type::method(a = 1, b = 2))` or `call!(module::function(1, 2))`
/// - `call!(receiver.method(x = 3))`
/// - any other expression, described as `Unknown.Unknown()`
///
/// Named arguments keep their name in the report; positional ones are shown
/// as `param`. Every argument expression is evaluated exactly once, before
/// the call runs.
///
/// Arguments and results are rendered through [`Inspect`](crate::Inspect)
/// when their type implements it, through `Display` otherwise, and as
/// `<TypeName>` as a last resort.
#[macro_export]
macro_rules! call {
    ($receiver:ident . $method:ident ( $($args:tt)* )) => {
        $crate::__call_args!(value [receiver $receiver $method] [] $($args)*)
    };
    ($($segment:ident)::+ ( $($args:tt)* )) => {
        $crate::__call_args!(value [path $($segment)::+] [] $($args)*)
    };
    ($call:expr) => {
        $crate::__invocation!(value [opaque] $call)
    };
}

/// Like [`call!`], for calls returning `Result<T, E>`.
///
/// An `Err` becomes the reported failure. `E` must convert into
/// `Box<dyn Error + Send + Sync>`.
#[macro_export]
macro_rules! try_call {
    ($receiver:ident . $method:ident ( $($args:tt)* )) => {
        $crate::__call_args!(fallible [receiver $receiver $method] [] $($args)*)
    };
    ($($segment:ident)::+ ( $($args:tt)* )) => {
        $crate::__call_args!(fallible [path $($segment)::+] [] $($args)*)
    };
    ($call:expr) => {
        $crate::__invocation!(fallible [opaque] $call)
    };
}

// Munches the argument list, giving each argument its own hygienic binding.
#[doc(hidden)]
#[macro_export]
macro_rules! __call_args {
    ($mode:ident $callee:tt [$($bound:tt)*]) => {
        $crate::__invocation!($mode $callee $($bound)*)
    };
    ($mode:ident $callee:tt [$($bound:tt)*] $name:ident = $arg:expr $(, $($rest:tt)*)?) => {
        $crate::__call_args!(
            $mode $callee [$($bound)* (__arg, ::core::stringify!($name), $arg)] $($($rest)*)?
        )
    };
    ($mode:ident $callee:tt [$($bound:tt)*] $arg:expr $(, $($rest:tt)*)?) => {
        $crate::__call_args!(
            $mode $callee
            [$($bound)* (__arg, $crate::runtime::descriptor::PARAM_PLACEHOLDER, $arg)]
            $($($rest)*)?
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __invocation {
    ($mode:ident [path $($segment:ident)::+] $(($bind:ident, $label:expr, $arg:expr))*) => {{
        #[allow(unused_imports)]
        use $crate::inspector::fallback::{DisplayKind as _, InspectKind as _, OpaqueKind as _};
        let ($($bind,)*) = ($($crate::runtime::descriptor::evaluate(|| $arg),)*);
        let descriptor = $crate::CallDescriptor::for_path(
            ::core::stringify!($($segment)::+),
            ::core::module_path!(),
        )
        $(.captured($label, (&&&$crate::inspector::fallback::ArgumentCapture(&$bind)).resolve()))*
        .build();
        let call = move || -> ::core::result::Result<_, $crate::ErrorChain> {
            $(let $bind = $bind?;)*
            $crate::__finish!($mode $($segment)::+($($bind),*))
        };
        $crate::__with_formatter!(descriptor, call)
    }};
    ($mode:ident [receiver $receiver:ident $method:ident] $(($bind:ident, $label:expr, $arg:expr))*) => {{
        #[allow(unused_imports)]
        use $crate::inspector::fallback::{DisplayKind as _, InspectKind as _, OpaqueKind as _};
        let ($($bind,)*) = ($($crate::runtime::descriptor::evaluate(|| $arg),)*);
        let descriptor = $crate::CallDescriptor::for_receiver(
            ::core::any::type_name_of_val(&$receiver),
            ::core::stringify!($method),
        )
        $(.captured($label, (&&&$crate::inspector::fallback::ArgumentCapture(&$bind)).resolve()))*
        .build();
        let call = || -> ::core::result::Result<_, $crate::ErrorChain> {
            $(let $bind = $bind?;)*
            $crate::__finish!($mode $receiver.$method($($bind),*))
        };
        $crate::__with_formatter!(descriptor, call)
    }};
    ($mode:ident [opaque] $call:expr) => {{
        #[allow(unused_imports)]
        use $crate::inspector::fallback::{DisplayKind as _, InspectKind as _, OpaqueKind as _};
        let call = || -> ::core::result::Result<_, $crate::ErrorChain> {
            $crate::__finish!($mode $call)
        };
        $crate::__with_formatter!($crate::CallDescriptor::unknown(), call)
    }};
}

// Pairs a deferred call with the formatter for its result type.
#[doc(hidden)]
#[macro_export]
macro_rules! __with_formatter {
    ($descriptor:expr, $call:ident) => {{
        let format = (&&&$crate::inspector::fallback::result_format(&$call)).resolve();
        $crate::Invocation::with_formatter($descriptor, $call, format)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __finish {
    (value $call:expr) => {
        ::core::result::Result::Ok($call)
    };
    (fallible $call:expr) => {
        ($call).map_err($crate::ErrorChain::from_error)
    };
}

/// Implement [`Inspect`](crate::Inspect) for types with a
/// [`Display`](std::fmt::Display) form, named after the type as written.
#[macro_export]
macro_rules! inspect_display {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Inspect for $ty {
            fn type_name(&self) -> ::core::option::Option<::std::borrow::Cow<'static, str>> {
                ::core::option::Option::Some(::std::borrow::Cow::Borrowed(::core::stringify!($ty)))
            }

            fn text(&self) -> ::core::option::Option<::std::string::String> {
                ::core::option::Option::Some(::std::string::ToString::to_string(self))
            }

            fn declared_type_name() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(::core::stringify!($ty))
            }
        }
    )+};
}
