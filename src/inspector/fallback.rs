//! Formatting for values whose type may not implement [`Inspect`].
//!
//! [`call!`](crate::call) and [`try_call!`](crate::try_call) pick a strategy
//! per argument and per result type at the call site, through method
//! resolution on `&&&` receivers:
//!
//! 1. [`InspectKind`]: the type implements [`Inspect`].
//! 2. [`DisplayKind`]: the type implements [`fmt::Display`]; its display
//!    form is the text.
//! 3. [`OpaqueKind`]: anything else; the text is `<TypeName>`.
//!
//! The earliest level whose bound holds wins. The choice is made where the
//! argument is evaluated, so an argument whose type is only fixed later by
//! the call itself (a bare `None`, an untyped literal) is resolved through
//! [`Inspect`].

use std::fmt;
use std::marker::PhantomData;

use super::format::{format_value, FormattedValue};
use super::value::{short_type_name, Inspect};
use crate::runtime::descriptor::{ArgumentForm, ArgumentValue};
use crate::runtime::result::ErrorChain;

/// Turns a value into its report form.
pub type Formatter<T> = fn(&T) -> FormattedValue;

/// An evaluated argument awaiting capture.
pub struct ArgumentCapture<'a, T>(pub &'a Result<T, ErrorChain>);

/// Selects the [`Formatter`] for a call's result type.
pub struct ResultFormat<T>(PhantomData<fn() -> T>);

/// The result format of the value a deferred call produces.
pub fn result_format<T, F>(_call: &F) -> ResultFormat<T>
where
    F: FnOnce() -> Result<T, ErrorChain>,
{
    ResultFormat(PhantomData)
}

pub trait InspectKind {
    type Output;
    fn resolve(self) -> Self::Output;
}

pub trait DisplayKind {
    type Output;
    fn resolve(self) -> Self::Output;
}

pub trait OpaqueKind {
    type Output;
    fn resolve(self) -> Self::Output;
}

impl<T: Inspect> InspectKind for &&&ArgumentCapture<'_, T> {
    type Output = ArgumentValue;

    fn resolve(self) -> ArgumentValue {
        match self.0 {
            Ok(value) => ArgumentValue::capture(value),
            Err(_) => ArgumentValue::unevaluated(),
        }
    }
}

impl<T: fmt::Display> DisplayKind for &&ArgumentCapture<'_, T> {
    type Output = ArgumentValue;

    fn resolve(self) -> ArgumentValue {
        match self.0 {
            Ok(value) => ArgumentValue {
                type_name: Some(plain_type_name::<T>()),
                form: ArgumentForm::Plain(Some(value.to_string())),
            },
            Err(_) => ArgumentValue::unevaluated(),
        }
    }
}

impl<T> OpaqueKind for &ArgumentCapture<'_, T> {
    type Output = ArgumentValue;

    fn resolve(self) -> ArgumentValue {
        match self.0 {
            Ok(_) => ArgumentValue {
                type_name: Some(plain_type_name::<T>()),
                form: ArgumentForm::Plain(Some(opaque_text::<T>())),
            },
            Err(_) => ArgumentValue::unevaluated(),
        }
    }
}

impl<T: Inspect> InspectKind for &&&ResultFormat<T> {
    type Output = Formatter<T>;

    fn resolve(self) -> Formatter<T> {
        format_value::<T>
    }
}

impl<T: fmt::Display> DisplayKind for &&ResultFormat<T> {
    type Output = Formatter<T>;

    fn resolve(self) -> Formatter<T> {
        format_display::<T>
    }
}

impl<T> OpaqueKind for &ResultFormat<T> {
    type Output = Formatter<T>;

    fn resolve(self) -> Formatter<T> {
        format_opaque::<T>
    }
}

fn format_display<T: fmt::Display>(value: &T) -> FormattedValue {
    FormattedValue {
        display: value.to_string(),
        type_name: plain_type_name::<T>(),
    }
}

fn format_opaque<T>(_value: &T) -> FormattedValue {
    FormattedValue {
        display: opaque_text::<T>(),
        type_name: plain_type_name::<T>(),
    }
}

fn plain_type_name<T>() -> String {
    short_type_name(std::any::type_name::<T>())
}

fn opaque_text<T>() -> String {
    format!("<{}>", plain_type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Meters(u32);

    impl fmt::Display for Meters {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}m", self.0)
        }
    }

    struct Handle;

    #[test]
    fn inspect_types_keep_their_own_form() {
        let evaluated: Result<&str, ErrorChain> = Ok("hi");
        let value = (&&&ArgumentCapture(&evaluated)).resolve();
        assert_eq!(value, ArgumentValue::capture("hi"));
    }

    #[test]
    fn display_types_use_their_display_form() {
        let evaluated = Ok(Meters(3));
        let value = (&&&ArgumentCapture(&evaluated)).resolve();
        assert_eq!(value.type_label(), "Meters");
        assert_eq!(value.form, ArgumentForm::Plain(Some("3m".to_owned())));
    }

    #[test]
    fn other_types_show_their_name() {
        let evaluated = Ok(Handle);
        let value = (&&&ArgumentCapture(&evaluated)).resolve();
        assert_eq!(value.type_label(), "Handle");
        assert_eq!(value.form, ArgumentForm::Plain(Some("<Handle>".to_owned())));
    }

    #[test]
    fn failed_arguments_are_unevaluated_at_every_level() {
        let evaluated: Result<Handle, ErrorChain> = Err(ErrorChain::new("boom", "panic"));
        let value = (&&&ArgumentCapture(&evaluated)).resolve();
        assert_eq!(value, ArgumentValue::unevaluated());
    }

    #[test]
    fn result_formatters_follow_the_same_order() {
        let inspect = (&&&result_format(&|| Ok::<_, ErrorChain>(vec![1u8, 2]))).resolve();
        assert_eq!(inspect(&vec![1, 2]).display, "[1, 2]");

        let display = (&&&result_format(&|| Ok::<_, ErrorChain>(Meters(9)))).resolve();
        let formatted = display(&Meters(9));
        assert_eq!((formatted.display.as_str(), formatted.type_name.as_str()), ("9m", "Meters"));

        let opaque = (&&&result_format(&|| Ok::<_, ErrorChain>(Handle))).resolve();
        assert_eq!(opaque(&Handle).display, "<Handle>");
    }
}
