//! The [`Inspect`] capability and its implementations for common types.
//!
//! A value describes itself to the formatter through three questions: what
//! is your runtime type name, what is your plain text form, and which
//! [`Shape`] should the formatter treat you as. The shape list is closed;
//! everything that is not null, text, a character or a sequence is
//! [`Shape::Plain`] and is rendered through its text form.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::format::collection_text;

/// Lazily produced element texts. `None` stands for a null element.
pub type Items<'a> = Box<dyn Iterator<Item = Option<String>> + 'a>;

/// How the formatter should treat a value.
pub enum Shape<'a> {
    /// No value at all.
    Null,
    /// A string. Quoted when it appears as an argument.
    Text(&'a str),
    /// A single character. Quoted when it appears as an argument.
    Char(char),
    /// A fixed-size indexable sequence; always rendered in full with its length.
    Sequence { len: usize, items: Items<'a> },
    /// Any other bulk collection; rendered with a bounded number of elements.
    Collection(Items<'a>),
    /// Everything else, rendered through [`Inspect::text`].
    Plain,
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Null => f.write_str("Null"),
            Shape::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Shape::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Shape::Sequence { len, .. } => f.debug_struct("Sequence").field("len", len).finish(),
            Shape::Collection(_) => f.write_str("Collection"),
            Shape::Plain => f.write_str("Plain"),
        }
    }
}

/// A value that can describe itself in a call report.
///
/// Types that already implement [`fmt::Display`] can opt in with
/// [`inspect_display!`](crate::inspect_display); foreign types can be
/// wrapped in [`Shown`] or [`Debugged`].
pub trait Inspect {
    /// Runtime type name, or `None` when the value is null.
    fn type_name(&self) -> Option<Cow<'static, str>>;

    /// Generic text form, or `None` when the value is null.
    fn text(&self) -> Option<String>;

    fn shape(&self) -> Shape<'_> {
        Shape::Plain
    }

    /// Name of the type as declared, used when a null value has no runtime type.
    fn declared_type_name() -> Cow<'static, str>
    where
        Self: Sized,
    {
        Cow::Owned(short_type_name(std::any::type_name::<Self>()))
    }
}

crate::inspect_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool,
);

impl Inspect for char {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("char"))
    }

    fn text(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Char(*self)
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }
}

impl Inspect for String {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("String"))
    }

    fn text(&self) -> Option<String> {
        Some(self.clone())
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }
}

impl Inspect for str {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("&str"))
    }

    fn text(&self) -> Option<String> {
        Some(self.to_owned())
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }
}

impl Inspect for Cow<'_, str> {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("Cow<str>"))
    }

    fn text(&self) -> Option<String> {
        Some(self.clone().into_owned())
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Borrowed("Cow<str>")
    }
}

impl Inspect for () {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("()"))
    }

    fn text(&self) -> Option<String> {
        Some("()".to_owned())
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Borrowed("()")
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        self.as_ref().and_then(Inspect::type_name)
    }

    fn text(&self) -> Option<String> {
        self.as_ref().and_then(Inspect::text)
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn declared_type_name() -> Cow<'static, str> {
        T::declared_type_name()
    }
}

impl<T: Inspect, E: fmt::Display> Inspect for Result<T, E> {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("Result"))
    }

    fn text(&self) -> Option<String> {
        Some(match self {
            Ok(value) => format!("Ok({})", text_or_null(value)),
            Err(err) => format!("Err({err})"),
        })
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Borrowed("Result")
    }
}

impl<A: Inspect, B: Inspect> Inspect for (A, B) {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Owned(format!(
            "({}, {})",
            type_or_object(&self.0),
            type_or_object(&self.1)
        )))
    }

    fn text(&self) -> Option<String> {
        Some(format!("({}, {})", text_or_null(&self.0), text_or_null(&self.1)))
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Owned(format!(
            "({}, {})",
            A::declared_type_name(),
            B::declared_type_name()
        ))
    }
}

impl<A: Inspect, B: Inspect, C: Inspect> Inspect for (A, B, C) {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Owned(format!(
            "({}, {}, {})",
            type_or_object(&self.0),
            type_or_object(&self.1),
            type_or_object(&self.2)
        )))
    }

    fn text(&self) -> Option<String> {
        Some(format!(
            "({}, {}, {})",
            text_or_null(&self.0),
            text_or_null(&self.1),
            text_or_null(&self.2)
        ))
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Owned(format!(
            "({}, {}, {})",
            A::declared_type_name(),
            B::declared_type_name(),
            C::declared_type_name()
        ))
    }
}

// ── sequences ────────────────────────────────────────────────────────────────

fn sequence_type_name<T: Inspect>() -> Cow<'static, str> {
    Cow::Owned(format!("{}[]", T::declared_type_name()))
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(sequence_type_name::<T>())
    }

    fn text(&self) -> Option<String> {
        Some(collection_text(Box::new(self.iter().map(Inspect::text))))
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence {
            len: N,
            items: Box::new(self.iter().map(Inspect::text)),
        }
    }

    fn declared_type_name() -> Cow<'static, str> {
        sequence_type_name::<T>()
    }
}

impl<T: Inspect> Inspect for [T] {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(sequence_type_name::<T>())
    }

    fn text(&self) -> Option<String> {
        Some(collection_text(Box::new(self.iter().map(Inspect::text))))
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence {
            len: self.len(),
            items: Box::new(self.iter().map(Inspect::text)),
        }
    }
}

macro_rules! inspect_collection {
    ($($collection:ident => $name:literal),* $(,)?) => {$(
        impl<T: Inspect> Inspect for $collection<T> {
            fn type_name(&self) -> Option<Cow<'static, str>> {
                Some(Cow::Borrowed($name))
            }

            fn text(&self) -> Option<String> {
                Some(collection_text(Box::new(self.iter().map(Inspect::text))))
            }

            fn shape(&self) -> Shape<'_> {
                Shape::Collection(Box::new(self.iter().map(Inspect::text)))
            }

            fn declared_type_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }
        }
    )*};
}

inspect_collection!(
    Vec => "Vec",
    VecDeque => "VecDeque",
    LinkedList => "LinkedList",
    HashSet => "HashSet",
    BTreeSet => "BTreeSet",
);

macro_rules! inspect_map {
    ($($map:ident => $name:literal),* $(,)?) => {$(
        impl<K: Inspect, V: Inspect> Inspect for $map<K, V> {
            fn type_name(&self) -> Option<Cow<'static, str>> {
                Some(Cow::Borrowed($name))
            }

            fn text(&self) -> Option<String> {
                Some(collection_text(Box::new(self.iter().map(entry_text))))
            }

            fn shape(&self) -> Shape<'_> {
                Shape::Collection(Box::new(self.iter().map(entry_text)))
            }

            fn declared_type_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }
        }
    )*};
}

inspect_map!(HashMap => "HashMap", BTreeMap => "BTreeMap");

fn entry_text<K: Inspect, V: Inspect>((key, value): (&K, &V)) -> Option<String> {
    Some(format!("({}, {})", text_or_null(key), text_or_null(value)))
}

// ── pointers ─────────────────────────────────────────────────────────────────

macro_rules! inspect_pointer {
    ($($pointer:ty),* $(,)?) => {$(
        impl<T: Inspect + ?Sized> Inspect for $pointer {
            fn type_name(&self) -> Option<Cow<'static, str>> {
                (**self).type_name()
            }

            fn text(&self) -> Option<String> {
                (**self).text()
            }

            fn shape(&self) -> Shape<'_> {
                (**self).shape()
            }
        }
    )*};
}

inspect_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

// ── fallbacks ────────────────────────────────────────────────────────────────

/// Inspect any [`fmt::Display`] value through its display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Shown<T>(pub T);

impl<T: fmt::Display> Inspect for Shown<T> {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Self::declared_type_name())
    }

    fn text(&self) -> Option<String> {
        Some(self.0.to_string())
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Owned(short_type_name(std::any::type_name::<T>()))
    }
}

/// Inspect any [`fmt::Debug`] value through its debug form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> Inspect for Debugged<T> {
    fn type_name(&self) -> Option<Cow<'static, str>> {
        Some(Self::declared_type_name())
    }

    fn text(&self) -> Option<String> {
        Some(format!("{:?}", self.0))
    }

    fn declared_type_name() -> Cow<'static, str> {
        Cow::Owned(short_type_name(std::any::type_name::<T>()))
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

pub(crate) fn text_or_null<T: Inspect + ?Sized>(value: &T) -> String {
    value.text().unwrap_or_else(|| super::format::NULL_TEXT.to_owned())
}

fn type_or_object<T: Inspect + ?Sized>(value: &T) -> Cow<'static, str> {
    value
        .type_name()
        .unwrap_or(Cow::Borrowed(super::format::OBJECT_TYPE_NAME))
}

/// Strip module paths from a fully qualified type name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            push_last_segment(&mut short, &segment);
            segment.clear();
            short.push(ch);
        }
    }
    push_last_segment(&mut short, &segment);
    short
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_type_name_strips_paths() {
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(
            short_type_name("core::num::error::ParseIntError"),
            "ParseIntError"
        );
        assert_eq!(
            short_type_name("alloc::boxed::Box<dyn core::error::Error + core::marker::Send>"),
            "Box<dyn Error + Send>"
        );
        assert_eq!(short_type_name("&mut demo::Counter"), "&mut Counter");
    }

    #[test]
    fn option_reports_inner_type_or_nothing() {
        assert_eq!(Some(5i64).type_name().as_deref(), Some("i64"));
        assert_eq!(None::<String>.type_name(), None);
        assert_eq!(Option::<String>::declared_type_name(), "String");
        assert!(matches!(None::<u8>.shape(), Shape::Null));
    }

    #[test]
    fn arrays_are_named_after_their_element_type() {
        assert_eq!([1, 2, 3].type_name().as_deref(), Some("i32[]"));
        let slice: &[bool] = &[true];
        assert_eq!(slice.type_name().as_deref(), Some("bool[]"));
        assert!(matches!([1u8; 4].shape(), Shape::Sequence { len: 4, .. }));
    }

    #[test]
    fn collections_are_named_by_base_name() {
        assert_eq!(vec!["a"].type_name().as_deref(), Some("Vec"));
        let map: BTreeMap<u8, char> = [(1, 'x')].into_iter().collect();
        assert_eq!(map.type_name().as_deref(), Some("BTreeMap"));
        assert_eq!(map.text().as_deref(), Some("[(1, x)]"));
    }

    #[test]
    fn pointers_delegate_to_the_pointee() {
        let boxed: Box<str> = "hi".into();
        assert_eq!(boxed.type_name().as_deref(), Some("&str"));
        assert!(matches!(Rc::new('c').shape(), Shape::Char('c')));
        assert_eq!(Arc::new(7u16).text().as_deref(), Some("7"));
    }

    #[test]
    fn fallback_wrappers_use_display_and_debug() {
        #[derive(Debug)]
        struct Point {
            x: i32,
        }

        let debugged = Debugged(Point { x: 1 });
        assert_eq!(debugged.text().as_deref(), Some("Point { x: 1 }"));
        assert_eq!(debugged.type_name().as_deref(), Some("Point"));

        let shown = Shown(std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(shown.text().as_deref(), Some("127.0.0.1"));
        assert_eq!(shown.type_name().as_deref(), Some("Ipv4Addr"));
    }

    #[test]
    fn results_render_their_variant() {
        let ok: Result<u8, String> = Ok(3);
        let err: Result<u8, String> = Err("boom".into());
        assert_eq!(ok.text().as_deref(), Some("Ok(3)"));
        assert_eq!(err.text().as_deref(), Some("Err(boom)"));
    }
}
