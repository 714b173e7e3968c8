//! Bounded, human-readable renderings of values and arguments.

use itertools::Itertools;
use serde::Serialize;

use super::value::{text_or_null, Inspect, Items, Shape};
use crate::runtime::descriptor::{ArgumentForm, ArgumentValue};

/// Non-array collections show at most this many elements before `...`.
pub const COLLECTION_DISPLAY_LIMIT: usize = 10;

pub const NULL_TEXT: &str = "null";
pub const OBJECT_TYPE_NAME: &str = "object";
pub const ELLIPSIS: &str = "...";

/// A value's display form paired with its type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedValue {
    pub display: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Format a produced value for the result line.
///
/// A null value carries no runtime type, so the declared type of `T` is
/// reported instead.
pub fn format_value<T: Inspect>(value: &T) -> FormattedValue {
    FormattedValue {
        display: display(value),
        type_name: value
            .type_name()
            .unwrap_or_else(T::declared_type_name)
            .into_owned(),
    }
}

/// Display form of a value: null, full array with its length, bounded
/// collection, or the value's own text form.
pub fn display<T: Inspect + ?Sized>(value: &T) -> String {
    match value.shape() {
        Shape::Null => NULL_TEXT.to_owned(),
        Shape::Sequence { len, items } => {
            format!("[{}] (Length: {len})", items.map(or_null).join(", "))
        }
        Shape::Collection(items) => collection_text(items),
        Shape::Text(_) | Shape::Char(_) | Shape::Plain => text_or_null(value),
    }
}

/// Format a captured argument for the signature line.
pub fn format_argument(value: &ArgumentValue) -> String {
    match &value.form {
        ArgumentForm::Null => NULL_TEXT.to_owned(),
        ArgumentForm::Text(text) => format!("\"{text}\""),
        ArgumentForm::Char(c) => format!("'{c}'"),
        ArgumentForm::Plain(text) => or_null(text.clone()),
    }
}

/// Render at most [`COLLECTION_DISPLAY_LIMIT`] elements, then `...` if more
/// remain. Never pulls more than one element past the limit.
pub(crate) fn collection_text(items: Items<'_>) -> String {
    let mut rendered: Vec<String> = items
        .take(COLLECTION_DISPLAY_LIMIT + 1)
        .map(or_null)
        .collect();
    if rendered.len() > COLLECTION_DISPLAY_LIMIT {
        rendered.truncate(COLLECTION_DISPLAY_LIMIT);
        rendered.push(ELLIPSIS.to_owned());
    }
    format!("[{}]", rendered.join(", "))
}

fn or_null(text: Option<String>) -> String {
    text.unwrap_or_else(|| NULL_TEXT.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;

    #[test]
    fn null_uses_declared_type() {
        let formatted = format_value(&None::<String>);
        assert_eq!(formatted.display, "null");
        assert_eq!(formatted.type_name, "String");
    }

    #[test]
    fn text_and_chars_are_unquoted_in_results() {
        assert_eq!(format_value(&"Hello World".to_string()).display, "Hello World");
        assert_eq!(format_value(&'A').display, "A");
    }

    #[test]
    fn arrays_show_every_element_and_length() {
        let formatted = format_value(&[1, 2, 3]);
        assert_eq!(formatted.display, "[1, 2, 3] (Length: 3)");
        assert_eq!(formatted.type_name, "i32[]");

        let long: [u8; 12] = [7; 12];
        assert!(display(&long).ends_with("7, 7] (Length: 12)"));
        assert!(!display(&long).contains(ELLIPSIS));
    }

    #[test]
    fn arrays_render_null_elements() {
        let formatted = format_value(&[Some(1), None]);
        assert_eq!(formatted.display, "[1, null] (Length: 2)");
    }

    #[test]
    fn collections_stop_after_ten_elements() {
        let ten: Vec<u32> = (1..=10).collect();
        assert_eq!(display(&ten), "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]");

        let eleven: Vec<u32> = (1..=11).collect();
        assert_eq!(display(&eleven), "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, ...]");

        let deque: VecDeque<&str> = ["a", "b", "c"].into_iter().collect();
        let formatted = format_value(&deque);
        assert_eq!(formatted.display, "[a, b, c]");
        assert_eq!(formatted.type_name, "VecDeque");
    }

    #[test]
    fn collections_never_materialize_past_the_limit() {
        let pulled = Cell::new(0usize);
        let items: Items<'_> = Box::new((0..1_000).map(|n| {
            pulled.set(pulled.get() + 1);
            Some(n.to_string())
        }));
        let text = collection_text(items);
        assert!(text.ends_with(", ...]"));
        assert_eq!(pulled.get(), COLLECTION_DISPLAY_LIMIT + 1);
    }

    #[test]
    fn arguments_quote_text_and_chars() {
        assert_eq!(format_argument(&ArgumentValue::capture("test")), "\"test\"");
        assert_eq!(format_argument(&ArgumentValue::capture(&'A')), "'A'");
        assert_eq!(format_argument(&ArgumentValue::capture(&true)), "true");
        assert_eq!(format_argument(&ArgumentValue::capture(&None::<i32>)), "null");
        assert_eq!(format_argument(&ArgumentValue::capture(&42)), "42");
    }

    #[test]
    fn text_is_not_escaped() {
        let quoted = ArgumentValue::capture("say \"hi\"");
        assert_eq!(format_argument(&quoted), "\"say \"hi\"\"");
    }
}
