use callscope::inspector::{display, format_value, COLLECTION_DISPLAY_LIMIT};
use proptest::prelude::*;

proptest! {
    #[test]
    fn collections_show_at_most_the_limit(values in proptest::collection::vec(any::<i16>(), 0..40)) {
        let rendered = display(&values);
        let inner = rendered
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .expect("bracketed");
        let parts: Vec<&str> = if inner.is_empty() { Vec::new() } else { inner.split(", ").collect() };

        if values.len() > COLLECTION_DISPLAY_LIMIT {
            prop_assert_eq!(parts.len(), COLLECTION_DISPLAY_LIMIT + 1);
            prop_assert_eq!(parts[COLLECTION_DISPLAY_LIMIT], "...");
        } else {
            prop_assert_eq!(parts.len(), values.len());
        }
        for (part, value) in parts.iter().zip(&values).take(COLLECTION_DISPLAY_LIMIT) {
            prop_assert_eq!(*part, value.to_string());
        }
    }

    #[test]
    fn boxed_slices_are_never_truncated(values in proptest::collection::vec(any::<u8>(), 0..40)) {
        let boxed: Box<[u8]> = values.clone().into_boxed_slice();
        let formatted = format_value(&boxed);
        let suffix = format!(" (Length: {})", values.len());
        prop_assert!(formatted.display.ends_with(&suffix));
        prop_assert!(!formatted.display.contains("..."));
        prop_assert_eq!(formatted.type_name, "u8[]");
    }

    #[test]
    fn strings_render_verbatim(text in "[a-zA-Z0-9 ]{0,30}") {
        let formatted = format_value(&text);
        prop_assert_eq!(formatted.display, text);
        prop_assert_eq!(formatted.type_name, "String");
    }
}
