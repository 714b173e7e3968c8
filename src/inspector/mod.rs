//! Value inspection for call reports.
//!
//! Sub-modules:
//! - [`value`]  the [`Inspect`] capability and its implementations.
//! - [`format`] bounded display forms for results and arguments.
//! - [`fallback`] call-site formatting for types without [`Inspect`].

pub mod fallback;
pub mod format;
pub mod value;

pub use format::{
    display, format_argument, format_value, FormattedValue, COLLECTION_DISPLAY_LIMIT, NULL_TEXT,
    OBJECT_TYPE_NAME,
};
pub use fallback::Formatter;
pub use value::{short_type_name, Debugged, Inspect, Items, Shape, Shown};
