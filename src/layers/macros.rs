//! Macros to reduce boilerplate in layer implementations

/// Formats a string, passing every interpolated value through an escaping function first.
///
/// The literal parts of the template are trusted; everything interpolated is not.
///
/// ```rust
/// use osmview::{core::escape::escape_xml, escaped_format};
///
/// let label = "<b>";
/// assert_eq!(
///     escaped_format!(escape_xml, "<text>{}</text>", label),
///     "<text>&lt;b></text>"
/// );
/// ```
#[macro_export]
macro_rules! escaped_format {
    ($escape:path, $template:literal $(, $arg:expr)* $(,)?) => {
        format!($template $(, $escape(&($arg).to_string()))*)
    };
}

/// Implements the visibility accessors of `LayerOperations` on a `bool` field
///
/// Usage:
/// ```rust,ignore
/// impl LayerOperations for MyLayer {
///     impl_layer_visibility!(visible);
///     fn key(&self) -> LayerKey { LayerKey::Crosshair }
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_visibility {
    ($visible_field:ident) => {
        fn is_visible(&self) -> bool {
            self.$visible_field
        }

        fn set_visible(&mut self, visible: bool) {
            self.$visible_field = visible;
        }
    };
}
