//! Literal construction of style maps.

/// Builds a [`StyleMap`](crate::types::StyleMap) from `key => value` pairs.
///
/// Values may be anything convertible into a
/// [`StyleValue`](crate::types::StyleValue): string slices, `String`s,
/// `i32` or `f64`.
///
/// # Example
///
/// ```
/// use cascade::style_map;
///
/// let styles = style_map! { "display" => "flex", "gap" => 8 };
/// assert_eq!(styles.to_string(), "display: flex; gap: 8");
/// ```
#[macro_export]
macro_rules! style_map {
    () => {
        $crate::types::StyleMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::types::StyleMap::new();
        $( map.insert($key, $value); )+
        map
    }};
}
