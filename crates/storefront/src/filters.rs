//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Names for the hex colors used by the catalog.
const COLOR_NAMES: [(&str, &str); 14] = [
    ("#000000", "Black"),
    ("#0000FF", "Blue"),
    ("#808080", "Gray"),
    ("#87CEEB", "Sky Blue"),
    ("#87CEFA", "Light Sky Blue"),
    ("#8B4513", "Saddle Brown"),
    ("#A52A2A", "Brown"),
    ("#C0C0C0", "Silver"),
    ("#F5F5DC", "Beige"),
    ("#FF0000", "Red"),
    ("#FF5500", "Orange"),
    ("#FFC0CB", "Pink"),
    ("#FFD700", "Gold"),
    ("#FFFFFF", "White"),
];

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Human name for a hex color, or the hex code itself when unknown.
///
/// Usage in templates: `{{ color|color_name }}`
#[askama::filter_fn]
pub fn color_name(hex: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(name_for(&hex.to_string()))
}

/// CSS classes for a color swatch, e.g. `swatch swatch--ffffff`.
///
/// Swatches are styled by class since the CSP forbids inline styles.
///
/// Usage in templates: `{{ color|swatch_class }}`
#[askama::filter_fn]
pub fn swatch_class(hex: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(class_for(&hex.to_string()))
}

fn name_for(hex: &str) -> String {
    COLOR_NAMES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(hex))
        .map_or_else(|| hex.to_string(), |(_, name)| (*name).to_string())
}

fn class_for(hex: &str) -> String {
    let suffix: String = hex
        .trim_start_matches('#')
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("swatch swatch--{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names() {
        assert_eq!(name_for("#FFFFFF"), "White");
        assert_eq!(name_for("#ffd700"), "Gold");
        assert_eq!(name_for("#123456"), "#123456");
    }

    #[test]
    fn test_swatch_class() {
        assert_eq!(class_for("#87CEEB"), "swatch swatch--87ceeb");
        assert_eq!(class_for("#FF\"00"), "swatch swatch--ff00");
    }
}
