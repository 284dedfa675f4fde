//! Maps the service's loosely-keyed `data` object onto a `PreviewRecord`.

use serde_json::{Map, Value};

use crate::protocol::{PreviewRecord, NO_DESCRIPTION, NO_TITLE};
use crate::theme::ThemePolicy;

const TITLE_KEYS: &[&str] = &["og:title", "title"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const IMAGE_KEYS: &[&str] = &["image", "logo", "og:image"];
const LINK_KEYS: &[&str] = &["url"];
const THEME_KEYS: &[&str] = &["theme-color"];

/// First key (left to right) holding a non-empty string.
fn first_present(data: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| data.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build a complete record from `data`.  Never fails: every field has a
/// fallback, and non-string values count as absent.
pub fn normalize(data: &Map<String, Value>, address: &str, theme: &ThemePolicy) -> PreviewRecord {
    PreviewRecord {
        title: first_present(data, TITLE_KEYS).unwrap_or_else(|| NO_TITLE.to_string()),
        description: first_present(data, DESCRIPTION_KEYS)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        image: first_present(data, IMAGE_KEYS).unwrap_or_default(),
        canonical_link: first_present(data, LINK_KEYS).unwrap_or_else(|| address.to_string()),
        accent_color: first_present(data, THEME_KEYS)
            .unwrap_or_else(|| theme.accent_for(address)),
    }
}

/// Pull the `data` object out of a response body.
pub fn extract_data(body: &Value) -> Option<&Map<String, Value>> {
    body.get("data").and_then(Value::as_object)
}
