//! Form definitions backing the dashboard routes.
//!
//! Every form is validated before anything is sent upstream. Checkbox inputs
//! arrive as booleans and are turned into `Y`/`N` flags only when the form is
//! converted into an API payload.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use validator::ValidationErrors;

use crate::domain::types::YesNo;

pub mod books;
pub mod qanda;
pub mod topics;
pub mod users;

/// Field name to messages, keyed by the upper-case wire name (`PRICE`).
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Hidden form posted by the activate/deactivate buttons.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    /// Flag the record had when the page was rendered.
    pub current: YesNo,
}

/// Flattens `validator` errors into per-field message lists.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code))
                })
                .collect();
            (field.to_uppercase(), messages)
        })
        .collect()
}

const SANITIZE_PASSES: usize = 4;

/// Strips markup from free text and trims it.
///
/// The result is plain text: entities `ammonia` escapes are decoded back, so
/// saving the same text again leaves it unchanged. Escaped markup that turns
/// into tags once decoded is cleaned on the next pass.
pub fn sanitize(value: &str) -> String {
    let mut current = value.trim().to_string();
    for _ in 0..SANITIZE_PASSES {
        let next = decode_entities(&ammonia::clean(&current)).trim().to_string();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Reverses the escaping the HTML serializer applies to text nodes.
fn decode_entities(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// HTML checkboxes are submitted only when ticked, with a browser-chosen
/// value. Use together with `#[serde(default)]`.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "y" | "yes" | "1"
    ))
}

/// Numeric inputs: a blank or unparsable value becomes `None` so that the
/// `required` rule reports it as a field error instead of rejecting the whole
/// form. Use together with `#[serde(default)]`.
pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<T>().ok()))
}

/// Blank text inputs become `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(crate::domain::types::non_blank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct NumericFields {
        #[serde(default, deserialize_with = "checkbox")]
        active: bool,
        #[serde(default, deserialize_with = "optional_number")]
        price: Option<f64>,
    }

    #[test]
    fn checkbox_and_numbers_from_form_body() {
        let fields: NumericFields = serde_html_form::from_str("active=on&price=").unwrap();
        assert!(fields.active);
        assert_eq!(fields.price, None);

        let fields: NumericFields = serde_html_form::from_str("price=12.5").unwrap();
        assert!(!fields.active);
        assert_eq!(fields.price, Some(12.5));
    }

    #[test]
    fn toggle_form_reads_flag() {
        let form: ToggleForm = serde_html_form::from_str("current=N").unwrap();
        assert_eq!(form.current, YesNo::No);
    }

    #[test]
    fn sanitize_removes_scripts() {
        assert_eq!(sanitize("  <script>x</script>Hello "), "Hello");
    }

    /// Plain text survives untouched instead of gaining entities.
    #[test]
    fn sanitize_keeps_plain_text_verbatim() {
        assert_eq!(sanitize("Tom & Jerry <3"), "Tom & Jerry <3");
        assert_eq!(sanitize("a < b > c"), "a < b > c");
        assert_eq!(sanitize("5\u{a0}km"), "5\u{a0}km");
    }

    /// Saving an already sanitized description again leaves it unchanged.
    #[test]
    fn sanitize_twice_gives_the_same_text() {
        for input in [
            "Tom & Jerry <3",
            "R&amp;D notes",
            "&lt;script&gt;alert(1)&lt;/script&gt;Intro",
            "<b>Bold</b> & <i>italic</i>",
            "  spaced  ",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "{input}");
        }
        assert_eq!(sanitize("&lt;script&gt;alert(1)&lt;/script&gt;Intro"), "Intro");
    }
}
